use ratatui::widgets::ListState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dashboard,
    Analysis,
    Demand,
    Alerts,
}

impl Section {
    pub fn id(&self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Analysis => "analysis",
            Section::Demand => "demand",
            Section::Alerts => "alerts",
        }
    }

    pub fn from_id(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" => Some(Section::Dashboard),
            "analysis" => Some(Section::Analysis),
            "demand" => Some(Section::Demand),
            "alerts" => Some(Section::Alerts),
            _ => None,
        }
    }

    pub fn all() -> [Section; 4] {
        [Section::Dashboard, Section::Analysis, Section::Demand, Section::Alerts]
    }

    /// Page heading shown above the panel
    pub fn title(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Analysis => "Feature Analysis",
            Section::Demand => "Demand Dashboard",
            Section::Alerts => "Alert Center",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Section::Dashboard => "Welcome back! Here's your product intelligence overview.",
            Section::Analysis => "Analyze features against competitive landscape with AI-powered insights.",
            Section::Demand => "Track and prioritize feature requests from your users",
            Section::Alerts => "Manage your real-time market monitoring alerts.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    pub section: Section,
    pub label: &'static str,
    pub icon: &'static str,
    pub badge: Option<&'static str>,
}

pub const NAVIGATION: [NavigationEntry; 4] = [
    NavigationEntry { section: Section::Dashboard, label: "Dashboard", icon: "⌂", badge: None },
    NavigationEntry { section: Section::Analysis, label: "Feature Analysis", icon: "⌕", badge: None },
    NavigationEntry { section: Section::Demand, label: "Demand Tracker", icon: "◎", badge: None },
    NavigationEntry { section: Section::Alerts, label: "Alerts", icon: "!", badge: Some("3") },
];

/// Sidebar state: the active section plus the highlighted row.
#[derive(Debug)]
pub struct Navigation {
    active: Section,
    pub list_state: ListState,
}

impl Navigation {
    pub fn new(active: Section) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(Self::index_of(active)));
        Self { active, list_state }
    }

    pub fn active(&self) -> Section {
        self.active
    }

    /// Make `section` active. Returns the previously active section.
    pub fn select(&mut self, section: Section) -> Section {
        let previous = self.active;
        self.active = section;
        self.list_state.select(Some(Self::index_of(section)));
        previous
    }

    pub fn highlighted(&self) -> Section {
        self.list_state
            .selected()
            .and_then(|i| NAVIGATION.get(i))
            .map(|entry| entry.section)
            .unwrap_or(self.active)
    }

    pub fn nav_down(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some((i + 1).min(NAVIGATION.len() - 1)));
    }

    pub fn nav_up(&mut self) {
        let i = self.list_state.selected().unwrap_or(0);
        self.list_state.select(Some(i.saturating_sub(1)));
    }

    fn index_of(section: Section) -> usize {
        NAVIGATION
            .iter()
            .position(|entry| entry.section == section)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_ids_round_trip() {
        for section in Section::all() {
            assert_eq!(Section::from_id(section.id()), Some(section));
        }
        assert_eq!(Section::from_id("  Demand "), Some(Section::Demand));
        assert_eq!(Section::from_id("monitoring"), None);
    }

    #[test]
    fn test_every_section_has_one_entry() {
        for section in Section::all() {
            assert_eq!(NAVIGATION.iter().filter(|e| e.section == section).count(), 1);
        }
        let badged: Vec<_> = NAVIGATION.iter().filter_map(|e| e.badge).collect();
        assert_eq!(badged, vec!["3"]);
    }

    #[test]
    fn test_cursor_moves_without_changing_active() {
        let mut nav = Navigation::new(Section::Dashboard);
        nav.nav_down();
        nav.nav_down();
        assert_eq!(nav.highlighted(), Section::Demand);
        assert_eq!(nav.active(), Section::Dashboard);

        for _ in 0..10 {
            nav.nav_down();
        }
        assert_eq!(nav.highlighted(), Section::Alerts);
        for _ in 0..10 {
            nav.nav_up();
        }
        assert_eq!(nav.highlighted(), Section::Dashboard);
    }

    #[test]
    fn test_select_reports_previous_section() {
        let mut nav = Navigation::new(Section::Analysis);
        assert_eq!(nav.select(Section::Demand), Section::Analysis);
        assert_eq!(nav.active(), Section::Demand);
        assert_eq!(nav.highlighted(), Section::Demand);
    }
}
