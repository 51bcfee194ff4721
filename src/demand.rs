//! Demand tracker: read-only projections and formatting over the seed
//! feature requests, plus the panel's view state.

use ratatui::widgets::ListState;

use crate::data::{
    DemandRequest, RequestStatus, REQUESTS_THIS_WEEK, TOTAL_REQUESTS, TOTAL_VOTES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Table,
    Kanban,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Table => ViewMode::Kanban,
            ViewMode::Kanban => ViewMode::Table,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Table => "Table View",
            ViewMode::Kanban => "Kanban View",
        }
    }
}

/// Urgency band of an impact score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactTier {
    Critical,
    Elevated,
    Normal,
}

impl ImpactTier {
    pub fn from_impact(impact: u8) -> Self {
        if impact >= 90 {
            ImpactTier::Critical
        } else if impact >= 70 {
            ImpactTier::Elevated
        } else {
            ImpactTier::Normal
        }
    }
}

/// `$250,000`
pub fn format_currency(amount: u64) -> String {
    format!("${}", group_thousands(amount))
}

/// `$555K`, `$1.2M`
pub fn format_compact_currency(amount: u64) -> String {
    match amount {
        0..=999 => format!("${}", amount),
        1_000..=999_999 => format!("${}K", trim_decimal(amount as f64 / 1_000.0)),
        _ => format!("${}M", trim_decimal(amount as f64 / 1_000_000.0)),
    }
}

/// `1,247`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn trim_decimal(value: f64) -> String {
    let formatted = format!("{:.1}", value);
    formatted
        .strip_suffix(".0")
        .map(str::to_string)
        .unwrap_or(formatted)
}

pub fn with_status(requests: &[DemandRequest], status: RequestStatus) -> Vec<&DemandRequest> {
    requests.iter().filter(|r| r.status == status).collect()
}

/// Kanban columns in fixed status order; empty columns are kept.
pub fn group_by_status(requests: &[DemandRequest]) -> Vec<(RequestStatus, Vec<&DemandRequest>)> {
    RequestStatus::ALL
        .iter()
        .map(|&status| (status, with_status(requests, status)))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickStat {
    pub label: &'static str,
    pub value: String,
}

pub fn quick_stats(requests: &[DemandRequest]) -> Vec<QuickStat> {
    let revenue: u64 = requests.iter().map(|r| r.revenue).sum();
    vec![
        QuickStat { label: "Total Requests", value: group_thousands(TOTAL_REQUESTS.into()) },
        QuickStat { label: "Revenue Impact", value: format_compact_currency(revenue) },
        QuickStat { label: "User Votes", value: group_thousands(TOTAL_VOTES.into()) },
        QuickStat { label: "This Week", value: group_thousands(REQUESTS_THIS_WEEK.into()) },
    ]
}

/// View state of the demand page. Never touches the request data.
#[derive(Debug)]
pub struct DemandPanel {
    pub view_mode: ViewMode,
    pub show_details: bool,
    /// Index into the request slice
    selected: usize,
    pub table_state: ListState,
}

impl DemandPanel {
    pub fn new() -> Self {
        let mut table_state = ListState::default();
        table_state.select(Some(0));
        Self {
            view_mode: ViewMode::Table,
            show_details: false,
            selected: 0,
            table_state,
        }
    }

    pub fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggled();
    }

    pub fn toggle_details(&mut self) {
        self.show_details = !self.show_details;
    }

    pub fn selected<'a>(&self, requests: &'a [DemandRequest]) -> Option<&'a DemandRequest> {
        requests.get(self.selected)
    }

    pub fn select_index(&mut self, index: usize) {
        self.selected = index;
        self.table_state.select(Some(index));
    }

    /// Next request: next row in the table, next card in the column on the board.
    pub fn move_down(&mut self, requests: &[DemandRequest]) {
        match self.view_mode {
            ViewMode::Table => {
                if !requests.is_empty() {
                    self.select_index((self.selected + 1).min(requests.len() - 1));
                }
            }
            ViewMode::Kanban => self.step_in_column(requests, 1),
        }
    }

    pub fn move_up(&mut self, requests: &[DemandRequest]) {
        match self.view_mode {
            ViewMode::Table => self.select_index(self.selected.saturating_sub(1)),
            ViewMode::Kanban => self.step_in_column(requests, -1),
        }
    }

    /// Jump to the first card of the neighbouring non-empty column.
    pub fn move_column(&mut self, requests: &[DemandRequest], delta: isize) {
        let Some(current) = requests.get(self.selected).map(|r| r.status) else {
            return;
        };
        let columns = RequestStatus::ALL;
        let Some(mut col) = columns.iter().position(|&s| s == current) else {
            return;
        };

        loop {
            let next = col as isize + delta;
            if next < 0 || next >= columns.len() as isize {
                return;
            }
            col = next as usize;
            if let Some(idx) = requests.iter().position(|r| r.status == columns[col]) {
                self.select_index(idx);
                return;
            }
        }
    }

    fn step_in_column(&mut self, requests: &[DemandRequest], delta: isize) {
        let Some(current) = requests.get(self.selected).map(|r| r.status) else {
            return;
        };
        let column: Vec<usize> = requests
            .iter()
            .enumerate()
            .filter(|(_, r)| r.status == current)
            .map(|(i, _)| i)
            .collect();
        if let Some(pos) = column.iter().position(|&i| i == self.selected) {
            let next = (pos as isize + delta).clamp(0, column.len() as isize - 1) as usize;
            self.select_index(column[next]);
        }
    }
}

impl Default for DemandPanel {
    fn default() -> Self {
        Self::new()
    }
}
