//! Built-in sample data. Nothing here is loaded or stored anywhere.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: &'static str,
    pub detail: &'static str,
}

pub const METRICS: [MetricCard; 3] = [
    MetricCard { label: "Active Analyses", value: "24", detail: "+3 this week" },
    MetricCard { label: "Market Alerts", value: "8", detail: "3 need review" },
    MetricCard { label: "Success Rate", value: "94%", detail: "last 30 days" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityStatus {
    Completed,
    InProgress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub subject: &'static str,
    pub status: ActivityStatus,
    pub score: Option<u8>,
    pub when: &'static str,
}

pub const RECENT_ACTIVITY: [ActivityItem; 2] = [
    ActivityItem {
        subject: "AI-Powered Search",
        status: ActivityStatus::Completed,
        score: Some(85),
        when: "2 hours ago",
    },
    ActivityItem {
        subject: "Mobile SDK",
        status: ActivityStatus::InProgress,
        score: None,
        when: "started today",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Competitor {
    pub name: &'static str,
    pub score: u8,
    pub position: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub subject_name: &'static str,
    pub overall_score: u8,
    pub position: &'static str,
    pub trend: &'static str,
    pub insights: &'static [&'static str],
    pub competitors: &'static [Competitor],
}

/// Shown for every analysis, whatever the subject.
pub static SAMPLE_ANALYSIS: AnalysisResult = AnalysisResult {
    subject_name: "AI-Powered Search",
    overall_score: 92,
    position: "Market Leader",
    trend: "Leading",
    insights: &[
        "25% faster than closest competitor",
        "Superior accuracy in voice recognition",
        "Missing advanced filtering options",
    ],
    competitors: &[
        Competitor { name: "SearchCorp", score: 78, position: "Strong Challenger" },
        Competitor { name: "FindIt Pro", score: 65, position: "Niche Player" },
        Competitor { name: "QuickSearch", score: 58, position: "Follower" },
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RequestStatus {
    HighPriority,
    InProgress,
    Research,
    Backlog,
}

impl RequestStatus {
    /// Kanban column order
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::HighPriority,
        RequestStatus::InProgress,
        RequestStatus::Research,
        RequestStatus::Backlog,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::HighPriority => "High Priority",
            RequestStatus::InProgress => "In Progress",
            RequestStatus::Research => "Research",
            RequestStatus::Backlog => "Backlog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemandRequest {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub segment: &'static str,
    pub status: RequestStatus,
    pub impact: u8,
    pub votes: u32,
    /// Whole dollars
    pub revenue: u64,
    pub effort: &'static str,
    pub last_updated: &'static str,
    pub quotes: &'static [&'static str],
}

pub static DEMAND_REQUESTS: [DemandRequest; 4] = [
    DemandRequest {
        id: 1,
        title: "Advanced Search Filters",
        description: "Users want more granular filtering options in search results",
        segment: "Enterprise",
        status: RequestStatus::HighPriority,
        impact: 95,
        votes: 147,
        revenue: 250_000,
        effort: "Medium",
        last_updated: "2 days ago",
        quotes: &[
            "We desperately need better filters to find relevant content",
            "Current search is too basic for our enterprise needs",
        ],
    },
    DemandRequest {
        id: 2,
        title: "Mobile App Dark Mode",
        description: "Native dark mode support for mobile applications",
        segment: "Consumer",
        status: RequestStatus::InProgress,
        impact: 78,
        votes: 89,
        revenue: 50_000,
        effort: "Low",
        last_updated: "5 hours ago",
        quotes: &[
            "Dark mode is essential for night usage",
            "All modern apps should have dark mode",
        ],
    },
    DemandRequest {
        id: 3,
        title: "Real-time Collaboration",
        description: "Live document editing with multiple users simultaneously",
        segment: "Teams",
        status: RequestStatus::Research,
        impact: 87,
        votes: 203,
        revenue: 180_000,
        effort: "High",
        last_updated: "1 week ago",
        quotes: &[
            "Google Docs style collaboration would be game changing",
            "We need to edit documents together in real-time",
        ],
    },
    DemandRequest {
        id: 4,
        title: "API Rate Limiting Controls",
        description: "Allow developers to configure custom rate limits",
        segment: "Developers",
        status: RequestStatus::Backlog,
        impact: 65,
        votes: 45,
        revenue: 75_000,
        effort: "Medium",
        last_updated: "3 days ago",
        quotes: &[
            "Rate limits are too restrictive for our use case",
            "Need more flexibility in API consumption",
        ],
    },
];

/// Headline numbers on the demand page that come from the tracker itself
/// rather than from the four seed requests.
pub const TOTAL_REQUESTS: u32 = 147;
pub const TOTAL_VOTES: u32 = 1_247;
pub const REQUESTS_THIS_WEEK: u32 = 12;
