//! Commands that panels and chat actions hand to the shell.
//!
//! Intents are plain data so a chat reply can carry them, they can be
//! serialized, and the shell decides what each one does.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    AnalyzeFeature,
    StartAnalysis,
    ViewExamples,
    ExplainInsights,
    CreateBattleCard,
    SeeTemplates,
    TourPlatform,
    ViewHelpDocs,
    ExportReport,
    AnalysisFilters,
    FilterRequests,
    SortRequests,
    ConnectTools,
}

/// External services the dashboard only has placeholders for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collaborator {
    BattleCards,
    Templates,
    ProductTour,
    HelpCenter,
    Export,
    FilterService,
    SortService,
    Connector,
}

impl Collaborator {
    pub fn display_name(&self) -> &'static str {
        match self {
            Collaborator::BattleCards => "Battle card generator",
            Collaborator::Templates => "Battle card templates",
            Collaborator::ProductTour => "Platform tour",
            Collaborator::HelpCenter => "Help docs",
            Collaborator::Export => "PDF export",
            Collaborator::FilterService => "Filtering",
            Collaborator::SortService => "Sorting",
            Collaborator::Connector => "Tool connectors",
        }
    }
}

impl Intent {
    /// The collaborator this intent would need, or `None` if the shell
    /// handles it itself.
    pub fn collaborator(&self) -> Option<Collaborator> {
        match self {
            Intent::AnalyzeFeature
            | Intent::StartAnalysis
            | Intent::ViewExamples
            | Intent::ExplainInsights => None,
            Intent::CreateBattleCard => Some(Collaborator::BattleCards),
            Intent::SeeTemplates => Some(Collaborator::Templates),
            Intent::TourPlatform => Some(Collaborator::ProductTour),
            Intent::ViewHelpDocs => Some(Collaborator::HelpCenter),
            Intent::ExportReport => Some(Collaborator::Export),
            Intent::AnalysisFilters | Intent::FilterRequests => Some(Collaborator::FilterService),
            Intent::SortRequests => Some(Collaborator::SortService),
            Intent::ConnectTools => Some(Collaborator::Connector),
        }
    }
}
