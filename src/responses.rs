//! Scripted assistant replies.
//!
//! Replies are picked from an ordered rule table: the first rule with a
//! keyword contained in the lowercased input wins, and anything else gets
//! [`FALLBACK`]. Content lives here as data so control flow never has to know
//! what the assistant says.

use serde::{Deserialize, Serialize};

use crate::intent::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    FeatureAnalysis,
    BattleCard,
    Dashboard,
    Alerts,
    General,
}

#[derive(Debug)]
pub struct ResponseRule {
    pub bucket: Bucket,
    /// Lowercase substrings, any of which selects this rule
    pub keywords: &'static [&'static str],
    pub text: &'static str,
    pub actions: &'static [(&'static str, Intent)],
    /// Narrower keywords `actions` need; empty means any match offers them
    pub action_keywords: &'static [&'static str],
}

impl ResponseRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }

    /// Actions offered when this rule answers `input`.
    pub fn actions_for(&self, input: &str) -> &'static [(&'static str, Intent)] {
        if self.action_keywords.is_empty() {
            return self.actions;
        }
        let lowered = input.to_lowercase();
        if self.action_keywords.iter().any(|kw| lowered.contains(kw)) {
            self.actions
        } else {
            HELP_ACTIONS
        }
    }
}

const HELP_ACTIONS: &[(&str, Intent)] = &[
    ("Tour Platform", Intent::TourPlatform),
    ("View Help Docs", Intent::ViewHelpDocs),
];

pub static RULES: [ResponseRule; 4] = [
    ResponseRule {
        bucket: Bucket::FeatureAnalysis,
        keywords: &["feature", "analysis"],
        text: "I can help you analyze features against competitors. To get started, I recommend using the Feature Analysis tool where you can input a feature name and get AI-powered competitive insights including market positioning, benchmarks, and demand signals.",
        actions: &[
            ("Start Analysis", Intent::StartAnalysis),
            ("View Examples", Intent::ViewExamples),
        ],
        action_keywords: &[],
    },
    ResponseRule {
        bucket: Bucket::BattleCard,
        keywords: &["battle card", "competitor"],
        text: "Great! I can help you create battle cards for competitive analysis. Head to the Battle Cards Generator where you can select competitors and templates. I'll populate the cards with strengths, weaknesses, differentiators, and pricing comparisons.",
        actions: &[
            ("Create Battle Card", Intent::CreateBattleCard),
            ("See Templates", Intent::SeeTemplates),
        ],
        // "competitor" alone gets the battle card text but general actions
        action_keywords: &["battle card"],
    },
    ResponseRule {
        bucket: Bucket::Dashboard,
        keywords: &["dashboard", "metric"],
        text: "Your dashboard shows key metrics like active analyses (24), market alerts (8), and a 94% success rate. The recent activity shows completed analyses for AI-Powered Search (85/100 score) and in-progress Mobile SDK analysis. Would you like me to explain any specific metrics?",
        actions: HELP_ACTIONS,
        action_keywords: &[],
    },
    ResponseRule {
        bucket: Bucket::Alerts,
        keywords: &["alert", "monitoring"],
        text: "You have 3 active alerts and several monitoring profiles tracking competitors like OpenAI, Firebase, and AWS. Recent alerts include GPT-5 development news and new Firebase SDK features. I can help you create new monitoring profiles or explain alert priorities.",
        actions: HELP_ACTIONS,
        action_keywords: &[],
    },
];

pub static FALLBACK: ResponseRule = ResponseRule {
    bucket: Bucket::General,
    keywords: &[],
    text: "I understand you're looking for help with OneLens. I can assist with feature analysis, creating battle cards, setting up monitoring, explaining dashboard metrics, or navigating the platform. What specific task would you like guidance on?",
    actions: HELP_ACTIONS,
    action_keywords: &[],
};

/// Opening message of every chat session
pub static GREETING: ResponseRule = ResponseRule {
    bucket: Bucket::General,
    keywords: &[],
    text: "Hi! I'm your OneLens AI assistant. I can help you analyze features, create battle cards, interpret data, and guide you through the platform. What would you like to explore?",
    actions: &[
        ("Analyze Feature", Intent::AnalyzeFeature),
        ("Create Battle Card", Intent::CreateBattleCard),
        ("Explain Insights", Intent::ExplainInsights),
    ],
    action_keywords: &[],
};

pub fn classify(input: &str) -> &'static ResponseRule {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .unwrap_or(&FALLBACK)
}
