//! Feature analysis panel: type a feature, "analyze" it, get the benchmark.

use std::time::Duration;

use tracing::info;

use crate::data::{AnalysisResult, SAMPLE_ANALYSIS};
use crate::input::LineInput;
use crate::timer::{PendingSlot, RequestId, Scheduler, Settled, TimerTarget, Trigger};

pub struct AnalysisPanel {
    pub subject: LineInput,
    pending: PendingSlot,
    /// Subject of the in-flight analysis
    analyzing: Option<String>,
    /// Subject of the last finished analysis
    completed: Option<String>,
    delay: Duration,
}

impl AnalysisPanel {
    pub fn new(delay: Duration) -> Self {
        Self {
            subject: LineInput::default(),
            pending: PendingSlot::default(),
            analyzing: None,
            completed: None,
            delay,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending.is_busy()
    }

    pub fn analyzing_subject(&self) -> Option<&str> {
        self.analyzing.as_deref()
    }

    pub fn can_analyze(&self) -> bool {
        !self.subject.is_blank() && !self.is_analyzing()
    }

    pub fn analyze(&mut self, scheduler: &Scheduler) -> Trigger {
        if self.subject.is_blank() {
            return Trigger::EmptyInput;
        }
        if self.is_analyzing() {
            return Trigger::Busy;
        }

        let subject = self.subject.value().trim().to_string();
        let id = self.pending.start(scheduler, TimerTarget::Analysis, self.delay);
        info!(request = %id, subject = %subject, "analysis started");
        self.analyzing = Some(subject);
        Trigger::Started(id)
    }

    pub fn complete(&mut self, id: RequestId) -> Settled {
        let settled = self.pending.settle(id);
        if settled == Settled::Applied {
            self.completed = self.analyzing.take();
            info!(request = %id, "analysis finished");
        }
        settled
    }

    /// The benchmark, once any analysis has finished. Earlier results stay
    /// visible while a new analysis runs.
    pub fn result(&self) -> Option<&'static AnalysisResult> {
        self.completed.as_ref().map(|_| &SAMPLE_ANALYSIS)
    }

    pub fn completed_subject(&self) -> Option<&str> {
        self.completed.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::AppEvent;
    use tokio::sync::mpsc;

    const DELAY: Duration = Duration::from_secs(3);

    #[tokio::test(start_paused = true)]
    async fn test_analysis_reveals_benchmark() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let scheduler = Scheduler::new(tx);
        let mut panel = AnalysisPanel::new(DELAY);
        panel.subject.set("AI-Powered Search");

        let Trigger::Started(id) = panel.analyze(&scheduler) else {
            panic!("analysis did not start");
        };
        assert!(panel.is_analyzing());
        assert!(!panel.can_analyze());
        assert_eq!(panel.analyzing_subject(), Some("AI-Powered Search"));
        assert!(panel.result().is_none());

        let early = tokio::time::timeout(Duration::from_millis(2999), rx.recv()).await;
        assert!(early.is_err());
        assert!(panel.is_analyzing());

        let Some(AppEvent::Completed(completion)) = rx.recv().await else {
            panic!("no completion");
        };
        assert_eq!(completion.id, id);
        assert_eq!(panel.complete(completion.id), Settled::Applied);
        assert!(!panel.is_analyzing());

        let result = panel.result().expect("result after completion");
        assert_eq!(result.overall_score, 92);
        assert_eq!(result.position, "Market Leader");
        let names: Vec<_> = result.competitors.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["SearchCorp", "FindIt Pro", "QuickSearch"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_subject_does_nothing() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let scheduler = Scheduler::new(tx);
        let mut panel = AnalysisPanel::new(DELAY);
        panel.subject.set("   ");

        assert_eq!(panel.analyze(&scheduler), Trigger::EmptyInput);
        assert!(!panel.is_analyzing());
        assert!(panel.result().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_while_busy_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let scheduler = Scheduler::new(tx);
        let mut panel = AnalysisPanel::new(DELAY);
        panel.subject.set("Mobile SDK");

        let first = panel.analyze(&scheduler);
        assert!(matches!(first, Trigger::Started(_)));
        assert_eq!(panel.analyze(&scheduler), Trigger::Busy);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_for_disposed_panel_is_stale() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let scheduler = Scheduler::new(tx);
        let mut panel = AnalysisPanel::new(DELAY);
        panel.subject.set("Mobile SDK");
        let Trigger::Started(old) = panel.analyze(&scheduler) else {
            panic!("analysis did not start");
        };

        // Rebuilt panel, as when the section is left and re-entered
        let mut panel = AnalysisPanel::new(DELAY);
        panel.subject.set("Mobile SDK");
        let Trigger::Started(new) = panel.analyze(&scheduler) else {
            panic!("analysis did not start");
        };

        assert_ne!(old, new);
        assert_eq!(panel.complete(old), Settled::StaleDiscarded);
        assert!(panel.is_analyzing());
        assert!(panel.result().is_none());
    }
}
