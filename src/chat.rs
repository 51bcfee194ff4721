//! Floating assistant widget: conversation log plus scripted replies.

use std::time::Duration;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::input::LineInput;
use crate::intent::Intent;
use crate::responses::{self, ResponseRule};
use crate::timer::{PendingSlot, RequestId, Scheduler, Settled, TimerTarget, Trigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatAuthor {
    User,
    Assistant,
}

/// Button offered under an assistant message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAction {
    pub label: String,
    pub intent: Intent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub author: ChatAuthor,
    pub text: String,
    pub timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ChatAction>,
}

pub struct ChatWidget {
    pub open: bool,
    pub minimized: bool,
    pub input: LineInput,
    pub scroll: u16,
    messages: Vec<ChatMessage>,
    next_message_id: u64,
    pending: PendingSlot,
    /// Text of the message the pending reply answers
    awaiting: Option<String>,
    selected_action: Option<usize>,
    reply_delay: Duration,
}

impl ChatWidget {
    pub fn new(reply_delay: Duration) -> Self {
        let mut widget = Self {
            open: false,
            minimized: false,
            input: LineInput::default(),
            scroll: 0,
            messages: Vec::new(),
            next_message_id: 1,
            pending: PendingSlot::default(),
            awaiting: None,
            selected_action: None,
            reply_delay,
        };
        widget.push_reply(&responses::GREETING, responses::GREETING.actions);
        widget
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Assistant is "typing"
    pub fn is_typing(&self) -> bool {
        self.pending.is_busy()
    }

    pub fn can_send(&self) -> bool {
        !self.input.is_blank() && !self.is_typing()
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    /// Hide the widget. The conversation and any pending reply survive.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Send the typed message and schedule the scripted reply.
    pub fn submit(&mut self, scheduler: &Scheduler) -> Trigger {
        if self.input.is_blank() {
            return Trigger::EmptyInput;
        }
        if self.is_typing() {
            return Trigger::Busy;
        }

        let text = self.input.take();
        self.push_message(ChatAuthor::User, text.clone(), Vec::new());
        let id = self.pending.start(scheduler, TimerTarget::ChatReply, self.reply_delay);
        info!(request = %id, chars = text.chars().count(), "chat message sent");
        self.awaiting = Some(text);
        self.scroll_to_bottom();
        Trigger::Started(id)
    }

    /// Deliver the reply for `id` if it is the one still awaited.
    pub fn complete(&mut self, id: RequestId) -> Settled {
        let settled = self.pending.settle(id);
        if settled == Settled::Applied {
            let question = self.awaiting.take().unwrap_or_default();
            let rule = responses::classify(&question);
            debug!(request = %id, bucket = ?rule.bucket, "chat reply delivered");
            self.push_reply(rule, rule.actions_for(&question));
            self.scroll_to_bottom();
        }
        settled
    }

    /// Abort a pending reply, e.g. on shutdown.
    pub fn cancel_pending(&mut self) {
        if self.pending.cancel() {
            self.awaiting = None;
        }
    }

    /// Actions of the newest assistant message, the only ones still offered.
    pub fn latest_actions(&self) -> &[ChatAction] {
        self.messages
            .iter()
            .rev()
            .find(|m| m.author == ChatAuthor::Assistant)
            .map(|m| m.actions.as_slice())
            .unwrap_or(&[])
    }

    pub fn selected_action(&self) -> Option<usize> {
        self.selected_action
    }

    /// Tab through the offered actions, wrapping back to none.
    pub fn cycle_action(&mut self) {
        let count = self.latest_actions().len();
        self.selected_action = match self.selected_action {
            _ if count == 0 => None,
            None => Some(0),
            Some(i) if i + 1 < count => Some(i + 1),
            Some(_) => None,
        };
    }

    pub fn selected_intent(&self) -> Option<Intent> {
        self.selected_action
            .and_then(|i| self.latest_actions().get(i))
            .map(|action| action.intent)
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Rendering clamps this to the real bottom
    fn scroll_to_bottom(&mut self) {
        self.scroll = u16::MAX;
    }

    fn push_reply(&mut self, rule: &ResponseRule, actions: &[(&str, Intent)]) {
        let actions = actions
            .iter()
            .map(|(label, intent)| ChatAction {
                label: (*label).to_string(),
                intent: *intent,
            })
            .collect();
        self.push_message(ChatAuthor::Assistant, rule.text.to_string(), actions);
        self.selected_action = None;
    }

    fn push_message(&mut self, author: ChatAuthor, text: String, actions: Vec<ChatAction>) {
        self.messages.push(ChatMessage {
            id: self.next_message_id,
            author,
            text,
            timestamp: Local::now(),
            actions,
        });
        self.next_message_id += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::FALLBACK;
    use crate::tui::AppEvent;
    use tokio::sync::mpsc;

    const DELAY: Duration = Duration::from_millis(1500);

    fn setup() -> (ChatWidget, Scheduler, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChatWidget::new(DELAY), Scheduler::new(tx), rx)
    }

    fn type_text(widget: &mut ChatWidget, text: &str) {
        widget.input.set(text);
    }

    async fn next_id(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> RequestId {
        match rx.recv().await {
            Some(AppEvent::Completed(c)) => {
                assert_eq!(c.target, TimerTarget::ChatReply);
                c.id
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn test_starts_with_greeting() {
        let widget = ChatWidget::new(DELAY);
        assert_eq!(widget.messages().len(), 1);
        assert_eq!(widget.messages()[0].author, ChatAuthor::Assistant);
        let labels: Vec<_> = widget.latest_actions().iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Analyze Feature", "Create Battle Card", "Explain Insights"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submit_changes_nothing() {
        let (mut widget, scheduler, _rx) = setup();
        for blank in ["", "   ", "\t"] {
            type_text(&mut widget, blank);
            assert_eq!(widget.submit(&scheduler), Trigger::EmptyInput);
        }
        assert_eq!(widget.messages().len(), 1);
        assert!(!widget.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let (mut widget, scheduler, mut rx) = setup();
        type_text(&mut widget, "feature analysis please");

        let Trigger::Started(id) = widget.submit(&scheduler) else {
            panic!("submit did not start");
        };
        assert_eq!(widget.messages().len(), 2);
        assert_eq!(widget.messages()[1].author, ChatAuthor::User);
        assert_eq!(widget.input.value(), "");
        assert!(widget.is_typing());

        let early = tokio::time::timeout(Duration::from_millis(1499), rx.recv()).await;
        assert!(early.is_err());
        assert!(widget.is_typing());

        let fired = next_id(&mut rx).await;
        assert_eq!(fired, id);
        assert_eq!(widget.complete(fired), Settled::Applied);
        assert!(!widget.is_typing());
        assert_eq!(widget.messages().len(), 3);

        let labels: Vec<_> = widget.latest_actions().iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["Start Analysis", "View Examples"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_while_typing_is_rejected() {
        let (mut widget, scheduler, _rx) = setup();
        type_text(&mut widget, "first");
        assert!(matches!(widget.submit(&scheduler), Trigger::Started(_)));

        type_text(&mut widget, "second");
        assert!(!widget.can_send());
        assert_eq!(widget.submit(&scheduler), Trigger::Busy);
        assert_eq!(widget.messages().len(), 2);
        assert_eq!(widget.input.value(), "second");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmatched_message_gets_fallback() {
        let (mut widget, scheduler, mut rx) = setup();
        type_text(&mut widget, "xyzzy");
        widget.submit(&scheduler);
        let id = next_id(&mut rx).await;
        widget.complete(id);

        let reply = widget.messages().last().unwrap();
        assert_eq!(reply.author, ChatAuthor::Assistant);
        assert_eq!(reply.text, FALLBACK.text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_completion_is_discarded() {
        let (mut widget, scheduler, _rx) = setup();
        type_text(&mut widget, "battle card");
        let Trigger::Started(id) = widget.submit(&scheduler) else {
            panic!("submit did not start");
        };
        widget.cancel_pending();

        assert_eq!(widget.complete(id), Settled::StaleDiscarded);
        assert_eq!(widget.messages().len(), 2);
        assert!(!widget.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_keeps_conversation() {
        let (mut widget, scheduler, mut rx) = setup();
        widget.toggle_open();
        type_text(&mut widget, "alerts?");
        widget.submit(&scheduler);
        widget.close();

        let id = next_id(&mut rx).await;
        assert_eq!(widget.complete(id), Settled::Applied);
        widget.toggle_open();
        assert!(widget.open);
        assert_eq!(widget.messages().len(), 3);
    }

    #[test]
    fn test_action_cycle_wraps_to_none() {
        let mut widget = ChatWidget::new(DELAY);
        assert_eq!(widget.selected_intent(), None);
        widget.cycle_action();
        assert_eq!(widget.selected_intent(), Some(Intent::AnalyzeFeature));
        widget.cycle_action();
        widget.cycle_action();
        assert_eq!(widget.selected_intent(), Some(Intent::ExplainInsights));
        widget.cycle_action();
        assert_eq!(widget.selected_action(), None);
    }

    #[test]
    fn test_message_serializes_with_actions() {
        let widget = ChatWidget::new(DELAY);
        let json = serde_json::to_value(&widget.messages()[0]).unwrap();
        assert_eq!(json["author"], "assistant");
        assert_eq!(json["actions"][0]["intent"], "analyze_feature");
    }
}
