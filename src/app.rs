use std::time::Duration;

use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::analysis::AnalysisPanel;
use crate::chat::ChatWidget;
use crate::config::Config;
use crate::demand::DemandPanel;
use crate::intent::Intent;
use crate::nav::{Navigation, Section};
use crate::timer::{Completion, Scheduler, Settled, TimerTarget, Trigger};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Sidebar,
    Panel,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Transient message in the footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    ticks_left: u8,
}

const NOTICE_TICKS: u8 = 10;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,

    pub nav: Navigation,
    pub analysis: AnalysisPanel,
    pub demand: DemandPanel,
    pub chat: ChatWidget,

    pub notice: Option<Notice>,

    // Animation state
    pub animation_frame: u8, // 0-2 for typing dots

    // Panel areas for mouse hit-testing (updated during render)
    pub sidebar_area: Option<Rect>,

    pub user_name: String,
    pub plan: String,

    scheduler: Scheduler,
    analysis_delay: Duration,
}

impl App {
    pub fn new(config: &Config, scheduler: Scheduler) -> Self {
        let analysis_delay = config.analysis_delay();

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: FocusPane::Sidebar,

            nav: Navigation::new(config.start_section()),
            analysis: AnalysisPanel::new(analysis_delay),
            demand: DemandPanel::new(),
            chat: ChatWidget::new(config.chat_reply_delay()),

            notice: None,
            animation_frame: 0,
            sidebar_area: None,

            user_name: config.user_name().to_string(),
            plan: config.plan().to_string(),

            scheduler,
            analysis_delay,
        }
    }

    pub fn active_section(&self) -> Section {
        self.nav.active()
    }

    /// Switch sections. Leaving the analysis section throws its panel away,
    /// aborting any analysis still running.
    pub fn select_section(&mut self, section: Section) {
        let previous = self.nav.select(section);
        if previous == section {
            return;
        }
        if previous == Section::Analysis {
            self.analysis = AnalysisPanel::new(self.analysis_delay);
        }
        if self.input_mode == InputMode::Editing && self.focus == FocusPane::Panel {
            self.input_mode = InputMode::Normal;
        }
        info!(from = previous.id(), to = section.id(), "section changed");
    }

    pub fn submit_analysis(&mut self) -> Trigger {
        let trigger = self.analysis.analyze(&self.scheduler);
        if matches!(trigger, Trigger::Started(_)) {
            self.input_mode = InputMode::Normal;
        }
        trigger
    }

    pub fn send_chat(&mut self) -> Trigger {
        self.chat.submit(&self.scheduler)
    }

    pub fn on_completion(&mut self, completion: Completion) -> Settled {
        match completion.target {
            TimerTarget::ChatReply => self.chat.complete(completion.id),
            TimerTarget::Analysis => self.analysis.complete(completion.id),
        }
    }

    /// Carry out an action chosen in the chat or a placeholder button.
    pub fn dispatch(&mut self, intent: Intent) {
        debug!(?intent, "dispatching intent");
        match intent {
            Intent::AnalyzeFeature | Intent::StartAnalysis => {
                self.select_section(Section::Analysis);
                self.focus_analysis_input();
            }
            Intent::ViewExamples => {
                self.select_section(Section::Analysis);
                self.analysis.subject.set("AI-Powered Search");
                self.focus_analysis_input();
            }
            Intent::ExplainInsights => {
                self.select_section(Section::Dashboard);
                self.focus = FocusPane::Panel;
                self.input_mode = InputMode::Normal;
            }
            other => {
                if let Some(collaborator) = other.collaborator() {
                    info!(?collaborator, "placeholder action, no integration configured");
                    self.show_notice(format!("{} is not connected yet", collaborator.display_name()));
                }
            }
        }
    }

    pub fn show_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            ticks_left: NOTICE_TICKS,
        });
    }

    /// Tick animation frame and expire the notice (called by Tick event)
    pub fn tick(&mut self) {
        if self.chat.is_typing() || self.analysis.is_analyzing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }
    }

    pub fn open_chat(&mut self) {
        if !self.chat.open {
            self.chat.toggle_open();
        }
        self.chat.minimized = false;
        self.focus = FocusPane::Chat;
        self.input_mode = InputMode::Editing;
    }

    pub fn close_chat(&mut self) {
        self.chat.close();
        if self.focus == FocusPane::Chat {
            self.focus = FocusPane::Panel;
            self.input_mode = InputMode::Normal;
        }
    }

    pub fn toggle_chat_minimized(&mut self) {
        if !self.chat.open {
            return;
        }
        self.chat.toggle_minimized();
        if self.chat.minimized && self.focus == FocusPane::Chat {
            self.focus = FocusPane::Panel;
            self.input_mode = InputMode::Normal;
        }
    }

    /// Tab order: Sidebar -> Panel -> Chat (when visible) -> Sidebar
    pub fn cycle_focus(&mut self) {
        let chat_visible = self.chat.open && !self.chat.minimized;
        self.focus = match self.focus {
            FocusPane::Sidebar => FocusPane::Panel,
            FocusPane::Panel if chat_visible => FocusPane::Chat,
            FocusPane::Panel | FocusPane::Chat => FocusPane::Sidebar,
        };
        self.input_mode = if self.focus == FocusPane::Chat {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
    }

    /// Abort everything still pending before the runtime goes away.
    pub fn shutdown(&mut self) {
        self.chat.cancel_pending();
        self.analysis = AnalysisPanel::new(self.analysis_delay);
        info!("shutting down");
    }

    fn focus_analysis_input(&mut self) {
        self.focus = FocusPane::Panel;
        self.input_mode = InputMode::Editing;
    }
}
