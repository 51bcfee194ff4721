pub mod analysis;
pub mod app;
pub mod chat;
pub mod config;
pub mod data;
pub mod demand;
pub mod handler;
pub mod input;
pub mod intent;
pub mod logging;
pub mod nav;
pub mod responses;
pub mod timer;
pub mod tui;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::Config;
pub use intent::Intent;
pub use nav::Section;
pub use timer::{Completion, RequestId, Scheduler};
