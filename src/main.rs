use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use onelens::{App, Config, Scheduler, Section, handler, logging, tui, ui};

#[derive(Parser)]
#[command(name = "onelens")]
#[command(version, about = "Product intelligence dashboard for the terminal")]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long, env = "ONELENS_CONFIG")]
    config: Option<PathBuf>,

    /// Section to open: dashboard, analysis, demand or alerts
    #[arg(short, long)]
    section: Option<String>,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Write a config file with all defaults and exit
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::get_config_path()?,
    };

    if cli.write_config {
        Config::new().save_to(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let (mut config, config_error) = Config::load_or_default(&config_path);

    let log_dir = match cli.log_dir {
        Some(dir) => dir,
        None => logging::default_log_dir()?,
    };
    let _log_guard = logging::init(&log_dir, config.log_level())
        .with_context(|| format!("Could not set up logging in {}", log_dir.display()))?;

    if let Some(e) = config_error {
        warn!(path = %config_path.display(), error = %e, "ignoring unreadable config, using defaults");
    }

    if let Some(section) = cli.section {
        match Section::from_id(&section) {
            Some(s) => config.start_section = Some(s.id().to_string()),
            None => warn!(section = %section, "unknown section, opening dashboard"),
        }
    }

    info!(version = env!("CARGO_PKG_VERSION"), "starting");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &config).await;
    tui::restore()?;

    result
}

async fn run(terminal: &mut tui::Tui, config: &Config) -> Result<()> {
    let mut events = tui::EventHandler::new(config.tick_rate());
    let mut app = App::new(config, Scheduler::new(events.sender()));

    loop {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(&mut app, event)?,
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    app.shutdown();
    Ok(())
}
