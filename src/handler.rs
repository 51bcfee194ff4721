use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::app::{App, FocusPane, InputMode};
use crate::data::DEMAND_REQUESTS;
use crate::input::LineInput;
use crate::intent::Intent;
use crate::nav::{Section, NAVIGATION};
use crate::timer::Trigger;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(),
        AppEvent::Completed(completion) => {
            app.on_completion(completion);
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match (app.focus, app.input_mode) {
        (FocusPane::Chat, _) => handle_chat(app, key),
        (_, InputMode::Editing) => handle_analysis_editing(app, key),
        (_, InputMode::Normal) => handle_normal_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Direct section jumps
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            if let Some(entry) = NAVIGATION.get(idx) {
                app.select_section(entry.section);
            }
        }

        KeyCode::Tab => app.cycle_focus(),

        // Chat widget
        KeyCode::Char('a') => app.open_chat(),
        KeyCode::Char('m') => app.toggle_chat_minimized(),
        KeyCode::Char('x') => app.close_chat(),

        _ => match app.focus {
            FocusPane::Sidebar => handle_sidebar(app, key),
            FocusPane::Panel => handle_panel(app, key),
            FocusPane::Chat => {}
        },
    }
}

fn handle_sidebar(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.nav.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav.nav_up(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            let section = app.nav.highlighted();
            app.select_section(section);
            app.focus = FocusPane::Panel;
        }
        _ => {}
    }
}

fn handle_panel(app: &mut App, key: KeyEvent) {
    match app.active_section() {
        Section::Analysis => handle_analysis_normal(app, key),
        Section::Demand => handle_demand(app, key),
        Section::Dashboard | Section::Alerts => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left) {
                app.focus = FocusPane::Sidebar;
            }
        }
    }
}

fn handle_analysis_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('/') => app.input_mode = InputMode::Editing,
        KeyCode::Enter => run_analysis(app),
        KeyCode::Char('f') => app.dispatch(Intent::AnalysisFilters),
        KeyCode::Char('e') if app.analysis.result().is_some() => app.dispatch(Intent::ExportReport),
        KeyCode::Esc | KeyCode::Left => app.focus = FocusPane::Sidebar,
        _ => {}
    }
}

fn handle_analysis_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => run_analysis(app),
        _ => edit_line(&mut app.analysis.subject, key),
    }
}

fn run_analysis(app: &mut App) {
    match app.submit_analysis() {
        Trigger::Started(_) => {}
        Trigger::EmptyInput => app.show_notice("Enter a feature name to analyze"),
        Trigger::Busy => debug!("analysis already running"),
    }
}

fn handle_demand(app: &mut App, key: KeyEvent) {
    let requests = &DEMAND_REQUESTS[..];
    match key.code {
        KeyCode::Char('v') => app.demand.toggle_view(),
        KeyCode::Char('j') | KeyCode::Down => app.demand.move_down(requests),
        KeyCode::Char('k') | KeyCode::Up => app.demand.move_up(requests),
        KeyCode::Char('l') | KeyCode::Right => app.demand.move_column(requests, 1),
        KeyCode::Char('h') | KeyCode::Left => app.demand.move_column(requests, -1),
        KeyCode::Enter => app.demand.toggle_details(),
        KeyCode::Char('f') => app.dispatch(Intent::FilterRequests),
        KeyCode::Char('s') => app.dispatch(Intent::SortRequests),
        KeyCode::Char('C') => app.dispatch(Intent::ConnectTools),
        KeyCode::Esc => {
            if app.demand.show_details {
                app.demand.toggle_details();
            } else {
                app.focus = FocusPane::Sidebar;
            }
        }
        _ => {}
    }
}

fn handle_chat(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.focus = FocusPane::Panel;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => {
            if app.chat.input.is_blank() {
                if let Some(intent) = app.chat.selected_intent() {
                    app.dispatch(intent);
                }
                return;
            }
            if app.send_chat() == Trigger::Busy {
                debug!("reply pending, message held");
            }
        }
        KeyCode::Tab => app.chat.cycle_action(),
        KeyCode::PageUp => app.chat.scroll_up(),
        KeyCode::PageDown => app.chat.scroll_down(),
        _ => edit_line(&mut app.chat.input, key),
    }
}

fn edit_line(input: &mut LineInput, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => input.insert(c),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(area) = app.sidebar_area else {
        return;
    };
    let inside = mouse.column >= area.x
        && mouse.column < area.x + area.width
        && mouse.row > area.y
        && mouse.row < area.y + area.height.saturating_sub(1);
    if !inside {
        return;
    }

    // One row per entry, below the top border
    let row = (mouse.row - area.y - 1) as usize;
    if let Some(entry) = NAVIGATION.get(row) {
        app.select_section(entry.section);
        app.focus = FocusPane::Sidebar;
        app.input_mode = InputMode::Normal;
    }
}
