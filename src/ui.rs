use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
};
use crate::app::{App, FocusPane, InputMode};
use crate::chat::ChatAuthor;
use crate::data::{
    ActivityStatus, DemandRequest, RequestStatus, DEMAND_REQUESTS, METRICS, RECENT_ACTIVITY,
};
use crate::demand::{self, ImpactTier, ViewMode};
use crate::input::LineInput;
use crate::nav::{Section, NAVIGATION};

const SIDEBAR_WIDTH: u16 = 28;
const CHAT_WIDTH: u16 = 52;
const CHAT_HEIGHT: u16 = 24;

fn status_color(status: RequestStatus) -> Color {
    match status {
        RequestStatus::HighPriority => Color::Red,
        RequestStatus::InProgress => Color::Yellow,
        RequestStatus::Research => Color::Cyan,
        RequestStatus::Backlog => Color::DarkGray,
    }
}

fn impact_color(impact: u8) -> Color {
    match ImpactTier::from_impact(impact) {
        ImpactTier::Critical => Color::Red,
        ImpactTier::Elevated => Color::Yellow,
        ImpactTier::Normal => Color::Green,
    }
}

fn panel_block(title: &str, focused: bool) -> Block<'static> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title))
}

/// Horizontal bar for a 0-100 score
fn score_bar(score: u8, width: usize) -> String {
    let filled = (score as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled.min(width)), "░".repeat(width - filled.min(width)))
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [sidebar_area, main_area] = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Min(0),
    ])
    .areas(body_area);

    render_sidebar(app, frame, sidebar_area);
    render_main(app, frame, main_area);
    render_footer(app, frame, footer_area);

    if app.chat.open {
        render_chat(app, frame, body_area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" ◆ OneLens ", Style::default().fg(Color::Cyan).bold()),
        Span::styled("│ Product Intelligence Platform", Style::default().fg(Color::Gray)),
    ]);
    let user = Line::from(vec![
        Span::styled(format!("● {} ", app.user_name), Style::default().fg(Color::White)),
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let user_width = user.width() as u16;
    let [title_area, user_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(user_width),
    ])
    .areas(area);

    let style = Style::default().bg(Color::DarkGray);
    frame.render_widget(Paragraph::new(title).style(style), title_area);
    frame.render_widget(Paragraph::new(user).style(style), user_area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.focus {
        FocusPane::Chat => " CHAT ",
        FocusPane::Sidebar => " NAV ",
        FocusPane::Panel => match app.active_section() {
            Section::Dashboard => " DASHBOARD ",
            Section::Analysis => " ANALYSIS ",
            Section::Demand => " DEMAND ",
            Section::Alerts => " ALERTS ",
        },
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);
    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(format!(" {} ", key), key_style),
            Span::styled(format!(" {} ", label), label_style),
        ]
    };

    let mut hints: Vec<Span> = Vec::new();
    match (app.focus, app.input_mode) {
        (FocusPane::Chat, _) => {
            hints.extend(hint("Enter", "send"));
            if !app.chat.latest_actions().is_empty() {
                hints.extend(hint("Tab", "action"));
            }
            hints.extend(hint("PgUp/PgDn", "scroll"));
            hints.extend(hint("Esc", "leave chat"));
        }
        (_, InputMode::Editing) => {
            hints.extend(hint("Enter", "analyze"));
            hints.extend(hint("Esc", "stop typing"));
        }
        (FocusPane::Sidebar, InputMode::Normal) => {
            hints.extend(hint("j/k", "nav"));
            hints.extend(hint("Enter", "open"));
        }
        (FocusPane::Panel, InputMode::Normal) => match app.active_section() {
            Section::Analysis => {
                hints.extend(hint("i", "edit"));
                hints.extend(hint("Enter", "analyze"));
                hints.extend(hint("f", "filters"));
                if app.analysis.result().is_some() {
                    hints.extend(hint("e", "export"));
                }
            }
            Section::Demand => {
                hints.extend(hint("v", "view"));
                hints.extend(hint("j/k", "nav"));
                if app.demand.view_mode == ViewMode::Kanban {
                    hints.extend(hint("h/l", "column"));
                }
                hints.extend(hint("Enter", "details"));
                hints.extend(hint("f", "filter"));
                hints.extend(hint("s", "sort"));
                hints.extend(hint("C", "connect"));
            }
            Section::Dashboard | Section::Alerts => {}
        },
    }

    if app.focus != FocusPane::Chat && app.input_mode == InputMode::Normal {
        hints.extend(hint("1-4", "section"));
        hints.extend(hint("Tab", "focus"));
        if app.chat.open {
            hints.extend(hint("a", "chat"));
            hints.extend(hint("m", if app.chat.minimized { "restore" } else { "minimize" }));
            hints.extend(hint("x", "close"));
        } else {
            hints.extend(hint("a", "assistant"));
        }
        hints.extend(hint("q", "quit"));
    }

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let notice_line = app.notice.as_ref().map(|notice| {
        Line::from(Span::styled(
            format!(" {} ", notice.text),
            Style::default().bg(Color::Magenta).fg(Color::White),
        ))
    });
    let notice_width = notice_line.as_ref().map_or(0, |line| line.width() as u16);
    let [hints_area, notice_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(notice_width),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(footer_content).style(Style::default().bg(Color::Black)),
        hints_area,
    );
    if let Some(line) = notice_line {
        frame.render_widget(Paragraph::new(line), notice_area);
    }
}

fn render_sidebar(app: &mut App, frame: &mut Frame, area: Rect) {
    let [logo_area, nav_area, user_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(4),
    ])
    .areas(area);

    // Store for mouse hit-testing
    app.sidebar_area = Some(nav_area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(" ▮▮ ", Style::default().fg(Color::Cyan)),
        Span::styled("OneLens", Style::default().fg(Color::White).bold()),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(logo, logo_area);

    let active = app.active_section();
    let items: Vec<ListItem> = NAVIGATION
        .iter()
        .map(|entry| {
            let mut spans = vec![Span::raw(format!(" {} {}", entry.icon, entry.label))];
            if let Some(badge) = entry.badge {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(
                    format!(" {} ", badge),
                    Style::default().bg(Color::Cyan).fg(Color::Black),
                ));
            }
            let style = if entry.section == active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(panel_block("Navigate", app.focus == FocusPane::Sidebar))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol(">");
    frame.render_stateful_widget(list, nav_area, &mut app.nav.list_state);

    let user = Paragraph::new(vec![
        Line::from(Span::styled(format!(" ● {}", app.user_name), Style::default().bold())),
        Line::from(Span::styled(format!("   {}", app.plan), Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(user, user_area);
}

fn render_main(app: &mut App, frame: &mut Frame, area: Rect) {
    let section = app.active_section();
    let [title_area, content_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(section.title(), Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(section.subtitle(), Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(title, title_area);

    match section {
        Section::Dashboard => render_dashboard(app, frame, content_area),
        Section::Analysis => render_analysis(app, frame, content_area),
        Section::Demand => render_demand(app, frame, content_area),
        Section::Alerts => render_alerts(frame, content_area),
    }
}

fn render_dashboard(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Panel;
    let [cards_area, activity_area] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(0),
    ])
    .areas(area);

    let card_areas = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(cards_area);
    for (metric, card_area) in METRICS.iter().zip(card_areas.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(metric.value, Style::default().fg(Color::Cyan).bold())),
            Line::from(Span::styled(metric.detail, Style::default().fg(Color::Gray))),
        ])
        .block(panel_block(metric.label, false));
        frame.render_widget(card, *card_area);
    }

    let items: Vec<ListItem> = RECENT_ACTIVITY
        .iter()
        .map(|item| {
            let (status, color) = match item.status {
                ActivityStatus::Completed => ("Completed", Color::Green),
                ActivityStatus::InProgress => ("In progress", Color::Yellow),
            };
            let mut spans = vec![
                Span::styled(format!(" {} ", item.subject), Style::default().bold()),
                Span::styled(format!("[{}]", status), Style::default().fg(color)),
            ];
            if let Some(score) = item.score {
                spans.push(Span::raw(format!("  {}/100", score)));
            }
            spans.push(Span::styled(format!("  {}", item.when), Style::default().fg(Color::Gray)));
            ListItem::new(Line::from(spans))
        })
        .collect();

    frame.render_widget(
        List::new(items).block(panel_block("Recent Activity", focused)),
        activity_area,
    );
}

fn render_input(input: &LineInput, placeholder: &str, editing: bool, frame: &mut Frame, area: Rect, block: Block) {
    let inner = block.inner(area);
    let text = if input.value().is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(input.value().to_string())
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    if editing && inner.width > 0 {
        let offset = (input.cursor() as u16).min(inner.width.saturating_sub(1));
        frame.set_cursor_position((inner.x + offset, inner.y));
    }
}

fn render_analysis(app: &App, frame: &mut Frame, area: Rect) {
    let panel = &app.analysis;
    let focused = app.focus == FocusPane::Panel;
    let editing = focused && app.input_mode == InputMode::Editing;

    let banner_height = if panel.is_analyzing() { 4 } else { 0 };
    let [engine_area, banner_area, results_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(banner_height),
        Constraint::Min(0),
    ])
    .areas(area);

    let button = if panel.is_analyzing() {
        Span::styled(" Analyzing... ", Style::default().fg(Color::DarkGray))
    } else if panel.can_analyze() {
        Span::styled(" ⏎ Analyze ", Style::default().bg(Color::Cyan).fg(Color::Black).bold())
    } else {
        Span::styled(" ⏎ Analyze ", Style::default().fg(Color::DarkGray))
    };
    let block = panel_block("⌕ Feature Analysis Engine", focused)
        .title(Line::from(vec![Span::raw(" [f] Filters "), button, Span::raw(" ")]).alignment(Alignment::Right));
    render_input(
        &panel.subject,
        "Enter feature name (e.g., AI-Powered Search, Mobile SDK)",
        editing,
        frame,
        engine_area,
        block,
    );

    if let Some(subject) = panel.analyzing_subject() {
        let dots = ".".repeat(app.animation_frame as usize + 1);
        let banner = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("● AI analyzing \"{}\" across competitive landscape{}", subject, dots),
                Style::default().fg(Color::Cyan).bold(),
            )),
            Line::from(Span::styled(
                "This may take a few moments while we gather market intelligence.",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));
        frame.render_widget(banner, banner_area);
    }

    let Some(result) = panel.result() else {
        return;
    };

    let insights_height = result.insights.len() as u16 + 2;
    let [overview_area, insights_area, benchmark_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(insights_height),
        Constraint::Min(0),
    ])
    .areas(results_area);

    let overview = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(format!("{}/100", result.overall_score), Style::default().fg(Color::Cyan).bold()),
            Span::raw("   "),
            Span::styled(result.position, Style::default().bold()),
            Span::raw("   "),
            Span::styled(format!("↗ {}", result.trend), Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::styled(
            "Overall Score   Market Position   Trend",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(
        panel_block(&format!("Analysis Results: {}", result.subject_name), false)
            .title(Line::from(" [e] Export PDF ").alignment(Alignment::Right)),
    );
    frame.render_widget(overview, overview_area);

    let insights: Vec<ListItem> = result
        .insights
        .iter()
        .map(|insight| ListItem::new(Line::from(vec![
            Span::styled(" ◎ ", Style::default().fg(Color::Cyan)),
            Span::raw(*insight),
        ])))
        .collect();
    frame.render_widget(List::new(insights).block(panel_block("Key Insights", false)), insights_area);

    let competitors: Vec<ListItem> = result
        .competitors
        .iter()
        .enumerate()
        .map(|(i, competitor)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().bg(Color::Cyan).fg(Color::Black)),
                Span::styled(format!(" {:<14}", competitor.name), Style::default().bold()),
                Span::styled(format!("{:<20}", competitor.position), Style::default().fg(Color::Gray)),
                Span::styled(format!("{:>3}/100 ", competitor.score), Style::default().bold()),
                Span::styled(score_bar(competitor.score, 20), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(competitors).block(panel_block("Competitive Benchmark", false)),
        benchmark_area,
    );
}

fn render_demand(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Panel;
    let [stats_area, tabs_area, body_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let stats = demand::quick_stats(&DEMAND_REQUESTS);
    let stat_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(stats_area);
    for (stat, stat_area) in stats.iter().zip(stat_areas.iter()) {
        let card = Paragraph::new(Line::from(Span::styled(
            stat.value.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )))
        .block(panel_block(stat.label, false));
        frame.render_widget(card, *stat_area);
    }

    let selected_tab = match app.demand.view_mode {
        ViewMode::Table => 0,
        ViewMode::Kanban => 1,
    };
    let tabs = Tabs::new(vec![ViewMode::Table.label(), ViewMode::Kanban.label()])
        .select(selected_tab)
        .highlight_style(Style::default().fg(Color::Cyan).bold().underlined())
        .divider("│");
    frame.render_widget(tabs, tabs_area);

    let (list_area, details_area) = if app.demand.show_details {
        let [list_area, details_area] = Layout::horizontal([
            Constraint::Percentage(60),
            Constraint::Percentage(40),
        ])
        .areas(body_area);
        (list_area, Some(details_area))
    } else {
        (body_area, None)
    };

    match app.demand.view_mode {
        ViewMode::Table => render_demand_table(app, frame, list_area, focused),
        ViewMode::Kanban => render_kanban(app, frame, list_area, focused),
    }

    if let (Some(details_area), Some(request)) = (details_area, app.demand.selected(&DEMAND_REQUESTS)) {
        render_request_details(request, frame, details_area);
    }
}

fn status_badge(status: RequestStatus) -> Span<'static> {
    Span::styled(
        format!(" {} ", status.label()),
        Style::default().bg(status_color(status)).fg(Color::Black),
    )
}

fn render_demand_table(app: &mut App, frame: &mut Frame, area: Rect, focused: bool) {
    let items: Vec<ListItem> = DEMAND_REQUESTS
        .iter()
        .map(|request| {
            let label = Style::default().fg(Color::Gray);
            let lines = vec![
                Line::from(vec![
                    Span::styled(format!("{} ", request.title), Style::default().bold()),
                    status_badge(request.status),
                    Span::styled(format!(" {} ", request.segment), Style::default().fg(Color::Gray).italic()),
                ]),
                Line::from(Span::styled(request.description, label)),
                Line::from(vec![
                    Span::styled("Impact: ", label),
                    Span::styled(format!("{}/100", request.impact), Style::default().fg(impact_color(request.impact)).bold()),
                    Span::styled("  Votes: ", label),
                    Span::raw(request.votes.to_string()),
                    Span::styled("  Revenue: ", label),
                    Span::styled(demand::format_currency(request.revenue), Style::default().fg(Color::Green)),
                    Span::styled("  Effort: ", label),
                    Span::raw(request.effort),
                    Span::styled(format!("  · {}", request.last_updated), label),
                ]),
                Line::from(Span::styled(
                    format!("“{}”", request.quotes.first().copied().unwrap_or_default()),
                    Style::default().italic(),
                )),
                Line::default(),
            ];
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(panel_block("Feature Requests", focused))
        .highlight_style(Style::default().bg(Color::Rgb(30, 40, 60)))
        .highlight_symbol("▌");
    frame.render_stateful_widget(list, area, &mut app.demand.table_state);
}

fn render_kanban(app: &App, frame: &mut Frame, area: Rect, focused: bool) {
    let selected_id = app.demand.selected(&DEMAND_REQUESTS).map(|r| r.id);
    let columns = demand::group_by_status(&DEMAND_REQUESTS);
    let column_areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    for ((status, requests), column_area) in columns.iter().zip(column_areas.iter()) {
        let mut lines: Vec<Line> = Vec::new();
        for request in requests {
            let highlight = if focused && Some(request.id) == selected_id {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(request.title, Style::default().bold().patch(highlight))));
            lines.push(Line::from(vec![
                Span::styled(format!("{}/100", request.impact), Style::default().fg(impact_color(request.impact))),
                Span::styled(format!("  {} votes", request.votes), Style::default().fg(Color::Gray)),
            ]));
            lines.push(Line::from(Span::styled(format!("[{}]", request.segment), Style::default().italic())));
            lines.push(Line::default());
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(status_color(*status)))
            .title(format!(" {} ({}) ", status.label(), requests.len()));
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            *column_area,
        );
    }
}

fn render_request_details(request: &DemandRequest, frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(request.title, Style::default().bold())),
        Line::from(vec![status_badge(request.status), Span::raw(format!(" {}", request.segment))]),
        Line::default(),
        Line::from(request.description),
        Line::default(),
        Line::from(format!("Revenue impact: {}", demand::format_currency(request.revenue))),
        Line::from(format!("Votes: {}   Effort: {}", request.votes, request.effort)),
        Line::from(format!("Updated {}", request.last_updated)),
        Line::default(),
        Line::from(Span::styled("User Feedback:", Style::default().fg(Color::Gray))),
    ];
    for quote in request.quotes {
        lines.push(Line::from(Span::styled(format!("“{}”", quote), Style::default().italic())));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel_block("Details", false))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_alerts(frame: &mut Frame, area: Rect) {
    let [_, message_area, _] = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Alert management interface coming soon...",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        message_area,
    );
}

fn chat_rect(body: Rect, minimized: bool) -> Rect {
    let width = CHAT_WIDTH.min(body.width);
    let height = (if minimized { 3 } else { CHAT_HEIGHT }).min(body.height);
    Rect {
        x: body.x + body.width.saturating_sub(width),
        y: body.y + body.height.saturating_sub(height),
        width,
        height,
    }
}

fn render_chat(app: &mut App, frame: &mut Frame, body: Rect) {
    let area = chat_rect(body, app.chat.minimized);
    frame.render_widget(Clear, area);

    let focused = app.focus == FocusPane::Chat;
    let block = panel_block("✦ OneLens AI", focused)
        .title(Line::from(Span::styled(" ● Online ", Style::default().fg(Color::Green))).alignment(Alignment::Right));

    if app.chat.minimized {
        frame.render_widget(
            Paragraph::new(Span::styled("m to restore", Style::default().fg(Color::Gray))).block(block),
            area,
        );
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [log_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(inner);

    let mut lines: Vec<Line> = Vec::new();
    let newest_assistant = app
        .chat
        .messages()
        .iter()
        .rposition(|m| m.author == ChatAuthor::Assistant);

    for (idx, msg) in app.chat.messages().iter().enumerate() {
        let (who, color, alignment) = match msg.author {
            ChatAuthor::User => ("You", Color::Cyan, Alignment::Right),
            ChatAuthor::Assistant => ("OneLens AI", Color::Magenta, Alignment::Left),
        };
        lines.push(
            Line::from(vec![
                Span::styled(who, Style::default().fg(color).bold()),
                Span::styled(format!(" · {}", msg.timestamp.format("%H:%M")), Style::default().fg(Color::DarkGray)),
            ])
            .alignment(alignment),
        );
        lines.push(Line::from(msg.text.clone()).alignment(alignment));

        if Some(idx) == newest_assistant && !msg.actions.is_empty() {
            let mut spans = Vec::new();
            for (i, action) in msg.actions.iter().enumerate() {
                let style = if app.chat.selected_action() == Some(i) {
                    Style::default().bg(Color::Magenta).fg(Color::White)
                } else {
                    Style::default().fg(Color::Magenta)
                };
                spans.push(Span::styled(format!("[{}]", action.label), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::default());
    }

    if app.chat.is_typing() {
        let dots: String = (0..3)
            .map(|i| if i == app.animation_frame as usize { '●' } else { '○' })
            .collect();
        lines.push(Line::from(Span::styled(dots, Style::default().fg(Color::Gray))));
    }

    // Measure with the same wrapping the log is drawn with
    let log = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total_height = u16::try_from(log.line_count(log_area.width)).unwrap_or(u16::MAX);
    let max_scroll = total_height.saturating_sub(log_area.height);
    app.chat.scroll = app.chat.scroll.min(max_scroll);

    frame.render_widget(log.scroll((app.chat.scroll, 0)), log_area);

    let send_style = if app.chat.can_send() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(Span::styled(" ➤ ", send_style)).alignment(Alignment::Right));
    render_input(
        &app.chat.input,
        "Ask me anything about OneLens...",
        focused,
        frame,
        input_area,
        input_block,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::timer::{Completion, Scheduler, TimerTarget, Trigger};
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(&Config::new(), Scheduler::new(tx))
    }

    fn draw(app: &mut App) -> String {
        draw_sized(app, 140, 45)
    }

    fn draw_sized(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut out = String::new();
        for row in buffer.content().chunks(width) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_score_bar_width() {
        assert_eq!(score_bar(100, 10).chars().count(), 10);
        assert_eq!(score_bar(0, 10), "░".repeat(10));
        assert_eq!(score_bar(50, 10), format!("{}{}", "█".repeat(5), "░".repeat(5)));
    }

    #[tokio::test]
    async fn test_dashboard_renders_metrics() {
        let mut app = app();
        let screen = draw(&mut app);
        assert!(screen.contains("Active Analyses"));
        assert!(screen.contains("94%"));
        assert!(screen.contains("AI-Powered Search"));
        assert!(screen.contains("Alerts"));
        assert!(app.sidebar_area.is_some());
    }

    #[tokio::test]
    async fn test_analysis_results_render() {
        let mut app = app();
        app.select_section(Section::Analysis);
        app.analysis.subject.set("AI-Powered Search");
        let Trigger::Started(id) = app.submit_analysis() else {
            panic!("analysis did not start");
        };
        let busy = draw(&mut app);
        assert!(busy.contains("Analyzing..."));
        assert!(busy.contains("AI analyzing \"AI-Powered Search\""));

        app.on_completion(Completion { target: TimerTarget::Analysis, id });
        let done = draw(&mut app);
        assert!(done.contains("92/100"));
        assert!(done.contains("Market Leader"));
        assert!(done.contains("SearchCorp"));
        assert!(done.contains("QuickSearch"));
    }

    #[tokio::test]
    async fn test_demand_views_render() {
        let mut app = app();
        app.select_section(Section::Demand);
        let table = draw(&mut app);
        assert!(table.contains("$250,000"));
        assert!(table.contains("$555K"));
        assert!(table.contains("Advanced Search Filters"));

        app.demand.toggle_view();
        let board = draw(&mut app);
        assert!(board.contains("In Progress (1)"));
        assert!(board.contains("Backlog (1)"));
    }

    #[tokio::test]
    async fn test_chat_overlay_renders() {
        let mut app = app();
        app.open_chat();
        let screen = draw(&mut app);
        assert!(screen.contains("OneLens AI"));
        assert!(screen.contains("[Analyze Feature]"));

        app.toggle_chat_minimized();
        let minimized = draw(&mut app);
        assert!(minimized.contains("m to restore"));
        assert!(!minimized.contains("[Analyze Feature]"));
    }

    #[tokio::test]
    async fn test_chat_log_follows_newest_reply() {
        let mut app = app();
        app.open_chat();
        let questions = [
            "feature analysis please",
            "show me the dashboard metrics",
            "any alerts today?",
            "monitoring setup",
            "hello there",
            "what can you do",
            "battle card for our top competitor",
        ];
        for question in questions {
            app.chat.input.set(question);
            let Trigger::Started(id) = app.send_chat() else {
                panic!("message not sent");
            };
            draw(&mut app);
            app.on_completion(Completion { target: TimerTarget::ChatReply, id });
            draw(&mut app);
        }

        let screen = draw(&mut app);
        assert!(screen.contains("[Create Battle Card]"));
        assert!(screen.contains("[See Templates]"));

        // the typing indicator sits below everything else
        app.chat.input.set("thanks");
        assert!(matches!(app.send_chat(), Trigger::Started(_)));
        assert!(draw(&mut app).contains("●○○"));
    }

    #[tokio::test]
    async fn test_chat_log_taller_than_u16_rows() {
        let mut app = app();
        app.open_chat();
        // each exchange wraps to roughly ten rows
        for _ in 0..7000 {
            app.chat.input.set("what can you do");
            let Trigger::Started(id) = app.send_chat() else {
                panic!("message not sent");
            };
            app.on_completion(Completion { target: TimerTarget::ChatReply, id });
        }
        draw(&mut app);
        assert!(app.chat.scroll > 60_000);
    }

    #[test]
    fn test_chat_rect_fits_short_body() {
        let body = Rect::new(0, 1, 80, 1);
        assert_eq!(chat_rect(body, true), Rect::new(28, 1, 52, 1));
        assert_eq!(chat_rect(body, false), Rect::new(28, 1, 52, 1));

        let narrow = Rect::new(0, 1, 20, 0);
        assert_eq!(chat_rect(narrow, true), Rect::new(0, 1, 20, 0));
    }

    #[tokio::test]
    async fn test_tiny_terminal_renders() {
        let mut app = app();
        app.open_chat();
        app.toggle_chat_minimized();
        draw_sized(&mut app, 80, 3);

        app.toggle_chat_minimized();
        draw_sized(&mut app, 80, 3);
        draw_sized(&mut app, 30, 2);
    }

    #[tokio::test]
    async fn test_alerts_placeholder() {
        let mut app = app();
        app.select_section(Section::Alerts);
        assert!(draw(&mut app).contains("coming soon"));
    }
}
