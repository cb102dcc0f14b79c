//! Trio TUI - actor-based store demo
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - owns the store, dispatches actions
//! - Effect Layer (Tokio) - timers and HTTP lookups

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use trio::app::AppActor;
use trio::config::Config;
use trio::constants::{APP_NAME, QUICK_LINKS};
use trio::messages::ui_events::{key_to_ui_event, InputMode};
use trio::messages::{Action, EffectCommand, RenderState, UiEvent};
use trio::network::EffectActor;
use trio::router::Route;
use trio::ui::{action_color, highlight_json, render_tabs, tab_index};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(api_base = %config.api_base, rotation = config.rotation.enabled, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (effect_tx, effect_rx) = mpsc::unbounded_channel::<EffectCommand>();
    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn effect actor
    let effect_actor = EffectActor::from_config(&config, action_tx);
    tokio::spawn(effect_actor.run(effect_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, effect_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, action_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    &current_state.route,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    let content_area = if state.show_log {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[1]);
        draw_action_log(f, state, columns[1]);
        columns[0]
    } else {
        main_chunks[1]
    };

    match &state.route {
        Route::Ping => draw_ping_view(f, state, content_area),
        Route::Counter => draw_counter_view(f, state, content_area),
        Route::User(_) => draw_user_view(f, state, content_area),
        Route::NotFound(_) => draw_not_found(f, &state.route, content_area),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(area);

    let tabs = render_tabs(&[" 1:Ping ", " 2:Counter ", " 3:User "], tab_index(&state.route));
    f.render_widget(tabs, chunks[0]);

    let nav = Line::from(vec![
        Span::styled(
            " [ ",
            if state.can_go_back { Style::default().fg(Color::White) } else { Style::default().fg(Color::DarkGray) },
        ),
        Span::styled(
            "] ",
            if state.can_go_forward { Style::default().fg(Color::White) } else { Style::default().fg(Color::DarkGray) },
        ),
        Span::styled(format!("#{}", state.location), Style::default().fg(Color::Cyan)),
    ]);
    f.render_widget(Paragraph::new(nav).right_aligned(), chunks[1]);
}

fn view_title(route: &Route) -> String {
    format!(" {} ", route.title())
}

fn draw_ping_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let (text, color) = if state.is_pinging {
        ("This is pinging", Color::Green)
    } else {
        ("This is not pinging", Color::DarkGray)
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(text, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(Span::styled("[p] ping", Style::default().fg(Color::Yellow))),
    ];

    let block = Block::default().borders(Borders::ALL).title(view_title(&state.route));
    f.render_widget(Paragraph::new(lines).block(block).centered(), area);
}

fn draw_counter_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let parity = if state.counter % 2 == 0 { "even" } else { "odd" };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(state.counter.to_string(), Style::default().fg(Color::Cyan).bold())),
        Line::from(Span::styled(parity, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(vec![
            Span::styled("[+] Increment", Style::default().fg(Color::Yellow)),
            Span::raw("   "),
            Span::styled("[o] IncrementIfOdd", Style::default().fg(Color::Yellow)),
        ]),
    ];

    let block = Block::default().borders(Borders::ALL).title(view_title(&state.route));
    f.render_widget(Paragraph::new(lines).block(block).centered(), area);
}

fn draw_user_view(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // User record
            Constraint::Length(3), // Lookup form
            Constraint::Length(1), // Error
            Constraint::Length(1), // Links
        ])
        .split(area);

    // User record
    let title = match (&state.lookup_username, state.lookup_pending) {
        (Some(name), true) => format!(" {} [...] ", name),
        (Some(name), false) => format!(" {} ", name),
        (None, _) => view_title(&state.route),
    };
    let body = match &state.current_user {
        Some(json) => highlight_json(json),
        None => vec![Line::from(Span::styled("{}", Style::default().fg(Color::DarkGray)))],
    };
    let record = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    f.render_widget(record, chunks[0]);

    // Lookup form
    let editing = state.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let form = Paragraph::new(state.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Username (e:edit s:submit) "),
    );
    f.render_widget(form, chunks[1]);

    if editing {
        let max_x = chunks[1].x + chunks[1].width.saturating_sub(2);
        let cursor_x = (chunks[1].x + state.input[..state.cursor_position].chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, chunks[1].y + 1));
    }

    // Error
    if let Some(error) = &state.lookup_error {
        let error = Paragraph::new(Span::styled(format!(" {}", error), Style::default().fg(Color::Red)));
        f.render_widget(error, chunks[2]);
    }

    // Links
    let mut links = vec![Span::styled(" Links: ", Style::default().fg(Color::DarkGray))];
    for (key, name) in ['a', 'b'].iter().zip(QUICK_LINKS.iter()) {
        links.push(Span::styled(format!("[{}] {}  ", key, name), Style::default().fg(Color::Cyan)));
    }
    f.render_widget(Paragraph::new(Line::from(links)), chunks[3]);
}

fn draw_not_found(f: &mut Frame, route: &Route, area: Rect) {
    let text = format!("No view matches {}\n\nPress 1, 2 or 3 to pick one.", route.path());
    let block = Block::default().borders(Borders::ALL).title(view_title(route));
    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_action_log(f: &mut Frame, state: &RenderState, area: Rect) {
    let items: Vec<ListItem> = state
        .journal
        .iter()
        .map(|line| {
            let marker = if line.current { "> " } else { "  " };
            let style = if line.current {
                Style::default().fg(action_color(&line.description)).bold()
            } else {
                Style::default().fg(action_color(&line.description))
            };
            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{} ", line.at), Style::default().fg(Color::DarkGray)),
                Span::styled(line.description.clone(), style),
            ]))
        })
        .collect();

    let title = if state.time_travelling {
        " Actions [time travel] "
    } else {
        " Actions "
    };
    let border_style = if state.time_travelling {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    let mut list_state = ListState::default();
    list_state.select(state.journal.iter().position(|l| l.current));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.input_mode == InputMode::Editing {
        " ESC:stop editing | Enter:submit | arrows:move "
    } else if state.lookup_pending && matches!(state.route, Route::User(_)) {
        " Loading... "
    } else {
        " 1-3:view | [/]:back/fwd | ^Z/^Y:undo/redo | l:log | ?:help | q:quit "
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 TRIO TUI - Keyboard Shortcuts

 NAVIGATION
   1 / 2 / 3          Ping / Counter / User view
   [ / ]              Back / forward in history

 PING
   p / Enter          Ping (pongs after a delay)

 COUNTER
   + / i              Increment
   o                  Increment if odd

 USER
   e                  Edit username
   s / Enter          Look up user
   a / b              Open quick link

 ACTIONS
   l                  Toggle action log
   Ctrl+Z / Ctrl+Y    Step back / forward through actions

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
