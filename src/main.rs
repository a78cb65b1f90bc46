use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use round_board::config::Settings;
use round_board::feed;
use round_board::schedule::{Day, ROUNDS_PER_DAY, RoundStatus, TeamRecord};
use round_board::state::{self, AppState, ProviderCommand, apply_delta, source_label};

const COLLAPSED_HEIGHT: u16 = 1;
// header + day titles + column titles + rounds + spacer
const EXPANDED_HEIGHT: u16 = 1 + 1 + 1 + ROUNDS_PER_DAY as u16 + 1;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.state.search_active = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.state.toggle_expanded(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.send_command(ProviderCommand::Refresh, true)
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.send_command(ProviderCommand::FetchTeams, true)
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else if !self.state.search.is_empty() {
                    self.state.clear_search();
                }
            }
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.clear_search(),
            KeyCode::Enter => self.state.search_active = false,
            KeyCode::Backspace => self.state.pop_search_char(),
            KeyCode::Down => self.state.select_next(),
            KeyCode::Up => self.state.select_prev(),
            KeyCode::Char(c) => self.state.push_search_char(c),
            _ => {}
        }
    }

    fn send_command(&mut self, cmd: ProviderCommand, announce: bool) {
        let Some(tx) = &self.cmd_tx else {
            if announce {
                self.state.push_log("[INFO] Score fetch unavailable");
            }
            return;
        };
        if !self.state.begin_refresh() {
            if announce {
                self.state.push_log("[INFO] Refresh already in progress");
            }
            return;
        }
        if tx.send(cmd).is_err() {
            self.state.refresh_inflight = false;
            self.state.push_log("[WARN] Score request failed");
        } else if announce {
            let label = match cmd {
                ProviderCommand::FetchTeams => "Fetch",
                ProviderCommand::Refresh => "Refresh",
            };
            self.state.push_log(format!("[INFO] {label} request sent"));
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let settings = Settings::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    feed::spawn_provider(tx, cmd_rx, settings);

    let mut app = App::new(Some(cmd_tx));
    app.send_command(ProviderCommand::FetchTeams, false);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_search(frame, chunks[1], &app.state);
    render_cards(frame, chunks[2], &app.state);

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(footer_text(&app.state));
    frame.render_widget(footer, chunks[4]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let refreshed = state
        .last_refreshed
        .as_deref()
        .map(|at| format!(" | Last refreshed: {at}"))
        .unwrap_or_default();
    let busy = if state.refresh_inflight { " | Loading..." } else { "" };
    let line1 = format!(
        "GAME SCORE DASHBOARD | {} teams | {}{refreshed}{busy}",
        state.teams.len(),
        source_label(state.source)
    );
    let line2 = "Round status by day: Submitted / Scheduled / Bye".to_string();
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        "Type to filter | Enter Done | Esc Clear | ↑/↓ Move".to_string()
    } else {
        "/ Search | j/k/↑/↓ Move | Enter/Space Expand | r Refresh | f Fetch | ? Help | q Quit"
            .to_string()
    }
}

fn render_search(frame: &mut Frame, area: Rect, state: &AppState) {
    let (text, style) = if state.search.is_empty() && !state.search_active {
        (
            "Search for a team...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else if state.search_active {
        (format!("{}_", state.search), Style::default())
    } else {
        (state.search.clone(), Style::default())
    };
    let border_style = if state.search_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let search = Paragraph::new(text).style(style).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(search, area);
}

fn card_height(state: &AppState, team: &TeamRecord) -> u16 {
    if state.is_expanded(team.id) {
        EXPANDED_HEIGHT
    } else {
        COLLAPSED_HEIGHT
    }
}

fn render_cards(frame: &mut Frame, area: Rect, state: &AppState) {
    let teams = state.filtered_teams();
    if teams.is_empty() {
        let empty = Paragraph::new(format!("No teams found matching \"{}\"", state.search))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }
    if area.height == 0 {
        return;
    }

    let heights: Vec<u16> = teams.iter().map(|t| card_height(state, t)).collect();
    let start = first_visible_card(&heights, state.selected, area.height);

    let mut y = area.y;
    let bottom = area.y + area.height;
    for (idx, team) in teams.iter().enumerate().skip(start) {
        if y >= bottom {
            break;
        }
        let height = heights[idx].min(bottom - y);
        let card_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height,
        };
        render_card(frame, card_area, state, team, idx == state.selected);
        y += height;
    }
}

/// Smallest start index that still keeps the selected card fully on screen.
fn first_visible_card(heights: &[u16], selected: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }
    let selected = selected.min(heights.len() - 1);
    let mut start = selected;
    let mut used = heights[selected];
    while start > 0 && used + heights[start - 1] <= available {
        start -= 1;
        used += heights[start];
    }
    start
}

fn render_card(frame: &mut Frame, area: Rect, state: &AppState, team: &TeamRecord, selected: bool) {
    let expanded = state.is_expanded(team.id);
    let row_style = if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    let marker = if expanded { "▲" } else { "▼" };
    let summary = format!(
        "{marker} {}  (S {} | Sch {} | Bye {})",
        team.name,
        team.count_status(RoundStatus::Submitted),
        team.count_status(RoundStatus::Scheduled),
        team.count_status(RoundStatus::Bye),
    );
    let header_area = Rect { height: 1, ..area };
    frame.render_widget(
        Paragraph::new(summary).style(row_style.add_modifier(Modifier::BOLD)),
        header_area,
    );

    if !expanded || area.height <= 1 {
        return;
    }

    let body = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height - 1,
    };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(body);
    for (col, day) in cols.iter().zip(Day::ALL) {
        render_day_table(frame, *col, team, day);
    }
}

fn render_day_table(frame: &mut Frame, area: Rect, team: &TeamRecord, day: Day) {
    let width = area.width.saturating_sub(1) as usize;
    let mut lines = vec![
        Line::from(Span::styled(
            day.label(),
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            table_row("ROUND", "STATUS", width),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    for (idx, round) in team.rounds(day).iter().enumerate() {
        let status = round.status();
        lines.push(Line::from(Span::styled(
            table_row(&format!("Round {}", idx + 1), status.label(), width),
            status_style(status),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn table_row(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    let pad = width.saturating_sub(used).max(1);
    format!("{left}{}{right}", " ".repeat(pad))
}

fn status_style(status: RoundStatus) -> Style {
    match status {
        RoundStatus::Bye => Style::default().fg(Color::Black).bg(Color::Gray),
        RoundStatus::Submitted => Style::default().fg(Color::Black).bg(Color::LightGreen),
        RoundStatus::Scheduled => Style::default().fg(Color::Black).bg(Color::LightRed),
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Game Score Dashboard - Help",
        "",
        "  /            Search teams",
        "  j/k or ↑/↓   Move",
        "  Enter/Space  Expand or collapse team",
        "  r            Load latest scores on the server, then fetch",
        "  f            Fetch scores",
        "  Esc          Clear search / close help",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Rows: green Submitted, red Scheduled, grey Bye",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
