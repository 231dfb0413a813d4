//! Booking Desk - terminal view for managing travel bookings
//!
//! Run: cargo run -p booking-client --bin booking-desk
//!
//! Keys: `/` search, Up/Down select, `c` cancel selected, `r` reload,
//! PgUp/PgDown scroll logs, `q` quit.

use std::io::{self, Stdout};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Context;
use booking_client::controller::confirm_message;
use booking_client::{
    Booking, BookingList, BookingStatus, ClientConfig, ClientResult,
    FileSessionStore, HttpClient, Notification, NotificationKind, Notifier, SessionStore,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

const TOAST_TTL: Duration = Duration::from_secs(3);
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Results of background requests, applied on the UI loop
enum AppEvent {
    Loaded(u64, ClientResult<Vec<Booking>>),
    CancelDone(Booking, String, ClientResult<Option<Booking>>),
}

/// Notifications shown as toasts until they expire
#[derive(Default)]
struct Toasts(Mutex<Vec<(Notification, Instant)>>);

impl Toasts {
    fn visible(&self) -> Vec<Notification> {
        let mut toasts = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        toasts.retain(|(_, shown_at)| shown_at.elapsed() < TOAST_TTL);
        toasts.iter().map(|(n, _)| n.clone()).collect()
    }
}

impl Notifier for Toasts {
    fn notify(&self, notification: Notification) {
        let mut toasts = match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        toasts.push((notification, Instant::now()));
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Cancel awaiting a y/n answer
struct PendingConfirm {
    id: String,
    name: String,
    message: String,
}

struct App {
    api: Arc<HttpClient>,
    list: BookingList,
    /// Search query input
    input: Input,
    input_mode: InputMode,
    table_state: TableState,
    confirm: Option<PendingConfirm>,
    toasts: Toasts,
    logger_state: TuiWidgetState,
    tx: mpsc::UnboundedSender<AppEvent>,
    tick: usize,
}

impl App {
    fn new(api: Arc<HttpClient>, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            api,
            list: BookingList::new(),
            input: Input::default(),
            input_mode: InputMode::default(),
            table_state: TableState::default().with_selected(Some(0)),
            confirm: None,
            toasts: Toasts::default(),
            logger_state: TuiWidgetState::new(),
            tx,
            tick: 0,
        }
    }

    fn visible(&self) -> Vec<&Booking> {
        self.list.search(self.input.value())
    }

    fn selected(&self) -> Option<&Booking> {
        let index = self.table_state.selected()?;
        self.visible().into_iter().nth(index)
    }

    fn reload(&mut self) {
        let generation = self.list.begin_load();
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.list_bookings().await;
            let _ = tx.send(AppEvent::Loaded(generation, result));
        });
    }

    fn ask_cancel(&mut self) {
        let Some(booking) = self.selected() else {
            return;
        };
        if !self.list.can_cancel(&booking.id) {
            tracing::debug!(booking_id = %booking.id, "Booking cannot be canceled now");
            return;
        }
        self.confirm = Some(PendingConfirm {
            id: booking.id.clone(),
            name: booking.user_name.clone(),
            message: confirm_message(&booking.user_name),
        });
    }

    fn confirm_cancel(&mut self) {
        let Some(pending) = self.confirm.take() else {
            return;
        };
        let Some(booking) = self.list.begin_cancel(&pending.id) else {
            return;
        };
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = api
                .update_booking_status(&booking.id, BookingStatus::Canceled)
                .await;
            let _ = tx.send(AppEvent::CancelDone(booking, pending.name, outcome));
        });
    }

    fn apply(&mut self, event: AppEvent) {
        let result = match event {
            AppEvent::Loaded(generation, result) => {
                self.list.apply_loaded(generation, result, &self.toasts)
            }
            AppEvent::CancelDone(booking, name, outcome) => {
                self.list
                    .finish_cancel(&booking, &name, outcome, &self.toasts)
            }
        };
        if let Err(e) = result {
            tracing::debug!(error = %e, "Booking request failed");
        }
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        let selected = match self.table_state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.table_state.select(Some(next));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env();

    let session = FileSessionStore::new(&config.session_file);
    if !session.has_token() {
        anyhow::bail!(
            "no session token at {}; sign in before opening the booking desk",
            session.path().display()
        );
    }

    // Initialize TUI Logger with Tracing
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let api = Arc::new(config.build_http_client().context("failed to build HTTP client")?);
    tracing::info!("Connecting to {}", api.base_url());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(api, tx);
    app.reload();

    let res = run_app(&mut terminal, &mut app, &mut rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("booking desk failed")
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    loop {
        app.tick = app.tick.wrapping_add(1);
        terminal.draw(|f| ui(f, app))?;

        while let Ok(event) = rx.try_recv() {
            app.apply(event);
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            continue;
        }

        if app.confirm.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_cancel(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.confirm = None,
                _ => {}
            }
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('/') => app.input_mode = InputMode::Search,
                KeyCode::Char('c') => app.ask_cancel(),
                KeyCode::Char('r') => app.reload(),
                KeyCode::Up => app.move_selection(false),
                KeyCode::Down => app.move_selection(true),
                KeyCode::PageUp => app.logger_state.transition(TuiWidgetEvent::PrevPageKey),
                KeyCode::PageDown => app.logger_state.transition(TuiWidgetEvent::NextPageKey),
                _ => {}
            },
            InputMode::Search => match key.code {
                KeyCode::Enter | KeyCode::Esc => app.input_mode = InputMode::Normal,
                _ => {
                    app.input.handle_event(&Event::Key(key));
                    app.clamp_selection();
                }
            },
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Length(3),      // Search
            Constraint::Percentage(40), // Active
            Constraint::Min(5),         // Canceled
            Constraint::Length(8),      // Logs
        ])
        .split(f.area());

    // Header
    let status = if app.list.is_loading() {
        Span::styled(
            format!(" {} Loading bookings... ", SPINNER[app.tick % SPINNER.len()]),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!(
                " {} active | {} canceled ",
                app.list.active().len(),
                app.list.canceled().len()
            ),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    };
    let title = Paragraph::new(Line::from(vec![
        Span::raw(" 🧳 Booking Desk "),
        Span::raw(" | "),
        status,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, chunks[0]);

    let help = Paragraph::new("/ search  c cancel  r reload  q quit ")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    f.render_widget(help, chunks[0].inner(Margin::new(1, 1)));

    // Search input
    let search_style = match app.input_mode {
        InputMode::Normal => Style::default().fg(Color::Gray),
        InputMode::Search => Style::default().fg(Color::Yellow),
    };
    let width = chunks[1].width.max(3) - 3;
    let scroll = app.input.visual_scroll(width as usize);
    let search = Paragraph::new(app.input.value())
        .style(search_style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(" Search "));
    f.render_widget(search, chunks[1]);
    if app.input_mode == InputMode::Search {
        f.set_cursor_position((
            chunks[1].x + ((app.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
            chunks[1].y + 1,
        ));
    }

    // Active bookings
    let active_rows: Vec<Row> = app
        .visible()
        .into_iter()
        .map(|b| {
            let action = if app.list.is_pending(&b.id) {
                Span::styled("canceling...", Style::default().fg(Color::Yellow))
            } else {
                Span::styled("[c] cancel", Style::default().fg(Color::Red))
            };
            booking_row(b).cells_with(action)
        })
        .collect();
    let active = Table::new(active_rows, column_widths(true))
        .header(header_row(true))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(
            Block::default()
                .title(" Active Bookings ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
    f.render_stateful_widget(active, chunks[2], &mut app.table_state);

    // Canceled bookings
    let canceled_rows: Vec<Row> = app
        .list
        .canceled()
        .iter()
        .map(|b| booking_row(b).into_row())
        .collect();
    let canceled = Table::new(canceled_rows, column_widths(false))
        .header(header_row(false))
        .block(
            Block::default()
                .title(" Canceled Bookings ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(canceled, chunks[3]);

    // Logs (TuiLoggerWidget)
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, chunks[4]);

    render_toasts(f, &app.toasts.visible());

    if let Some(pending) = &app.confirm {
        render_confirm(f, &pending.message);
    }
}

/// Cells shared by both tables
struct BookingCells(Vec<Cell<'static>>);

impl BookingCells {
    fn into_row(self) -> Row<'static> {
        Row::new(self.0)
    }

    fn cells_with(mut self, extra: Span<'static>) -> Row<'static> {
        self.0.push(Cell::from(extra));
        Row::new(self.0)
    }
}

fn booking_row(b: &Booking) -> BookingCells {
    BookingCells(vec![
        Cell::from(b.user_name.clone()),
        Cell::from(b.user_number.clone()),
        Cell::from(b.destination.clone()),
        Cell::from(b.travel_date_display()),
        Cell::from(b.return_date_display()),
        Cell::from(b.ticket_quantity.to_string()),
        Cell::from(format!("{:.2}", b.total_price)),
    ])
}

fn header_row(with_action: bool) -> Row<'static> {
    let mut titles = vec![
        "Name", "Number", "Destination", "Travel", "Return", "Tickets", "Total",
    ];
    if with_action {
        titles.push("Action");
    }
    Row::new(titles).style(Style::default().add_modifier(Modifier::BOLD))
}

fn column_widths(with_action: bool) -> Vec<Constraint> {
    let mut widths = vec![
        Constraint::Percentage(16),
        Constraint::Percentage(13),
        Constraint::Percentage(15),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(10),
    ];
    if with_action {
        widths.push(Constraint::Length(13));
    }
    widths
}

/// Message length plus borders and padding, capped at `max`
fn toast_width(message: &str, max: u16) -> u16 {
    u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(max)
}

fn render_toasts(f: &mut Frame, toasts: &[Notification]) {
    let area = f.area();
    for (i, toast) in toasts.iter().enumerate() {
        let width = toast_width(&toast.message, area.width);
        let y = u16::try_from(i)
            .unwrap_or(u16::MAX)
            .saturating_mul(3)
            .saturating_add(1);
        if y.saturating_add(3) > area.height {
            break;
        }
        let rect = Rect::new(area.width.saturating_sub(width + 1), y, width, 3);
        let color = match toast.kind {
            NotificationKind::Success => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(toast.message.as_str())
                .style(Style::default().fg(color))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                ),
            rect,
        );
    }
}

fn render_confirm(f: &mut Frame, message: &str) {
    let area = f.area();
    let width = (message.chars().count() as u16 + 6).min(area.width);
    let rect = Rect::new(
        area.width.saturating_sub(width) / 2,
        area.height.saturating_sub(5) / 2,
        width,
        5.min(area.height),
    );
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(message.to_string()),
            Line::from(""),
            Line::from(Span::styled("[y] yes   [n] no", Style::default().fg(Color::Yellow))),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Confirm ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_width_fits_message() {
        assert_eq!(toast_width("Saved", 80), 9);
        assert_eq!(toast_width("Saved", 6), 6);
    }

    #[test]
    fn test_toast_width_long_name_saturates() {
        let message = booking_client::controller::canceled_message(&"x".repeat(70_000));
        assert_eq!(toast_width(&message, 120), 120);
        assert_eq!(toast_width(&message, u16::MAX), u16::MAX);
    }
}
