use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

mod calc;
mod form;
mod format;
mod presets;

use calc::Quote;
use form::LoanForm;
use presets::Presets;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Screen {
    Principal,
    StartDate,
    EndDate,
    Interest,
    Result,
}

struct App {
    screen: Screen,
    form: LoanForm,
    presets: Presets,
    quote: Option<Quote>,
    notice: Option<String>,
    picker: Option<ListState>,
}

impl App {
    fn new(presets: Presets) -> Self {
        Self {
            screen: Screen::Principal,
            form: LoanForm::default(),
            presets,
            quote: None,
            notice: None,
            picker: None,
        }
    }

    fn calculate(&mut self) {
        let today = Local::now().date_naive();
        match self.form.parse(today).and_then(|terms| calc::calculate(&terms)) {
            Ok(quote) => {
                self.quote = Some(quote);
                self.notice = None;
                self.screen = Screen::Result;
            }
            // Blocking notice; a previous quote, if any, stays intact
            // until the form is reset.
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn reset_form(&mut self) {
        self.form.reset();
        self.quote = None;
        self.notice = None;
        self.picker = None;
        self.screen = Screen::Principal;
    }

    fn picker_items(&self) -> Vec<String> {
        match self.screen {
            Screen::Principal => self
                .presets
                .amounts
                .iter()
                .map(|a| format!("{}đ", format::group(*a)))
                .collect(),
            Screen::Interest => self.presets.interest_labels(self.form.use_percent),
            _ => Vec::new(),
        }
    }

    fn pick_preset(&mut self, index: usize) {
        match self.screen {
            Screen::Principal => {
                if let Some(amount) = self.presets.amounts.get(index) {
                    self.form.principal = amount.to_string();
                }
            }
            Screen::Interest => {
                if let Some(value) = self.presets.interest_value(self.form.use_percent, index) {
                    self.form.interest = value;
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let presets = Presets::load()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(presets);
    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &mut app))?;

        if let Event::Key(key) = event::read()? {
            if app.picker.is_some() {
                handle_picker_input(&mut app, key);
                continue;
            }
            match app.screen {
                Screen::Principal => {
                    if handle_principal_input(&mut app, key) {
                        return Ok(());
                    }
                }
                Screen::StartDate => handle_start_date_input(&mut app, key),
                Screen::EndDate => handle_end_date_input(&mut app, key),
                Screen::Interest => handle_interest_input(&mut app, key),
                Screen::Result => {
                    if handle_result_input(&mut app, key) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn handle_picker_input(app: &mut App, key: KeyEvent) {
    let len = app.picker_items().len();
    let state = match app.picker.as_mut() {
        Some(state) => state,
        None => return,
    };
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            let current = state.selected().unwrap_or(0);
            if current + 1 < len {
                state.select(Some(current + 1));
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            let current = state.selected().unwrap_or(0);
            state.select(Some(current.saturating_sub(1)));
        }
        KeyCode::Enter => {
            if let Some(index) = state.selected() {
                app.pick_preset(index);
            }
            app.picker = None;
        }
        KeyCode::Esc | KeyCode::Char('p') => {
            app.picker = None;
        }
        _ => {}
    }
}

fn open_picker(app: &mut App) {
    let mut state = ListState::default();
    state.select(Some(0));
    app.picker = Some(state);
}

fn handle_principal_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Backspace => {
            app.form.principal.pop();
        }
        KeyCode::Char('p') => open_picker(app),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            if !app.form.principal.is_empty() {
                app.screen = Screen::StartDate;
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => return true,
        // Free-text amount field: anything typed lands here and the
        // non-digits are stripped.
        KeyCode::Char(c) => {
            app.form.principal.push(c);
            app.form.principal = form::digits(&app.form.principal);
            app.notice = None;
        }
        _ => {}
    }
    false
}

fn handle_start_date_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            app.form.start_date.push(c);
            app.notice = None;
        }
        KeyCode::Backspace => {
            app.form.start_date.pop();
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            // The borrow date must parse and must not be in the future
            // before the user can move on.
            match form::parse_date(&app.form.start_date) {
                Some(date) if date > Local::now().date_naive() => {
                    app.notice = Some(calc::CalcError::StartInFuture.to_string());
                }
                Some(_) => {
                    app.notice = None;
                    app.screen = Screen::EndDate;
                }
                None => {
                    app.notice = Some(calc::CalcError::MissingInput.to_string());
                }
            }
        }
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.screen = Screen::Principal,
        _ => {}
    }
}

fn handle_end_date_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => {
            app.form.end_date.push(c);
            app.notice = None;
        }
        KeyCode::Backspace => {
            app.form.end_date.pop();
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            let start = form::parse_date(&app.form.start_date);
            match form::parse_date(&app.form.end_date) {
                Some(end) if start.is_some_and(|s| end > s) => {
                    app.notice = None;
                    app.screen = Screen::Interest;
                }
                Some(_) => {
                    app.notice = Some(calc::CalcError::DateOrder.to_string());
                }
                None => {
                    app.notice = Some(calc::CalcError::MissingInput.to_string());
                }
            }
        }
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.screen = Screen::StartDate,
        _ => {}
    }
}

fn handle_interest_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab => {
            app.form.use_percent = !app.form.use_percent;
            app.form.interest.clear();
        }
        KeyCode::Backspace => {
            app.form.interest.pop();
        }
        KeyCode::Char('p') => open_picker(app),
        KeyCode::Enter => app.calculate(),
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.screen = Screen::EndDate,
        KeyCode::Char(c) => {
            app.form.interest.push(c);
            if app.form.use_percent {
                // Percent mode keeps a decimal point.
                app.form.interest.retain(|ch| ch.is_ascii_digit() || ch == '.');
            } else {
                app.form.interest = form::digits(&app.form.interest);
            }
            app.notice = None;
        }
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_form(),
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => app.screen = Screen::Interest,
        _ => {}
    }
    false
}

fn ui(f: &mut Frame, app: &mut App) {
    match app.screen {
        Screen::Principal => render_principal_screen(f, app),
        Screen::StartDate => render_start_date_screen(f, app),
        Screen::EndDate => render_end_date_screen(f, app),
        Screen::Interest => render_interest_screen(f, app),
        Screen::Result => render_result_screen(f, app),
    }
    if app.picker.is_some() {
        render_picker(f, app);
    }
}

fn input_chunks(f: &Frame, input_height: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(input_height),
                Constraint::Length(1),
                Constraint::Min(1),
            ]
            .as_ref(),
        )
        .split(f.size())
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("Tính Tiền Lãi")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}

fn render_notice(f: &mut Frame, app: &App, area: Rect) {
    if let Some(notice) = &app.notice {
        let warning = Paragraph::new(notice.as_str()).style(Style::default().fg(Color::Red));
        f.render_widget(warning, area);
    }
}

fn render_help(f: &mut Frame, text: &str, area: Rect) {
    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, area);
}

fn render_principal_screen(f: &mut Frame, app: &App) {
    let chunks = input_chunks(f, 3);
    render_title(f, chunks[0]);

    let input_block = Block::default().borders(Borders::ALL).title("SỐ TIỀN MƯỢN");
    let input = Paragraph::new(format::echo(&app.form.principal))
        .style(Style::default().fg(Color::Yellow))
        .block(input_block);
    f.render_widget(input, chunks[1]);

    render_notice(f, app, chunks[2]);
    render_help(
        f,
        "p: preset amounts | Enter/l/→: continue | Esc/q: exit",
        chunks[3],
    );
}

fn render_start_date_screen(f: &mut Frame, app: &App) {
    let chunks = input_chunks(f, 3);
    render_title(f, chunks[0]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .title("NGÀY MƯỢN (YYYY-MM-DD)");
    let input = Paragraph::new(app.form.start_date.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(input_block);
    f.render_widget(input, chunks[1]);

    render_notice(f, app, chunks[2]);
    render_help(f, "Enter/l/→: continue | Esc/h/←: back", chunks[3]);
}

fn render_end_date_screen(f: &mut Frame, app: &App) {
    let chunks = input_chunks(f, 3);
    render_title(f, chunks[0]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .title("NGÀY TRẢ TIỀN (YYYY-MM-DD)");
    let input = Paragraph::new(app.form.end_date.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(input_block);
    f.render_widget(input, chunks[1]);

    render_notice(f, app, chunks[2]);
    render_help(f, "Enter/l/→: continue | Esc/h/←: back", chunks[3]);
}

fn render_interest_screen(f: &mut Frame, app: &App) {
    let chunks = input_chunks(f, 7);
    render_title(f, chunks[0]);

    let flat_value = format!("{}đ", format::echo(&app.form.interest));
    let percent_value = format!("{}%", app.form.interest);

    let flat_option = if !app.form.use_percent {
        format!("▶ Tiền lãi cố định: {}", flat_value)
    } else {
        format!("  Tiền lãi cố định: {}", flat_value)
    };
    let percent_option = if app.form.use_percent {
        format!("▶ Lãi suất (%/tháng): {}", percent_value)
    } else {
        format!("  Lãi suất (%/tháng): {}", percent_value)
    };

    let options_text = vec![
        Line::from(flat_option).style(if !app.form.use_percent {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }),
        Line::from(percent_option).style(if app.form.use_percent {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }),
    ];

    let input_block = Block::default()
        .borders(Borders::ALL)
        .title("TIỀN LÃI 1 THÁNG - Press Tab to switch between options");
    let input = Paragraph::new(options_text).block(input_block);
    f.render_widget(input, chunks[1]);

    render_notice(f, app, chunks[2]);
    render_help(
        f,
        "Tab: toggle đ/% | p: presets | Enter: calculate | Esc/h/←: back",
        chunks[3],
    );
}

fn render_result_screen(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    render_title(f, chunks[0]);

    if let Some(quote) = &app.quote {
        let total = format::vnd(quote.total_amount as u64);
        let interest = format::vnd(quote.total_interest.round() as u64);
        let text = vec![
            Line::from(vec![
                Span::styled(
                    "Thời gian vay: ",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(quote.period.clone()),
            ]),
            Line::from(vec![
                Span::styled("Số ngày: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(quote.days.to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Tiền lãi: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(interest, Style::default().fg(Color::Red)),
            ]),
            Line::from(vec![
                Span::styled("TỔNG TIỀN: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    total,
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        let result = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("KẾT QUẢ"))
            .alignment(Alignment::Left);
        f.render_widget(result, chunks[1]);
    }

    let help = Paragraph::new("r: reset form | Esc/h/←: back | q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(help, chunks[2]);
}

fn render_picker(f: &mut Frame, app: &mut App) {
    let items: Vec<ListItem> = app.picker_items().into_iter().map(ListItem::new).collect();
    let height = (items.len() as u16 + 2).min(f.size().height.saturating_sub(4));
    let area = centered_rect(30, height, f.size());

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Chọn mốc"))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_widget(Clear, area);
    if let Some(state) = app.picker.as_mut() {
        f.render_stateful_widget(list, area, state);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
