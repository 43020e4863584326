//! Ratatui-based terminal UI.
//!
//! A single-screen form: customer, services, and billing sections side by side,
//! a "Predict Churn" button, and a result panel showing the risk label and the
//! churn probability.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use tracing::warn;

use crate::app::pipeline::{RunOutput, predict_customer};
use crate::domain::ChurnLabel;
use crate::error::AppError;
use crate::predict::Predictor;

pub mod form;

use form::{Field, Form, Section};

/// Start the TUI with an already loaded predictor.
pub fn run(predictor: Predictor, model_path: &Path) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(predictor, model_path.to_path_buf());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Last prediction shown in the result panel.
#[derive(Debug, Clone)]
enum Outcome {
    Predicted(RunOutput),
    Failed(String),
}

struct App {
    predictor: Predictor,
    model_path: PathBuf,
    form: Form,
    outcome: Option<Outcome>,
    status: String,
}

impl App {
    fn new(predictor: Predictor, model_path: PathBuf) -> Self {
        Self {
            predictor,
            model_path,
            form: Form::new(),
            outcome: None,
            status: "Fill in the form, then press Enter on Predict Churn (or p).".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.form.is_editing() {
            self.handle_amount_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::BackTab => self.form.select_prev(),
            KeyCode::Down | KeyCode::Tab => self.form.select_next(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right | KeyCode::Char(' ') => self.adjust(1),
            KeyCode::Enter => match self.form.selected() {
                Field::Predict => self.predict(),
                Field::MonthlyCharges | Field::TotalCharges => {
                    self.form.begin_edit();
                    self.status = "Type an amount. Enter to apply, Esc to cancel.".to_string();
                }
                _ => self.adjust(1),
            },
            KeyCode::Char('p') => self.predict(),
            KeyCode::Char('r') => {
                self.form.reset();
                self.outcome = None;
                self.status = "Form reset.".to_string();
            }
            _ => {}
        }
        false
    }

    fn handle_amount_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.form.cancel_edit();
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => match self.form.commit_edit() {
                Ok(value) => {
                    self.outcome = None;
                    self.status = format!("{}: {value:.2}", self.form.selected().label());
                }
                Err(msg) => self.status = msg,
            },
            KeyCode::Backspace => self.form.edit_pop(),
            KeyCode::Char(c) => self.form.edit_push(c),
            _ => {}
        }
    }

    fn adjust(&mut self, delta: i32) {
        if self.form.adjust(delta) {
            // Inputs changed: the shown result no longer describes this customer.
            self.outcome = None;
            let field = self.form.selected();
            self.status = format!("{}: {}", field.label(), self.form.value_text(field).trim());
        }
    }

    fn predict(&mut self) {
        match predict_customer(&self.predictor, self.form.record()) {
            Ok(run) => {
                self.status = "Prediction complete.".to_string();
                self.outcome = Some(Outcome::Predicted(run));
            }
            Err(err) => {
                warn!(error = %err, "prediction failed");
                self.status = "Prediction failed.".to_string();
                self.outcome = Some(Outcome::Failed(err.to_string()));
            }
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(12),
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_sections(frame, chunks[1]);
        self.draw_button(frame, chunks[2]);
        self.draw_result(frame, chunks[3]);
        self.draw_footer(frame, chunks[4]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Customer Churn Prediction",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "Predict whether a customer is likely to churn using service & billing details | model: {}",
                    self.model_path.display()
                ),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_sections(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(38),
                Constraint::Percentage(32),
            ])
            .split(area);

        for (section, rect) in Section::INPUTS.iter().zip(columns.iter()) {
            self.draw_section(frame, *section, *rect);
        }
    }

    fn draw_section(&self, frame: &mut ratatui::Frame<'_>, section: Section, area: Rect) {
        let selected = self.form.selected();
        let fields: Vec<Field> = Field::in_section(section).collect();

        let items: Vec<ListItem> = fields
            .iter()
            .map(|field| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<18}", field.label()), Style::default().fg(Color::Gray)),
                    Span::raw(self.form.value_text(*field)),
                ]))
            })
            .collect();

        let focused = selected.section() == section;
        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(section.title())
                    .borders(Borders::ALL)
                    .border_style(border_style),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        if focused {
            state.select(fields.iter().position(|f| *f == selected));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_button(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(2, 5), Constraint::Ratio(1, 5), Constraint::Ratio(2, 5)])
            .split(area);

        let style = if self.form.selected() == Field::Predict {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new(Field::Predict.label())
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(button, columns[1]);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Prediction Result").borders(Borders::ALL);

        let text = match &self.outcome {
            None => Text::from(Span::styled("No prediction yet.", Style::default().fg(Color::Gray))),
            Some(Outcome::Predicted(run)) => {
                let (marker, color) = match run.result.label {
                    ChurnLabel::Churn => ("⚠ ", Color::Red),
                    ChurnLabel::NoChurn => ("✔ ", Color::Green),
                };
                Text::from(vec![
                    Line::from(Span::styled(
                        format!("{marker}{}", run.result.label.risk_text()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::styled("Churn Probability: ", Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(crate::report::format_probability(run.result.probability)),
                    ]),
                ])
            }
            Some(Outcome::Failed(msg)) => Text::from(Span::styled(
                format!("Prediction failed: {msg}"),
                Style::default().fg(Color::Red),
            )),
        };

        let p = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = if self.form.is_editing() {
            "type amount  Enter apply  Esc cancel"
        } else {
            "↑/↓ select  ←/→ change  Enter edit/predict  p predict  r reset  q quit"
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
