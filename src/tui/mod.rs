//! Ratatui-based terminal form.
//!
//! The TUI presents one control per applicant field, advisory warnings for
//! out-of-range values, a Predict action, and a result panel with the
//! decision and (when available) the approval probability.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Terminal,
};

use crate::app::pipeline::{run_screen, ScreenOutput};
use crate::domain::ApplicantRecord;
use crate::error::AppError;
use crate::model::ModelArtifact;
use crate::report;

/// Start the interactive form against a loaded artifact.
pub fn run(artifact: &ModelArtifact) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(artifact);
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

/// Form rows, top to bottom. The last row is the Predict action.
const FIELD_AGE: usize = 0;
const FIELD_INCOME: usize = 1;
const FIELD_EMP_LENGTH: usize = 2;
const FIELD_HOME: usize = 3;
const FIELD_DEFAULT: usize = 4;
const FIELD_CRED_HIST: usize = 5;
const FIELD_INTENT: usize = 6;
const FIELD_GRADE: usize = 7;
const FIELD_LOAN_AMNT: usize = 8;
const FIELD_INT_RATE: usize = 9;
const FIELD_PCT_INCOME: usize = 10;
const FIELD_PREDICT: usize = 11;
const FIELD_COUNT: usize = 12;

struct App<'a> {
    artifact: &'a ModelArtifact,
    record: ApplicantRecord,
    selected_field: usize,
    /// Free-text edit buffer for the selected numeric field.
    editing: Option<String>,
    status: String,
    output: Option<ScreenOutput>,
    error: Option<String>,
}

impl<'a> App<'a> {
    fn new(artifact: &'a ModelArtifact) -> Self {
        Self {
            artifact,
            record: ApplicantRecord::default(),
            selected_field: 0,
            editing: None,
            status: "Fill in the applicant details and press p to predict.".to_string(),
            output: None,
            error: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
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

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => match self.selected_field {
                FIELD_PREDICT => self.run_predict(),
                FIELD_HOME | FIELD_DEFAULT | FIELD_INTENT | FIELD_GRADE => self.adjust_field(1),
                _ => {
                    self.editing = Some(self.current_numeric_text());
                    self.status =
                        "Editing value. Enter to apply, Esc to cancel.".to_string();
                }
            },
            KeyCode::Char('p') => self.run_predict(),
            _ => {}
        }

        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let buffer = self.editing.take().unwrap_or_default();
                self.apply_edit(&buffer);
            }
            KeyCode::Backspace => {
                if let Some(buffer) = &mut self.editing {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                let allow_dot = matches!(self.selected_field, FIELD_INT_RATE | FIELD_PCT_INCOME);
                if let Some(buffer) = &mut self.editing {
                    if c.is_ascii_digit() || (allow_dot && c == '.') {
                        buffer.push(c);
                    }
                }
            }
            _ => {}
        }
    }

    fn current_numeric_text(&self) -> String {
        match self.selected_field {
            FIELD_AGE => self.record.age.to_string(),
            FIELD_INCOME => self.record.income.to_string(),
            FIELD_EMP_LENGTH => self.record.emp_length.to_string(),
            FIELD_CRED_HIST => self.record.cred_hist_length.to_string(),
            FIELD_LOAN_AMNT => self.record.loan_amnt.to_string(),
            FIELD_INT_RATE => format!("{}", self.record.int_rate),
            FIELD_PCT_INCOME => format!("{}", self.record.percent_income),
            _ => String::new(),
        }
    }

    fn apply_edit(&mut self, buffer: &str) {
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            self.status = "Empty value ignored.".to_string();
            return;
        }

        let applied = match self.selected_field {
            FIELD_AGE => parse_into(trimmed, &mut self.record.age),
            FIELD_INCOME => parse_into(trimmed, &mut self.record.income),
            FIELD_EMP_LENGTH => parse_into(trimmed, &mut self.record.emp_length),
            FIELD_CRED_HIST => parse_into(trimmed, &mut self.record.cred_hist_length),
            FIELD_LOAN_AMNT => parse_into(trimmed, &mut self.record.loan_amnt),
            FIELD_INT_RATE => parse_into(trimmed, &mut self.record.int_rate),
            FIELD_PCT_INCOME => parse_into(trimmed, &mut self.record.percent_income),
            _ => false,
        };

        self.status = if applied {
            format!("Set {} = {trimmed}.", field_label(self.selected_field))
        } else {
            format!("Invalid value '{trimmed}'.")
        };
    }

    fn adjust_field(&mut self, delta: i64) {
        let r = &mut self.record;
        match self.selected_field {
            FIELD_AGE => r.age = step_u32(r.age, delta, 1),
            FIELD_INCOME => r.income = step_u64(r.income, delta, 1_000),
            FIELD_EMP_LENGTH => r.emp_length = step_u32(r.emp_length, delta, 1),
            FIELD_HOME => {
                r.home_ownership = if delta >= 0 {
                    r.home_ownership.next()
                } else {
                    r.home_ownership.prev()
                };
            }
            FIELD_DEFAULT => {
                r.default_on_file = if delta >= 0 {
                    r.default_on_file.next()
                } else {
                    r.default_on_file.prev()
                };
            }
            FIELD_CRED_HIST => r.cred_hist_length = step_u32(r.cred_hist_length, delta, 1),
            FIELD_INTENT => {
                r.loan_intent = if delta >= 0 {
                    r.loan_intent.next()
                } else {
                    r.loan_intent.prev()
                };
            }
            FIELD_GRADE => {
                r.loan_grade = if delta >= 0 {
                    r.loan_grade.next()
                } else {
                    r.loan_grade.prev()
                };
            }
            FIELD_LOAN_AMNT => r.loan_amnt = step_u64(r.loan_amnt, delta, 1_000),
            FIELD_INT_RATE => {
                r.int_rate = (r.int_rate + delta as f64 * 0.5).max(0.0);
            }
            FIELD_PCT_INCOME => {
                r.percent_income = (r.percent_income + delta as f64 * 0.01).max(0.0);
            }
            _ => {}
        }
    }

    fn run_predict(&mut self) {
        // Failures are surfaced in the result panel; the form stays usable
        // for the next attempt.
        match run_screen(self.artifact, &self.record) {
            Ok(output) => {
                self.error = None;
                self.output = Some(output);
                self.status = "Applicant screened.".to_string();
            }
            Err(err) => {
                self.output = None;
                self.error = Some(err.to_string());
                self.status = "Prediction failed.".to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("loan", Style::default().fg(Color::Cyan)),
            Span::raw(" — loan approval screener"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "model: {} v{} | family: {} | features: {}",
                self.artifact.tool,
                self.artifact.version,
                self.artifact.model.family.display_name(),
                self.artifact.schema.len(),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let r = &self.record;
        let mut rows: Vec<String> = vec![
            format!("Age: {}", r.age),
            format!("Income: {}", r.income),
            format!("Employment length: {}", r.emp_length),
            format!("Home ownership: {}", r.home_ownership),
            format!("Default on file: {}", r.default_on_file),
            format!("Credit history length: {}", r.cred_hist_length),
            format!("Loan intent: {}", r.loan_intent),
            format!("Loan grade: {}", r.loan_grade),
            format!("Loan amount: {}", r.loan_amnt),
            format!("Interest rate: {}", r.int_rate),
            format!("Percent income: {}", r.percent_income),
            "[ Predict ]".to_string(),
        ];

        if let Some(buffer) = &self.editing {
            rows[self.selected_field] =
                format!("{}: {buffer}_", field_label(self.selected_field));
        }

        let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
        let list = List::new(items)
            .block(Block::default().title("Applicant").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();

        if let Some(err) = &self.error {
            lines.push(Line::from(Span::styled(
                format!("Error during prediction: {err}"),
                Style::default().fg(Color::Red),
            )));
        } else if let Some(output) = &self.output {
            for warning in &output.warnings {
                lines.push(Line::from(Span::styled(
                    format!("⚠ {}", warning.message),
                    Style::default().fg(Color::Yellow),
                )));
            }
            if !output.warnings.is_empty() {
                lines.push(Line::default());
            }

            let decision = report::format_decision(&output.result);
            let color = if output.result.approved() {
                Color::Green
            } else {
                Color::Red
            };
            lines.push(Line::from(Span::styled(
                decision,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));

            if let Some(probability) = report::format_probability(&output.result) {
                lines.push(Line::from(Span::styled(
                    probability,
                    Style::default().fg(Color::Cyan),
                )));
            }
        } else {
            // Live warnings before the first prediction, like the original form.
            for warning in crate::validate::advisory_warnings(&self.record) {
                lines.push(Line::from(Span::styled(
                    format!("⚠ {}", warning.message),
                    Style::default().fg(Color::Yellow),
                )));
            }
            lines.push(Line::from(Span::styled(
                "No prediction yet.",
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Result").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit/cycle  p predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn field_label(field: usize) -> &'static str {
    match field {
        FIELD_AGE => "Age",
        FIELD_INCOME => "Income",
        FIELD_EMP_LENGTH => "Employment length",
        FIELD_HOME => "Home ownership",
        FIELD_DEFAULT => "Default on file",
        FIELD_CRED_HIST => "Credit history length",
        FIELD_INTENT => "Loan intent",
        FIELD_GRADE => "Loan grade",
        FIELD_LOAN_AMNT => "Loan amount",
        FIELD_INT_RATE => "Interest rate",
        FIELD_PCT_INCOME => "Percent income",
        FIELD_PREDICT => "Predict",
        _ => "",
    }
}

fn parse_into<T: std::str::FromStr>(text: &str, slot: &mut T) -> bool {
    match text.parse() {
        Ok(value) => {
            *slot = value;
            true
        }
        Err(_) => false,
    }
}

fn step_u32(value: u32, delta: i64, step: u32) -> u32 {
    if delta >= 0 {
        value.saturating_add(step)
    } else {
        value.saturating_sub(step)
    }
}

fn step_u64(value: u64, delta: i64, step: u64) -> u64 {
    if delta >= 0 {
        value.saturating_add(step)
    } else {
        value.saturating_sub(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HomeOwnership, LoanGrade, ModelSchema};
    use crate::features::FeatureRow;
    use crate::model::{LinearModel, ModelFamily};

    fn artifact() -> ModelArtifact {
        let columns = FeatureRow::from_record(&ApplicantRecord::default())
            .columns()
            .to_vec();
        let n = columns.len();
        ModelArtifact {
            tool: "loan".to_string(),
            version: 1,
            schema: ModelSchema { version: 1, columns },
            model: LinearModel {
                family: ModelFamily::Logistic,
                intercept: 0.0,
                weights: vec![0.0; n],
                threshold: 0.5,
            },
        }
    }

    #[test]
    fn adjust_cycles_enums_and_steps_numbers() {
        let artifact = artifact();
        let mut app = App::new(&artifact);

        app.selected_field = FIELD_GRADE;
        app.adjust_field(1);
        assert_eq!(app.record.loan_grade, LoanGrade::B);
        app.adjust_field(-1);
        assert_eq!(app.record.loan_grade, LoanGrade::A);

        app.selected_field = FIELD_INCOME;
        app.adjust_field(1);
        assert_eq!(app.record.income, 51_000);

        app.selected_field = FIELD_HOME;
        app.adjust_field(-1);
        assert_eq!(app.record.home_ownership, HomeOwnership::Other);
    }

    #[test]
    fn numeric_edit_applies_and_rejects() {
        let artifact = artifact();
        let mut app = App::new(&artifact);

        app.selected_field = FIELD_AGE;
        app.editing = Some(String::new());
        for c in "42".chars() {
            app.handle_edit(KeyCode::Char(c));
        }
        app.handle_edit(KeyCode::Enter);
        assert_eq!(app.record.age, 42);
        assert!(app.editing.is_none());

        // Dots are filtered for integer fields, so the buffer stays numeric.
        app.editing = Some(String::new());
        for c in "3.5".chars() {
            app.handle_edit(KeyCode::Char(c));
        }
        assert_eq!(app.editing.as_deref(), Some("35"));
        app.handle_edit(KeyCode::Esc);
        assert_eq!(app.record.age, 42);
    }

    #[test]
    fn predict_key_populates_output_and_keeps_form_usable() {
        let artifact = artifact();
        let mut app = App::new(&artifact);

        assert!(!app.handle_key(KeyCode::Char('p')));
        let output = app.output.as_ref().expect("screen output");
        // Zero weights, zero intercept: sigmoid(0) = 0.5 passes the 0.5 cut.
        assert_eq!(output.result.label, 1);

        // Form still accepts input afterwards.
        app.selected_field = FIELD_AGE;
        app.adjust_field(1);
        assert_eq!(app.record.age, 31);
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
