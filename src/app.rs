use crate::alert::{Alert, AlertPopup};
use crate::attachment::load_attachment;
use crate::catalogue::points_table;
use crate::claim::{points_needed, ClaimForm, ClaimRecord, ClaimSink, ClaimStatus, TARGET_POINTS};
use crate::help::Help;
use crate::listing::{popup_area, render_list};
use crate::picker::{DatePicker, PickerInput, PickerOutput, PickerPopup};
use crate::report::{Reporter, Severity};
use crate::session::Session;
use crate::theme::{
    status::{APPROVED_STYLE, PENDING_STYLE, REJECTED_STYLE},
    BASE_STYLE, FOCUS_STYLE, HEADER_STYLE, LABEL_STYLE, PLACEHOLDER_STYLE, SCORE_STYLE,
};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{ListItem, Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::path::Path;
use time::Date;
use tracing::{debug, info};

/// Width of the label column of the form
const LABEL_WIDTH: usize = 14;

static TITLE: &str = "CPD Points Claim";

static DATE_PLACEHOLDER: &str = "Select Date";

static DESCRIPTION_PLACEHOLDER: &str = "Describe the activity";

static ATTACHMENT_PLACEHOLDER: &str = "Type a file path and press Enter";

static NO_CLAIMS: &str = "No claims submitted yet";

static FOOTER: &str = "TAB next field  ENTER select  F1 help  F2 points  F3 history  ESC quit";

#[derive(Debug)]
pub(crate) struct App<K, R> {
    session: Session,
    form: ClaimForm,
    start_picker: DatePicker,
    end_picker: DatePicker,
    focus: Field,
    attachment_input: String,
    sink: K,
    reporter: R,
    state: AppState,
}

impl<K: ClaimSink, R: Reporter> App<K, R> {
    pub(crate) fn new(today: Date, session: Session, sink: K, reporter: R) -> App<K, R> {
        App {
            session,
            form: ClaimForm::new(),
            start_picker: DatePicker::new("Start date", today),
            end_picker: DatePicker::new("End date", today),
            focus: Field::Activity,
            attachment_input: String::new(),
            sink,
            reporter,
            state: AppState::Form,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Form => self.handle_form_key(key),
            AppState::Picking(field) => {
                let Some(input) = picker_input(key) else {
                    return false;
                };
                match self.picker_mut(field).handle_input(input) {
                    PickerOutput::Ok => true,
                    PickerOutput::Invalid => false,
                    PickerOutput::Closed => {
                        self.state = AppState::Form;
                        true
                    }
                    PickerOutput::Commit(date) => {
                        self.state = AppState::Form;
                        self.apply_date(field, Some(date));
                        true
                    }
                }
            }
            AppState::Alerting(_) | AppState::Helping => {
                self.state = AppState::Form;
                true
            }
            AppState::Listing(list, cursor) => self.handle_list_key(list, cursor, key),
            AppState::Quitting => false,
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                return true;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                return true;
            }
            KeyCode::F(1) => {
                self.state = AppState::Helping;
                return true;
            }
            KeyCode::F(2) => {
                self.state = AppState::Listing(ListOverlay::PointsTable, 0);
                return true;
            }
            KeyCode::F(3) => {
                self.state = AppState::Listing(ListOverlay::History, 0);
                return true;
            }
            KeyCode::Esc => {
                self.state = AppState::Quitting;
                return true;
            }
            _ => (),
        }
        match (self.focus, key) {
            (Field::Activity, KeyCode::Left) => {
                self.form.previous_activity();
                true
            }
            (Field::Activity, KeyCode::Right) => {
                self.form.next_activity();
                true
            }
            (Field::StartDate, KeyCode::Enter) => self.open_picker(DateField::Start),
            (Field::EndDate, KeyCode::Enter) => self.open_picker(DateField::End),
            (Field::StartDate, KeyCode::Delete | KeyCode::Backspace) => {
                self.apply_date(DateField::Start, None);
                true
            }
            (Field::EndDate, KeyCode::Delete | KeyCode::Backspace) => {
                self.apply_date(DateField::End, None);
                true
            }
            (Field::Description, KeyCode::Char(c)) => {
                self.form.push_description(c);
                true
            }
            (Field::Description, KeyCode::Backspace) => self.form.pop_description(),
            (Field::Attachment, KeyCode::Char(c)) if self.form.attachment().is_none() => {
                self.attachment_input.push(c);
                true
            }
            (Field::Attachment, KeyCode::Backspace) => self.attachment_input.pop().is_some(),
            (Field::Attachment, KeyCode::Delete) => {
                self.attachment_input.clear();
                self.form.remove_attachment()
            }
            (Field::Attachment, KeyCode::Enter) => self.attach(),
            (Field::Submit, KeyCode::Enter) => {
                self.submit();
                true
            }
            (Field::Reset, KeyCode::Enter) => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn handle_list_key(&mut self, list: ListOverlay, cursor: usize, key: KeyCode) -> bool {
        let len = match list {
            ListOverlay::History => self.sink.history().len(),
            ListOverlay::PointsTable => points_table().len(),
        };
        match key {
            KeyCode::Up if cursor > 0 => {
                self.state = AppState::Listing(list, cursor - 1);
                true
            }
            KeyCode::Down if cursor + 1 < len => {
                self.state = AppState::Listing(list, cursor + 1);
                true
            }
            KeyCode::Home => {
                self.state = AppState::Listing(list, 0);
                true
            }
            KeyCode::End => {
                self.state = AppState::Listing(list, len.saturating_sub(1));
                true
            }
            KeyCode::Esc | KeyCode::Enter | KeyCode::F(2 | 3) => {
                self.state = AppState::Form;
                true
            }
            _ => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn picker_mut(&mut self, field: DateField) -> &mut DatePicker {
        match field {
            DateField::Start => &mut self.start_picker,
            DateField::End => &mut self.end_picker,
        }
    }

    fn open_picker(&mut self, field: DateField) -> bool {
        self.picker_mut(field).open();
        self.state = AppState::Picking(field);
        true
    }

    fn apply_date(&mut self, field: DateField, value: Option<Date>) {
        let r = match field {
            DateField::Start => self.form.set_start(value),
            DateField::End => self.form.set_end(value),
        };
        self.sync_pickers();
        match r {
            Ok(()) => debug!(?field, ?value, "date updated"),
            Err(e) => {
                let message = e.to_string();
                self.reporter.capture_message(&message, Severity::Warning);
                self.state = AppState::Alerting(Alert::new("Invalid Date", message));
            }
        }
    }

    // The pickers only display what the form accepted.
    fn sync_pickers(&mut self) {
        let range = *self.form.range();
        self.start_picker.set_value(range.start());
        self.end_picker.set_value(range.end());
    }

    fn attach(&mut self) -> bool {
        let input = self.attachment_input.trim();
        if input.is_empty() {
            // Nothing picked; treat as a cancelled selection
            return false;
        }
        match load_attachment(Path::new(input)) {
            Ok(attachment) => {
                self.form.attach(attachment);
                self.attachment_input.clear();
            }
            Err(e) => {
                self.reporter.capture_error(&e, "loading attachment");
                self.state = AppState::Alerting(Alert::new(e.title(), e.to_string()));
            }
        }
        true
    }

    fn submit(&mut self) {
        let claim = match self.form.build() {
            Ok(claim) => claim,
            Err(e) => {
                let alert = Alert::new("Missing Information", e.to_string());
                self.state = AppState::Alerting(alert);
                return;
            }
        };
        match self.sink.submit(&claim) {
            Ok(receipt) => {
                info!(
                    user = self.session.email(),
                    claim_no = receipt.claim_no,
                    points = receipt.points,
                    "claim submitted"
                );
                self.reporter
                    .capture_message("points claim submitted", Severity::Info);
                self.reset();
                self.state = AppState::Alerting(Alert::new(
                    "Success",
                    "Your points claim has been submitted!",
                ));
            }
            Err(e) => {
                self.reporter.capture_error(&e, "submitting claim");
                self.state = AppState::Alerting(Alert::new("Error", "Failed to submit claim."));
            }
        }
    }

    fn reset(&mut self) {
        self.form.reset();
        self.attachment_input.clear();
        self.sync_pickers();
    }

    fn label(&self, field: Field) -> Span<'static> {
        let style = if self.focus == field {
            FOCUS_STYLE
        } else {
            LABEL_STYLE
        };
        Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), style)
    }

    fn form_text(&self) -> Text<'_> {
        let activity = self.form.activity();
        let range = self.form.range();
        let mut lines = vec![
            Line::from_iter([
                self.label(Field::Activity),
                Span::raw(format!(
                    "‹ {} ({}) ›",
                    activity.description,
                    points(activity.points)
                )),
            ]),
            Line::from_iter([
                Span::raw(" ".repeat(LABEL_WIDTH)),
                Span::styled(activity.comments, PLACEHOLDER_STYLE),
            ]),
            Line::from_iter([self.label(Field::StartDate), date_span(range.start())]),
            Line::from_iter([self.label(Field::EndDate), date_span(range.end())]),
        ];
        let description = if self.form.description().is_empty() {
            Span::styled(DESCRIPTION_PLACEHOLDER, PLACEHOLDER_STYLE)
        } else {
            Span::raw(self.form.description())
        };
        lines.push(Line::from_iter([self.label(Field::Description), description]));
        let attachment = match self.form.attachment() {
            Some(a) => Span::raw(a.summary()),
            None if self.attachment_input.is_empty() => {
                Span::styled(ATTACHMENT_PLACEHOLDER, PLACEHOLDER_STYLE)
            }
            None => Span::raw(self.attachment_input.as_str()),
        };
        lines.push(Line::from_iter([self.label(Field::Attachment), attachment]));
        lines.push(Line::raw(""));
        lines.push(Line::from_iter([
            Span::raw(" ".repeat(LABEL_WIDTH)),
            self.button(Field::Submit),
            Span::raw("  "),
            self.button(Field::Reset),
        ]));
        Text::from(lines)
    }

    fn button(&self, field: Field) -> Span<'static> {
        let style = if self.focus == field {
            FOCUS_STYLE.add_modifier(Modifier::REVERSED)
        } else {
            LABEL_STYLE
        };
        Span::styled(format!("[ {} ]", field.label()), style)
    }
}

impl<K: ClaimSink, R: Reporter> Widget for &mut App<K, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [header_area, form_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [title_area, user_area, _] = Layout::vertical([1, 1, 1]).areas(header_area);
        Line::styled(TITLE, HEADER_STYLE).render(title_area, buf);
        let score = self.sink.score();
        Line::styled(format!("Score: {score} / {TARGET_POINTS} pts"), SCORE_STYLE)
            .alignment(Alignment::Right)
            .render(title_area, buf);
        Line::styled(
            format!(
                "Signed in as {} <{}>",
                self.session.name(),
                self.session.email()
            ),
            LABEL_STYLE,
        )
        .render(user_area, buf);
        let progress = match points_needed(score) {
            0 => String::from("Target met for this year"),
            n => format!("{} needed this year", points(n)),
        };
        Line::styled(progress, LABEL_STYLE)
            .alignment(Alignment::Right)
            .render(user_area, buf);
        Paragraph::new(self.form_text())
            .render(form_area.inner(Margin::new(1, 0)), buf);
        Line::styled(FOOTER, PLACEHOLDER_STYLE)
            .render(footer_area, buf);
        match self.state {
            AppState::Picking(DateField::Start) => {
                PickerPopup.render(area, buf, &mut self.start_picker);
            }
            AppState::Picking(DateField::End) => {
                PickerPopup.render(area, buf, &mut self.end_picker);
            }
            AppState::Alerting(ref alert) => AlertPopup {
                alert,
                style: BASE_STYLE,
            }
            .render(area, buf),
            AppState::Helping => Help(BASE_STYLE).render(area, buf),
            AppState::Listing(list, cursor) => {
                let width = area.width.saturating_sub(4);
                let height = area.height.saturating_sub(4);
                let popup = popup_area(area, width, height);
                match list {
                    ListOverlay::History => {
                        let items = history_items(self.sink.history());
                        render_list(popup, buf, " Claim History ", items, cursor);
                    }
                    ListOverlay::PointsTable => {
                        let items = points_table_items();
                        render_list(popup, buf, " Points Table ", items, cursor);
                    }
                }
            }
            AppState::Form | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Form,
    Picking(DateField),
    Alerting(Alert),
    Helping,
    /// A scrollable list over the form, with the cursor at the given index
    Listing(ListOverlay, usize),
    Quitting,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ListOverlay {
    History,
    PointsTable,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum DateField {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Field {
    Activity,
    StartDate,
    EndDate,
    Description,
    Attachment,
    Submit,
    Reset,
}

static FIELDS: [Field; 7] = [
    Field::Activity,
    Field::StartDate,
    Field::EndDate,
    Field::Description,
    Field::Attachment,
    Field::Submit,
    Field::Reset,
];

impl Field {
    fn label(self) -> &'static str {
        match self {
            Field::Activity => "Activity",
            Field::StartDate => "Start date",
            Field::EndDate => "End date",
            Field::Description => "Description",
            Field::Attachment => "Evidence",
            Field::Submit => "Submit",
            Field::Reset => "Reset",
        }
    }

    fn position(self) -> usize {
        FIELDS.iter().position(|&f| f == self).unwrap_or_default()
    }

    fn next(self) -> Field {
        FIELDS[(self.position() + 1) % FIELDS.len()]
    }

    fn previous(self) -> Field {
        FIELDS[(self.position() + FIELDS.len() - 1) % FIELDS.len()]
    }
}

fn picker_input(key: KeyCode) -> Option<PickerInput> {
    match key {
        KeyCode::Up => Some(PickerInput::Up),
        KeyCode::Down => Some(PickerInput::Down),
        KeyCode::Left => Some(PickerInput::Left),
        KeyCode::Right => Some(PickerInput::Right),
        KeyCode::PageUp | KeyCode::Char('<' | ',') => Some(PickerInput::PreviousMonth),
        KeyCode::PageDown | KeyCode::Char('>' | '.') => Some(PickerInput::NextMonth),
        KeyCode::Char('y') => Some(PickerInput::Years),
        KeyCode::Char('m') => Some(PickerInput::Months),
        KeyCode::Enter => Some(PickerInput::Enter),
        KeyCode::Esc => Some(PickerInput::Close),
        _ => None,
    }
}

fn date_span(date: Option<Date>) -> Span<'static> {
    match date {
        Some(d) => Span::raw(format_date(d)),
        None => Span::styled(DATE_PLACEHOLDER, PLACEHOLDER_STYLE),
    }
}

/// Formats a date as DD/MM/YYYY
fn format_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// One line per submitted claim, newest first
fn history_items(records: &[ClaimRecord]) -> Vec<ListItem<'static>> {
    if records.is_empty() {
        return vec![ListItem::new(Line::styled(NO_CLAIMS, PLACEHOLDER_STYLE))];
    }
    records
        .iter()
        .rev()
        .map(|r| {
            ListItem::new(Line::from_iter([
                Span::raw(format!("{}  ", format_date(r.start))),
                Span::styled(format!("{:<8}", r.status.label()), status_style(r.status)),
                Span::raw(format!("  {:>6}  ", points(r.activity.points))),
                Span::raw(r.description.clone()),
                Span::styled(
                    format!("  ({})", r.activity.description),
                    PLACEHOLDER_STYLE,
                ),
            ]))
        })
        .collect()
}

/// Each activity on one line with its conditions indented below
fn points_table_items() -> Vec<ListItem<'static>> {
    points_table()
        .into_iter()
        .map(|a| {
            ListItem::new(Text::from(vec![
                Line::raw(format!("{:>6}  {}", points(a.points), a.description)),
                Line::styled(format!("        {}", a.comments), PLACEHOLDER_STYLE),
            ]))
        })
        .collect()
}

fn status_style(status: ClaimStatus) -> Style {
    match status {
        ClaimStatus::Pending => PENDING_STYLE,
        ClaimStatus::Approved => APPROVED_STYLE,
        ClaimStatus::Rejected => REJECTED_STYLE,
    }
}

fn points(n: u32) -> String {
    if n == 1 {
        String::from("1 pt")
    } else {
        format!("{n} pts")
    }
}
