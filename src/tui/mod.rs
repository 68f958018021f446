// SPDX-FileCopyrightText: 2026 Rolodex contributors
// SPDX-License-Identifier: MIT

//! Terminal UI.
//!
//! Ratatui/crossterm shell for the contact table: arrow-key navigation,
//! inline cell editing with batched save, and blocking stdin prompts for
//! the delete/create/edit dialogs (run with the terminal suspended).

use std::error::Error;
use std::io::{self, Write as _};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use smol_str::SmolStr;

use crate::coordinator::RecordListCoordinator;
use crate::edit::{EditSurface, RegionId};
use crate::model::{Field, ParentId, Record, RecordId};
use crate::remote::{
    ConfirmDialog, ConfirmOutcome, CreateEditDialog, DialogMode, DialogOutcome, DialogRequest,
    Notifier, SharedSource,
};
use crate::table::{ContactTable, Signal};

const DIRTY_BG: Color = Color::Rgb(0xFF, 0xFE, 0xD1);
const DIRTY_FG: Color = Color::Black;
const HEADER_COLOR: Color = Color::Cyan;
const FOOTER_COLOR: Color = Color::Gray;
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Runs the interactive contact table against the given source.
pub fn run(source: SharedSource, parent_id: ParentId) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(source, parent_id);
    app.bootstrap();

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if let Some(prompt) = app.take_pending_prompt() {
                        let result = terminal.run_external_action(|| app.run_prompt(prompt));
                        if let Err(err) = result {
                            app.toast = Some(format!("Prompt failed: {err}"));
                        }
                    }
                    app.pump_signals();
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Dialog interactions deferred until the terminal can be suspended.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingPrompt {
    ConfirmDelete { record_id: RecordId },
    EditRecord { record_id: RecordId },
    CreateRecord,
}

struct App {
    source: SharedSource,
    coordinator: RecordListCoordinator,
    table: ContactTable,
    grid: CellGrid,
    selected_row: usize,
    selected_col: usize,
    editor: String,
    toast: Option<String>,
    pending_prompt: Option<PendingPrompt>,
    should_quit: bool,
}

impl App {
    fn new(source: SharedSource, parent_id: ParentId) -> Self {
        Self {
            source,
            coordinator: RecordListCoordinator::new(parent_id.clone()),
            table: ContactTable::new(parent_id),
            grid: CellGrid::default(),
            selected_row: 0,
            selected_col: 0,
            editor: String::new(),
            toast: None,
            pending_prompt: None,
            should_quit: false,
        }
    }

    fn bootstrap(&mut self) {
        let mut remote = self.source.clone();
        if let Err(err) = self.coordinator.refresh(&mut remote) {
            self.toast = Some(format!("Error: {}", err.user_message()));
        }
        self.table.load_picklist(&mut remote);
        self.sync_table();
    }

    /// Rebuilds the child rows and the render grid from the canonical
    /// list.
    fn sync_table(&mut self) {
        let parent_name = self.coordinator.parent_name().to_owned();
        self.table.set_records(&parent_name, self.coordinator.records());
        self.grid.rebuild(&self.table);
        let rows = self.table.rows().len();
        if rows == 0 {
            self.selected_row = 0;
        } else if self.selected_row >= rows {
            self.selected_row = rows - 1;
        }
    }

    fn take_pending_prompt(&mut self) -> Option<PendingPrompt> {
        self.pending_prompt.take()
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.table.controller().session().is_some() {
            self.handle_editor_key(key);
        } else {
            self.handle_browse_key(key);
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let field = self.table.controller().session().map(|session| session.field());
        match key.code {
            KeyCode::Char('s') if ctrl => {
                // blur first so the typed value joins the batch
                self.blur();
                self.save();
            }
            KeyCode::Esc => self.cancel_all(),
            KeyCode::Enter => self.blur(),
            KeyCode::Tab => {
                self.blur();
                self.move_col(1);
            }
            KeyCode::Up if field.map(Field::is_picklist).unwrap_or(false) => {
                self.cycle_lead_source(-1);
            }
            KeyCode::Down if field.map(Field::is_picklist).unwrap_or(false) => {
                self.cycle_lead_source(1);
            }
            KeyCode::Backspace => {
                self.editor.pop();
                self.push_editor_value();
            }
            KeyCode::Char(c) if !ctrl => {
                self.editor.push(c);
                self.push_editor_value();
            }
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left => self.move_col(-1),
            KeyCode::Right | KeyCode::Tab => self.move_col(1),
            KeyCode::Up => self.move_row(-1),
            KeyCode::Down => self.move_row(1),
            KeyCode::Enter => self.open_selected_cell(),
            KeyCode::Char('s') => self.save(),
            KeyCode::Esc => {
                if self.table.controller().has_pending_changes() {
                    self.cancel_all();
                }
            }
            KeyCode::Char('d') => self.queue_row_prompt(|record_id| PendingPrompt::ConfirmDelete {
                record_id,
            }),
            KeyCode::Char('e') => self.queue_row_prompt(|record_id| PendingPrompt::EditRecord {
                record_id,
            }),
            KeyCode::Char('n') => self.pending_prompt = Some(PendingPrompt::CreateRecord),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('o') => {
                let target = self
                    .table
                    .detail_target(self.selected_row)
                    .map(|record_id| format!("Open contact {record_id} in the detail view"));
                if let Some(message) = target {
                    self.toast = Some(message);
                }
            }
            _ => {}
        }
    }

    fn queue_row_prompt(&mut self, build: impl FnOnce(RecordId) -> PendingPrompt) {
        if let Some(record_id) = self.table.detail_target(self.selected_row).cloned() {
            self.pending_prompt = Some(build(record_id));
        }
    }

    fn move_row(&mut self, delta: isize) {
        let rows = self.table.rows().len();
        if rows == 0 {
            return;
        }
        let row = self.selected_row as isize + delta;
        self.selected_row = row.clamp(0, rows as isize - 1) as usize;
    }

    fn move_col(&mut self, delta: isize) {
        let cols = Field::ALL.len() as isize;
        let col = (self.selected_col as isize + delta).rem_euclid(cols);
        self.selected_col = col as usize;
    }

    fn open_selected_cell(&mut self) {
        if self.table.rows().is_empty() {
            return;
        }
        let field = Field::ALL[self.selected_col];
        self.editor = self.table.display_value(self.selected_row, field).to_owned();
        if let Err(err) = self.table.open_cell(&mut self.grid, self.selected_row, field) {
            self.toast = Some(err.to_string());
        }
    }

    fn push_editor_value(&mut self) {
        let value = self.editor.clone();
        if let Err(err) = self.table.edit_value(&value) {
            self.toast = Some(err.to_string());
        }
    }

    fn cycle_lead_source(&mut self, delta: isize) {
        let next = {
            let options = self.table.lead_sources();
            if options.is_empty() {
                return;
            }
            let index = options.iter().position(|option| option.value == self.editor);
            let next = match index {
                Some(current) => {
                    (current as isize + delta).rem_euclid(options.len() as isize) as usize
                }
                None => 0,
            };
            options[next].value.clone()
        };
        self.editor = next;
        self.push_editor_value();
    }

    fn blur(&mut self) {
        self.table.blur(&mut self.grid);
        self.editor.clear();
    }

    fn cancel_all(&mut self) {
        self.table.cancel(&mut self.grid);
        self.editor.clear();
    }

    fn save(&mut self) {
        let mut remote = self.source.clone();
        let mut sink = ToastSink {
            line: &mut self.toast,
        };
        self.table.save(&mut self.grid, &mut remote, &mut sink);
    }

    fn refresh(&mut self) {
        let mut remote = self.source.clone();
        let mut sink = ToastSink {
            line: &mut self.toast,
        };
        self.coordinator
            .handle_signal(Signal::RefreshRequested, &mut remote, &mut sink);
        self.sync_table();
    }

    fn pump_signals(&mut self) {
        let signals = self.table.drain_signals();
        if signals.is_empty() {
            return;
        }
        {
            let mut remote = self.source.clone();
            let mut sink = ToastSink {
                line: &mut self.toast,
            };
            for signal in signals {
                self.coordinator.handle_signal(signal, &mut remote, &mut sink);
            }
        }
        self.sync_table();
    }

    /// Runs one deferred dialog; the caller has already suspended the
    /// terminal session.
    fn run_prompt(&mut self, prompt: PendingPrompt) -> Result<(), String> {
        let mut dialog = StdinPrompt::new(self.source.clone());
        match prompt {
            PendingPrompt::ConfirmDelete { record_id } => {
                self.table.request_delete(&mut dialog, &record_id);
            }
            PendingPrompt::EditRecord { record_id } => {
                self.table.request_edit(&mut dialog, &record_id);
            }
            PendingPrompt::CreateRecord => {
                let mut remote = self.source.clone();
                let mut sink = ToastSink {
                    line: &mut self.toast,
                };
                self.coordinator.request_create(&mut dialog, &mut remote, &mut sink);
            }
        }
        let result = dialog.finish();
        self.sync_table();
        result
    }
}

/// Writes notifications onto the single toast line.
struct ToastSink<'a> {
    line: &'a mut Option<String>,
}

impl Notifier for ToastSink<'_> {
    fn success(&mut self, title: &str, message: &str) {
        *self.line = Some(format!("{title}: {message}"));
    }

    fn error(&mut self, title: &str, message: &str) {
        *self.line = Some(format!("{title}: {message}"));
    }
}

/// Render-side state of every editable cell, addressed by the same
/// row-major region ids the table registers with the controller.
#[derive(Debug, Default)]
struct CellGrid {
    cells: Vec<CellState>,
}

#[derive(Debug, Clone, Default)]
struct CellState {
    text: SmolStr,
    dirty: bool,
    editing: bool,
    focused: bool,
}

impl CellGrid {
    fn rebuild(&mut self, table: &ContactTable) {
        self.cells = (0..table.rows().len())
            .flat_map(|row| {
                Field::ALL.into_iter().map(move |field| (row, field))
            })
            .map(|(row, field)| CellState {
                text: SmolStr::new(table.display_value(row, field)),
                dirty: table
                    .controller()
                    .pending_value(table.rows()[row].record().record_id(), field)
                    .is_some(),
                editing: false,
                focused: false,
            })
            .collect();
    }

    fn cell(&self, row: usize, col: usize) -> Option<&CellState> {
        self.cells.get(row * Field::ALL.len() + col)
    }

    fn cell_state_mut(&mut self, region: RegionId) -> Option<&mut CellState> {
        self.cells.get_mut(region.0)
    }
}

impl EditSurface for CellGrid {
    fn show_editor(&mut self, region: RegionId) {
        if let Some(cell) = self.cell_state_mut(region) {
            cell.editing = true;
        }
    }

    fn hide_editor(&mut self, region: RegionId) {
        if let Some(cell) = self.cell_state_mut(region) {
            cell.editing = false;
            cell.focused = false;
        }
    }

    fn focus_editor(&mut self, region: RegionId) {
        for cell in &mut self.cells {
            cell.focused = false;
        }
        if let Some(cell) = self.cell_state_mut(region) {
            cell.focused = true;
        }
    }

    fn set_cell_text(&mut self, region: RegionId, text: &str) {
        if let Some(cell) = self.cell_state_mut(region) {
            cell.text = SmolStr::new(text);
        }
    }

    fn set_dirty_background(&mut self, region: RegionId, dirty: bool) {
        if let Some(cell) = self.cell_state_mut(region) {
            cell.dirty = dirty;
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_line(
        app.coordinator.card_title(),
        app.coordinator.parent_name(),
    ));
    frame.render_widget(header, layout[0]);

    let column_header = Row::new(
        Field::ALL
            .iter()
            .map(|field| Cell::from(field.label()))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD));

    let mut rows = Vec::with_capacity(app.table.rows().len());
    for row in 0..app.table.rows().len() {
        let mut cells = Vec::with_capacity(Field::ALL.len());
        for col in 0..Field::ALL.len() {
            let state = app.grid.cell(row, col);
            let editing = state.map(|cell| cell.editing).unwrap_or(false);
            let dirty = state.map(|cell| cell.dirty).unwrap_or(false);
            let selected = row == app.selected_row && col == app.selected_col;
            let text = if editing {
                format!("{}▏", app.editor)
            } else {
                state.map(|cell| cell.text.to_string()).unwrap_or_default()
            };
            cells.push(Cell::from(text).style(cell_style(selected, dirty, editing)));
        }
        rows.push(Row::new(cells));
    }

    let widths = [Constraint::Percentage(20); 5];
    let table = Table::new(rows, widths)
        .header(column_header)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(table, layout[1]);

    let footer_text = match &app.toast {
        Some(toast) => toast.clone(),
        None => footer_hints(
            app.table.controller().session().is_some(),
            app.table.controller().has_pending_changes(),
        ),
    };
    let footer = Paragraph::new(footer_text).style(Style::default().fg(FOOTER_COLOR));
    frame.render_widget(footer, layout[2]);
}

fn header_line(card_title: &str, parent_name: &str) -> Line<'static> {
    let mut spans = vec![Span::styled(
        card_title.to_owned(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if !parent_name.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            parent_name.to_owned(),
            Style::default().fg(HEADER_COLOR),
        ));
    }
    Line::from(spans)
}

fn footer_hints(editor_open: bool, pending_changes: bool) -> String {
    if editor_open {
        "type to edit  Enter/Tab blur  ^S save  Esc discard".to_owned()
    } else if pending_changes {
        "Enter edit  s save  Esc discard  arrows move".to_owned()
    } else {
        "Enter edit  d delete  e edit form  n new  r refresh  o open  q quit".to_owned()
    }
}

fn cell_style(selected: bool, dirty: bool, editing: bool) -> Style {
    let mut style = Style::default();
    if dirty {
        style = style.bg(DIRTY_BG).fg(DIRTY_FG);
    }
    if editing {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

/// Blocking stdin prompts backing the dialog contracts; used only while
/// the terminal session is suspended.
struct StdinPrompt {
    source: SharedSource,
    failure: Option<String>,
}

impl StdinPrompt {
    fn new(source: SharedSource) -> Self {
        Self {
            source,
            failure: None,
        }
    }

    fn finish(self) -> Result<(), String> {
        match self.failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        if let Err(err) = io::stdout().flush() {
            self.failure = Some(err.to_string());
            return None;
        }
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_owned()),
            Err(err) => {
                self.failure = Some(err.to_string());
                None
            }
        }
    }

    /// One line per field; an empty answer keeps the existing value.
    fn prompt_fields(&mut self, existing: Option<&Record>) -> Option<Vec<(Field, String)>> {
        let mut values = Vec::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            let current = existing.map(|record| record.get(field)).unwrap_or("");
            let label = if current.is_empty() {
                format!("{}: ", field.label())
            } else {
                format!("{} [{current}]: ", field.label())
            };
            let input = self.read_line(&label)?;
            let value = if input.is_empty() {
                current.to_owned()
            } else {
                input
            };
            values.push((field, value));
        }
        Some(values)
    }
}

impl ConfirmDialog for StdinPrompt {
    fn confirm_delete(&mut self, record: Option<&Record>) -> ConfirmOutcome {
        let name = record
            .map(Record::display_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "this contact".to_owned());
        match self.read_line(&format!("Delete {name}? [y/N] ")) {
            Some(answer) if answer.eq_ignore_ascii_case("y") => ConfirmOutcome::Proceed,
            _ => ConfirmOutcome::Dismissed,
        }
    }
}

impl CreateEditDialog for StdinPrompt {
    fn open(&mut self, request: DialogRequest<'_>) -> DialogOutcome {
        let heading = match request.mode {
            DialogMode::Create => "New",
            DialogMode::Edit => "Edit",
        };
        println!("{heading} contact for {}", request.parent_name);

        let Some(values) = self.prompt_fields(request.record) else {
            return DialogOutcome::Dismissed;
        };
        let blank_required = values
            .iter()
            .any(|(field, value)| field.is_required() && value.trim().is_empty());
        if blank_required {
            println!("Last Name value cannot be blank.");
            return DialogOutcome::Dismissed;
        }

        let result = match (request.mode, request.record) {
            (DialogMode::Create, _) => self
                .source
                .with_mut(|source| source.create_record(request.parent_id, &values))
                .map(|_| ()),
            (DialogMode::Edit, Some(record)) => self
                .source
                .with_mut(|source| source.update_record(record.record_id(), &values)),
            (DialogMode::Edit, None) => return DialogOutcome::Dismissed,
        };
        match result {
            Ok(()) => DialogOutcome::Saved,
            Err(err) => {
                println!("{}", err.user_message());
                DialogOutcome::Dismissed
            }
        }
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }

    /// Leaves raw mode and the alternate screen for the duration of the
    /// action, then restores both.
    fn run_external_action(
        &mut self,
        action: impl FnOnce() -> Result<(), String>,
    ) -> Result<(), String> {
        let _suspend = TerminalSuspendGuard::new(&mut self.terminal)
            .map_err(|err| format!("terminal suspend failed: {err}"))?;
        action()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

struct TerminalSuspendGuard<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<Self> {
        terminal.show_cursor()?;
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        ratatui::backend::Backend::flush(terminal.backend_mut())?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), EnterAlternateScreen);
        let _ = self.terminal.clear();
        let _ = self.terminal.hide_cursor();
        let _ = ratatui::backend::Backend::flush(self.terminal.backend_mut());
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
