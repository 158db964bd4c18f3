use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{debug, error, info, warn};

use crate::config::DeletePolicy;
use crate::gateway::MonkeyGateway;
use crate::models::{Monkey, MonkeyId};

use super::forms::{ConfirmDelete, MonkeyField, MonkeyForm};
use super::helpers::{build_card_lines, centered_rect, first_visible_row, surface_error};
use super::screens::{CatalogScreen, SpeciesPicker};
use super::theme::{Palette, ThemeKind};

/// Number of record cards per grid row.
const GRID_COLUMNS: usize = 3;
/// Height of a single card, borders included.
const CARD_HEIGHT: u16 = 9;
const HEADER_HEIGHT: u16 = 3;
const TOOLBAR_HEIGHT: u16 = 1;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 4;

const SEARCH_PREFIX: &str = "Search: ";
const SEARCH_PLACEHOLDER: &str = "Search monkeys by name or species...";
const SAVE_FAILED: &str = "Failed to save monkey";

/// What the keyboard currently drives. `Creating` and `Editing` are the two
/// open states of the record modal; everything else leaves it closed.
enum Mode {
    Normal,
    Searching,
    PickingSpecies(SpeciesPicker),
    Creating(MonkeyForm),
    Editing { id: MonkeyId, form: MonkeyForm },
    ConfirmDelete(ConfirmDelete),
}

impl Mode {
    fn with_form(editing: Option<MonkeyId>, form: MonkeyForm) -> Mode {
        match editing {
            Some(id) => Mode::Editing { id, form },
            None => Mode::Creating(form),
        }
    }
}

/// Footer notification text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// The catalogue view: record state, the active mode, and the gateway every
/// write goes through.
pub struct App {
    gateway: Box<dyn MonkeyGateway>,
    screen: CatalogScreen,
    mode: Mode,
    theme: ThemeKind,
    delete_policy: DeletePolicy,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        gateway: Box<dyn MonkeyGateway>,
        theme: ThemeKind,
        delete_policy: DeletePolicy,
    ) -> Self {
        Self {
            gateway,
            screen: CatalogScreen::new(Vec::new()),
            mode: Mode::Normal,
            theme,
            delete_policy,
            status: None,
        }
    }

    /// Replace the in-memory records with the gateway's current list. A
    /// failed load keeps what is already on screen and is only logged.
    pub fn load_all(&mut self) {
        match self.gateway.list() {
            Ok(monkeys) => {
                debug!(count = monkeys.len(), "monkeys loaded");
                self.screen.set_monkeys(monkeys);
            }
            Err(err) => error!("failed to load monkeys: {err:#}"),
        }
    }

    /// Records that pass the current search and species filter.
    pub fn visible(&self) -> &[Monkey] {
        &self.screen.visible
    }

    pub fn theme(&self) -> ThemeKind {
        self.theme
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Searching => self.handle_search(code),
            Mode::PickingSpecies(picker) => self.handle_species_picker(code, picker),
            Mode::Creating(form) => self.handle_form(code, None, form),
            Mode::Editing { id, form } => self.handle_form(code, Some(id), form),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') => *exit = true,
            KeyCode::Esc => {
                if self.screen.search.is_empty() {
                    *exit = true;
                } else {
                    self.screen.set_search(String::new());
                }
            }
            KeyCode::Left => self.screen.move_selection(-1),
            KeyCode::Right => self.screen.move_selection(1),
            KeyCode::Up => self.screen.move_selection(-(GRID_COLUMNS as isize)),
            KeyCode::Down => self.screen.move_selection(GRID_COLUMNS as isize),
            KeyCode::Home => self.screen.select_first(),
            KeyCode::End => self.screen.select_last(),
            KeyCode::Char('/') => {
                self.clear_status();
                return Ok(Mode::Searching);
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.clear_status();
                return Ok(Mode::PickingSpecies(SpeciesPicker::new(self.screen.species)));
            }
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Ok(self.open_create_form());
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                if let Some(mode) = self.open_edit_form() {
                    self.clear_status();
                    return Ok(mode);
                }
                self.set_status("No monkey selected to edit.", StatusKind::Error);
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                if let Some(mode) = self.request_delete() {
                    self.clear_status();
                    return Ok(mode);
                }
                self.set_status("No monkey selected to delete.", StatusKind::Error);
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.theme = self.theme.toggle();
                self.set_status(
                    format!("Switched to the {} theme.", self.theme.label().to_lowercase()),
                    StatusKind::Info,
                );
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.clear_status();
                self.load_all();
            }
            KeyCode::Enter => self.open_image()?,
            _ => {}
        }
        Ok(Mode::Normal)
    }

    /// Fresh, empty form. No gateway traffic.
    fn open_create_form(&self) -> Mode {
        let mut form = MonkeyForm::default();
        form.focus(MonkeyField::Name);
        Mode::Creating(form)
    }

    /// Form pre-populated from the selected card, if any.
    fn open_edit_form(&self) -> Option<Mode> {
        let monkey = self.screen.current_monkey()?;
        Some(Mode::Editing {
            id: monkey.id,
            form: MonkeyForm::from_monkey(monkey),
        })
    }

    fn request_delete(&self) -> Option<Mode> {
        let monkey = self.screen.current_monkey()?;
        Some(Mode::ConfirmDelete(ConfirmDelete::from(monkey)))
    }

    fn open_image(&mut self) -> Result<()> {
        let Some(monkey) = self.screen.current_monkey() else {
            self.set_status("No monkey selected.", StatusKind::Error);
            return Ok(());
        };
        let Some(url) = monkey.image_url.clone() else {
            let message = format!("{} does not have an image URL.", monkey.name);
            self.set_status(message, StatusKind::Error);
            return Ok(());
        };
        match open_link(&url) {
            Ok(()) => self.set_status(format!("Opened {url}"), StatusKind::Info),
            Err(err) => {
                self.set_status(format!("Failed to open link: {err}"), StatusKind::Error)
            }
        }
        Ok(())
    }

    fn handle_search(&mut self, code: KeyCode) -> Mode {
        match code {
            KeyCode::Esc => {
                self.screen.set_search(String::new());
                return Mode::Normal;
            }
            KeyCode::Enter => return Mode::Normal,
            KeyCode::Backspace => self.screen.pop_search_char(),
            KeyCode::Left => self.screen.move_selection(-1),
            KeyCode::Right => self.screen.move_selection(1),
            KeyCode::Up => self.screen.move_selection(-(GRID_COLUMNS as isize)),
            KeyCode::Down => self.screen.move_selection(GRID_COLUMNS as isize),
            KeyCode::Char(ch) if !ch.is_control() => self.screen.push_search_char(ch),
            _ => {}
        }
        Mode::Searching
    }

    fn handle_species_picker(&mut self, code: KeyCode, mut picker: SpeciesPicker) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Up => picker.move_selection(-1),
            KeyCode::Down => picker.move_selection(1),
            KeyCode::PageUp | KeyCode::Home => picker.select_first(),
            KeyCode::PageDown | KeyCode::End => picker.select_last(),
            KeyCode::Enter => {
                self.screen.set_species_filter(picker.current());
                return Mode::Normal;
            }
            _ => {}
        }
        Mode::PickingSpecies(picker)
    }

    fn handle_form(
        &mut self,
        code: KeyCode,
        editing: Option<MonkeyId>,
        mut form: MonkeyForm,
    ) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Tab | KeyCode::Down => form.move_focus(1),
            KeyCode::BackTab | KeyCode::Up => form.move_focus(-1),
            KeyCode::Left if form.active == MonkeyField::Species => form.cycle_species(-1),
            KeyCode::Right if form.active == MonkeyField::Species => form.cycle_species(1),
            KeyCode::Backspace => {
                form.backspace();
                form.error = None;
            }
            KeyCode::Enter => return self.submit(editing, form),
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::with_form(editing, form)
    }

    /// Validate, then create or update depending on whether a record is being
    /// edited. Success closes the modal and reloads; any failure leaves the
    /// form open with its contents intact.
    fn submit(&mut self, editing: Option<MonkeyId>, mut form: MonkeyForm) -> Mode {
        let fields = match form.parse_inputs() {
            Ok(fields) => fields,
            Err(err) => {
                let message = err.to_string();
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
                return Mode::with_form(editing, form);
            }
        };

        let saved = match editing {
            Some(id) => self
                .gateway
                .update(id, &fields)
                .map(|monkey| (monkey.id, "Monkey updated successfully!")),
            None => self
                .gateway
                .create(&fields)
                .map(|monkey| (monkey.id, "Monkey added successfully!")),
        };

        match saved {
            Ok((id, message)) => {
                self.load_all();
                self.screen.focus(id);
                self.set_status(message, StatusKind::Info);
                Mode::Normal
            }
            Err(err) => {
                warn!("failed to save monkey: {err:#}");
                form.error = Some(surface_error(&err));
                self.set_status(SAVE_FAILED, StatusKind::Error);
                Mode::with_form(editing, form)
            }
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.perform_delete(confirm)
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn perform_delete(&mut self, confirm: ConfirmDelete) -> Mode {
        match self.delete_policy {
            DeletePolicy::Simulated => {
                info!(id = %confirm.id, "simulated delete, record kept");
                self.set_status(
                    "Monkey deleted successfully! (simulated: the record was kept)",
                    StatusKind::Info,
                );
                self.load_all();
                Mode::Normal
            }
            DeletePolicy::Permanent => match self.gateway.delete(confirm.id) {
                Ok(()) => {
                    self.set_status("Monkey deleted successfully!", StatusKind::Info);
                    self.load_all();
                    Mode::Normal
                }
                Err(err) => {
                    warn!(id = %confirm.id, "failed to delete monkey: {err:#}");
                    self.set_status("Failed to delete monkey", StatusKind::Error);
                    Mode::ConfirmDelete(confirm)
                }
            },
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let palette = self.theme.palette();
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
            area,
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Length(TOOLBAR_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0], &palette);
        self.draw_toolbar(frame, chunks[1], &palette);
        self.draw_grid(frame, chunks[2], &palette);
        self.draw_footer(frame, chunks[3], &palette);

        match &self.mode {
            Mode::Creating(form) => self.draw_form(frame, area, "Add New Monkey", "Add", form),
            Mode::Editing { form, .. } => {
                self.draw_form(frame, area, "Edit Monkey", "Update", form)
            }
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::PickingSpecies(picker) => self.draw_species_picker(frame, area, picker),
            Mode::Searching => {
                let cursor_x = chunks[1].x
                    + SEARCH_PREFIX.len() as u16
                    + self.screen.search.chars().count() as u16;
                frame.set_cursor_position((cursor_x, chunks[1].y));
            }
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let lines = vec![
            Line::from(Span::styled(
                "🦍 Ape Kingdom 🐒",
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Discover and learn about amazing primates from around the world!",
                Style::default().fg(palette.muted),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }

    fn draw_toolbar(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let searching = matches!(self.mode, Mode::Searching);
        let search = if self.screen.search.is_empty() && !searching {
            Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(palette.muted))
        } else {
            Span::styled(self.screen.search.clone(), Style::default().fg(palette.text))
        };
        let label_style = if searching {
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };

        let line = Line::from(vec![
            Span::styled(SEARCH_PREFIX, label_style),
            search,
            Span::raw("   "),
            Span::styled("Species: ", Style::default().fg(palette.muted)),
            Span::styled(self.screen.species.label(), Style::default().fg(palette.accent)),
            Span::raw("   "),
            Span::styled("Theme: ", Style::default().fg(palette.muted)),
            Span::styled(self.theme.label(), Style::default().fg(palette.accent)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let monkeys = &self.screen.visible;
        if monkeys.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from("🙈"),
                Line::from(Span::styled(
                    "No monkeys found",
                    Style::default()
                        .fg(palette.text)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Try adjusting your search or add some monkeys to get started!",
                    Style::default().fg(palette.muted),
                )),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
            return;
        }
        if area.height == 0 {
            return;
        }

        let total_rows = monkeys.len().div_ceil(GRID_COLUMNS);
        let capacity = ((area.height / CARD_HEIGHT) as usize).max(1);
        let start = first_visible_row(self.screen.selected / GRID_COLUMNS, total_rows, capacity);
        let end = (start + capacity).min(total_rows);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); end - start])
            .split(area);

        for (offset, row_area) in rows.iter().enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                .split(*row_area);

            for (col, card_area) in columns.iter().enumerate() {
                let index = (start + offset) * GRID_COLUMNS + col;
                let Some(monkey) = monkeys.get(index) else {
                    break;
                };
                let selected = index == self.screen.selected;
                let border = if selected {
                    Style::default().fg(palette.selection)
                } else {
                    Style::default().fg(palette.border)
                };
                let block = Block::default().borders(Borders::ALL).border_style(border);
                let card = Paragraph::new(build_card_lines(monkey, palette, selected))
                    .block(block)
                    .wrap(Wrap { trim: true });
                frame.render_widget(card, *card_area);
            }
        }
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(palette.border));
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("[←↑↓→]", " Navigate   "),
                ("[/]", " Search   "),
                ("[f]", " Species   "),
                ("[+]", " Add   "),
                ("[e]", " Edit   "),
                ("[-]", " Delete   "),
                ("[Enter]", " Image   "),
                ("[t]", " Theme   "),
                ("[r]", " Reload   "),
                ("[q]", " Quit"),
            ],
            Mode::Searching => &[
                ("[Type]", " Filter   "),
                ("[Enter]", " Keep   "),
                ("[Esc]", " Clear"),
            ],
            Mode::PickingSpecies(_) => &[
                ("[↑↓]", " Navigate   "),
                ("[Enter]", " Apply   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::Creating(_) | Mode::Editing { .. } => &[
                ("[Tab]", " Next field   "),
                ("[←→]", " Species   "),
                ("[Space]", " Toggle   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmDelete(_) => &[("[y]", " Delete   "), ("[n]", " Cancel")],
        };

        Line::from(
            hints
                .iter()
                .flat_map(|(key, text)| [Span::styled(*key, key_style), Span::raw(*text)])
                .collect::<Vec<_>>(),
        )
    }

    fn draw_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        action: &str,
        form: &MonkeyForm,
    ) {
        let popup_area = centered_rect(70, 70, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = MonkeyField::ORDER
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Enter to {action} Monkey • Tab to switch • Esc to cancel"),
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if !matches!(form.active, MonkeyField::Species | MonkeyField::Endangered) {
            let row = MonkeyField::ORDER
                .iter()
                .position(|field| *field == form.active)
                .unwrap_or(0) as u16;
            let prefix = form.active.label().len() as u16 + 2;
            let cursor_x = inner.x + prefix + form.value_len(form.active) as u16;
            frame.set_cursor_position((cursor_x, inner.y + row));
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Delete Monkey").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            Line::from("Are you sure you want to delete this monkey?"),
            Line::from(Span::styled(
                confirm.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        if self.delete_policy == DeletePolicy::Simulated {
            lines.push(Line::from(Span::styled(
                "Deletes are simulated; the record will stay in the catalogue.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(Span::styled(
            "[y] Delete   [n] Cancel",
            Style::default().fg(Color::Red),
        )));

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_species_picker(&self, frame: &mut Frame, area: Rect, picker: &SpeciesPicker) {
        let popup_area = centered_rect(40, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Species").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let items: Vec<ListItem> = picker
            .options
            .iter()
            .map(|option| ListItem::new(option.label()))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(picker.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
