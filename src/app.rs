//! Interactive surface state.
//!
//! `App` owns the composer and everything that only matters on screen:
//! focus, selections, the line being typed, modal messages and pointer
//! gestures. Keys and mouse events are translated into composer calls here;
//! rendering lives in [`crate::ui`].

use std::time::{Duration, Instant};

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::composer::{BankView, Composer};
use crate::config::Config;
use crate::constants::mouse;
use crate::error::{Error, Result};
use crate::input::{self, Action, Focus, InputContext, Step};
use crate::lexicon::Lexicon;
use crate::types::ItemId;

/// Which list a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Bank,
    Poem,
}

#[derive(Debug, Clone, Copy)]
struct Click {
    pane: Pane,
    index: usize,
    at: Instant,
}

/// Application state behind the terminal UI.
pub struct App {
    /// Pane or line receiving keys.
    pub focus: Focus,
    /// The poem and its lexicon.
    pub composer: Composer,
    /// Selection in the flattened, search-filtered bank.
    pub bank_selected: usize,
    /// Render state of the bank list (rows include group headers).
    pub bank_list_state: ListState,
    /// Bank row to token index mapping from the last draw; `None` for headers.
    pub bank_rows: Vec<Option<usize>>,
    /// Render state of the poem list.
    pub poem_list_state: ListState,
    /// Free text being typed.
    pub text_input: String,
    /// Bank search query.
    pub search_query: String,
    /// Whether the help modal is shown.
    pub show_help: bool,
    /// Informational modal.
    pub status_message: Option<String>,
    /// Error modal.
    pub error_message: Option<String>,
    /// Where the poem list was last drawn.
    pub poem_area: Rect,
    /// Where the bank list was last drawn.
    pub bank_area: Rect,
    /// Loaded configuration.
    pub config: Config,
    focus_before_entry: Focus,
    last_click: Option<Click>,
    should_quit: bool,
}

impl App {
    /// Build the surface over a loaded lexicon.
    pub fn new(config: Config, lexicon: Lexicon) -> Self {
        Self {
            focus: Focus::Bank,
            composer: Composer::new(lexicon),
            bank_selected: 0,
            bank_list_state: ListState::default(),
            bank_rows: Vec::new(),
            poem_list_state: ListState::default(),
            text_input: String::new(),
            search_query: String::new(),
            show_help: false,
            status_message: None,
            error_message: None,
            poem_area: Rect::default(),
            bank_area: Rect::default(),
            config,
            focus_before_entry: Focus::Bank,
            last_click: None,
            should_quit: false,
        }
    }

    /// Load configuration and lexicon from the environment.
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let lexicon = Lexicon::load(config.require_lexicon_path()?)?;
        Ok(Self::new(config, lexicon))
    }

    /// Whether the event loop should stop.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Ask the event loop to stop.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// The bank as currently displayed: unplaced tokens narrowed by the search.
    pub fn visible_bank(&self) -> BankView<'_> {
        self.composer
            .bank_view()
            .search(&self.search_query, self.config.search_min_score)
    }

    /// Selected poem position, if the poem has any items.
    pub fn poem_selected(&self) -> Option<usize> {
        self.poem_list_state.selected().filter(|&i| i < self.composer.len())
    }

    /// Route a key press through the modal layer and the handler chain.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Modals swallow keys until dismissed
        if self.show_help || self.error_message.is_some() || self.status_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::F(1) | KeyCode::Char('?')) {
                self.show_help = false;
                self.error_message = None;
                self.status_message = None;
            }
            return;
        }

        let ctx = InputContext {
            focus: self.focus,
            dragging: self.composer.drag_state().is_dragging(),
        };
        if let Some(action) = input::dispatch(key, &ctx) {
            self.apply(action);
        }
    }

    /// Perform one user action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Select(step) => self.move_selection(step),
            Action::SwitchFocus => {
                self.focus = match self.focus {
                    Focus::Bank => Focus::Poem,
                    _ => Focus::Bank,
                };
            }
            Action::AddSelected => self.add_selected(),
            Action::RemoveSelected => self.remove_selected(),
            Action::PickUp => {
                if let Some(index) = self.poem_selected() {
                    let result = self.composer.begin_drag(index);
                    self.report(result);
                }
            }
            Action::DragStep(step) => self.drag_step(step),
            Action::Drop => {
                self.composer.end_drag();
            }
            Action::CancelDrag => {
                self.composer.cancel_drag();
            }
            Action::StartTextEntry => self.enter_line(Focus::TextEntry),
            Action::StartSearch => self.enter_line(Focus::Search),
            Action::InsertChar(c) => {
                self.active_line().push(c);
                self.on_search_changed();
            }
            Action::DeleteChar => {
                self.active_line().pop();
                self.on_search_changed();
            }
            Action::Submit => self.submit_line(),
            Action::CancelEntry => {
                if self.focus == Focus::Search {
                    self.search_query.clear();
                    self.on_search_changed();
                } else {
                    self.text_input.clear();
                }
                self.focus = self.focus_before_entry;
            }
            Action::ClearPoem => {
                let count = self.composer.clear();
                tracing::info!("Cleared poem ({count} items)");
            }
            Action::CopyPoem => self.copy_poem(),
            Action::ShowHelp => self.show_help = true,
            Action::Quit => self.quit(),
        }
        self.clamp_selections();
    }

    /// Pointer input: press selects and picks up, drag hovers, release drops.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let (column, row) = (event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(column, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = self.poem_row_at(column, row) {
                    let result = self.composer.drag_over(index);
                    self.report(result);
                    self.poem_list_state.select(Some(index));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.composer.end_drag();
            }
            MouseEventKind::ScrollUp => self.move_selection(Step::Up),
            MouseEventKind::ScrollDown => self.move_selection(Step::Down),
            _ => {}
        }
        self.clamp_selections();
    }

    /// The terminal lost focus mid-gesture; treat it as a cancelled drag.
    pub fn handle_focus_lost(&mut self) {
        self.composer.cancel_drag();
    }

    fn press(&mut self, column: u16, row: u16) {
        let hit = self
            .poem_row_at(column, row)
            .map(|i| (Pane::Poem, i))
            .or_else(|| self.bank_token_at(column, row).map(|i| (Pane::Bank, i)));
        let Some((pane, index)) = hit else {
            return;
        };

        let now = Instant::now();
        let double = self.last_click.is_some_and(|c| {
            c.pane == pane
                && c.index == index
                && now.duration_since(c.at) <= Duration::from_millis(mouse::DOUBLE_CLICK_MS)
        });
        self.last_click = if double { None } else { Some(Click { pane, index, at: now }) };

        match pane {
            Pane::Poem => {
                self.focus = Focus::Poem;
                self.poem_list_state.select(Some(index));
                if double {
                    self.remove_selected();
                } else {
                    let result = self.composer.begin_drag(index);
                    self.report(result);
                }
            }
            Pane::Bank => {
                self.focus = Focus::Bank;
                self.bank_selected = index;
                if double {
                    self.add_selected();
                }
            }
        }
    }

    fn poem_row_at(&self, column: u16, row: u16) -> Option<usize> {
        let offset = row_in_list(self.poem_area, column, row)?;
        let index = self.poem_list_state.offset() + offset;
        (index < self.composer.len()).then_some(index)
    }

    fn bank_token_at(&self, column: u16, row: u16) -> Option<usize> {
        let offset = row_in_list(self.bank_area, column, row)?;
        self.bank_rows
            .get(self.bank_list_state.offset() + offset)
            .copied()
            .flatten()
    }

    fn move_selection(&mut self, step: Step) {
        match self.focus {
            Focus::Poem => {
                let len = self.composer.len();
                if len == 0 {
                    return;
                }
                let current = self.poem_selected().unwrap_or(0);
                self.poem_list_state.select(Some(stepped(current, step, len)));
            }
            _ => {
                let len = self.visible_bank().len();
                if len > 0 {
                    self.bank_selected = stepped(self.bank_selected, step, len);
                }
            }
        }
    }

    fn add_selected(&mut self) {
        let id: Option<ItemId> = self.visible_bank().get(self.bank_selected).map(|t| t.id.clone());
        if let Some(id) = id {
            if self.composer.add_image_by_id(&id) {
                tracing::info!("Added {id} to poem");
            }
        }
    }

    fn remove_selected(&mut self) {
        let id = self
            .poem_selected()
            .and_then(|i| self.composer.poem().get(i))
            .map(|item| item.id.clone());
        if let Some(id) = id {
            if self.composer.remove_item(&id).is_some() {
                tracing::info!("Removed {id} from poem");
            }
        }
    }

    fn drag_step(&mut self, step: Step) {
        let Some(current) = self.composer.drag_state().current() else {
            return;
        };
        let target = stepped(current, step, self.composer.len());
        let result = self.composer.drag_over(target);
        self.report(result);
        self.poem_list_state.select(self.composer.drag_state().current());
    }

    fn enter_line(&mut self, focus: Focus) {
        if !self.focus.is_line_edit() {
            self.focus_before_entry = self.focus;
        }
        self.focus = focus;
    }

    fn active_line(&mut self) -> &mut String {
        if self.focus == Focus::Search {
            &mut self.search_query
        } else {
            &mut self.text_input
        }
    }

    fn on_search_changed(&mut self) {
        if self.focus == Focus::Search {
            self.bank_selected = 0;
        }
    }

    fn submit_line(&mut self) {
        match self.focus {
            Focus::Search => self.focus = Focus::Bank,
            _ => {
                // Blank submissions are ignored by the composer; keep typing either way
                if let Some(id) = self.composer.add_text_token(&self.text_input) {
                    tracing::info!("Added text {id} to poem");
                }
                self.text_input.clear();
            }
        }
    }

    fn copy_poem(&mut self) {
        if self.composer.is_empty() {
            self.status_message = Some("Nothing to copy yet".to_string());
            return;
        }
        let text = self.composer.to_plain_text();
        match Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => self.status_message = Some("Poem copied to clipboard".to_string()),
            Err(e) => self.report(Err(Error::Clipboard(e.to_string()))),
        }
    }

    /// Surface a failed operation as an error modal.
    fn report(&mut self, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!("{e}");
            self.error_message = Some(e.to_string());
        }
    }

    fn clamp_selections(&mut self) {
        let poem_len = self.composer.len();
        let poem_sel = match self.poem_list_state.selected() {
            _ if poem_len == 0 => None,
            Some(i) => Some(i.min(poem_len - 1)),
            None => Some(0),
        };
        self.poem_list_state.select(poem_sel);

        let bank_len = self.visible_bank().len();
        self.bank_selected = self.bank_selected.min(bank_len.saturating_sub(1));
    }
}

/// Row offset inside a bordered list area, if the point is inside it.
fn row_in_list(area: Rect, column: u16, row: u16) -> Option<usize> {
    let inside = column > area.left()
        && column < area.right().saturating_sub(1)
        && row > area.top()
        && row < area.bottom().saturating_sub(1);
    inside.then(|| usize::from(row - area.top() - 1))
}

const fn stepped(current: usize, step: Step, len: usize) -> usize {
    match step {
        Step::Up => current.saturating_sub(1),
        Step::Down => {
            if current + 1 < len {
                current + 1
            } else {
                current
            }
        }
    }
}
