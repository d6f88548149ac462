//! Input handling abstractions.
//!
//! Key events are turned into [`Action`]s by a small chain of handlers, one
//! per focus, so key bindings can be tested without a terminal or an
//! [`App`](crate::app::App).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which part of the screen receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The word bank.
    #[default]
    Bank,
    /// The poem being assembled.
    Poem,
    /// The free-text line.
    TextEntry,
    /// The bank search line.
    Search,
}

impl Focus {
    /// Whether keys are typed into a line rather than interpreted as commands.
    #[must_use]
    pub const fn is_line_edit(self) -> bool {
        matches!(self, Self::TextEntry | Self::Search)
    }
}

/// Vertical direction for selection and drag steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Towards the start of the list.
    Up,
    /// Towards the end of the list.
    Down,
}

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the selection in the focused list.
    Select(Step),
    /// Toggle between bank and poem.
    SwitchFocus,
    /// Place the selected bank token in the poem.
    AddSelected,
    /// Take the selected item out of the poem.
    RemoveSelected,
    /// Start dragging the selected poem item.
    PickUp,
    /// Hover the dragged item one row further.
    DragStep(Step),
    /// Drop the dragged item.
    Drop,
    /// Abandon the drag, keeping the order reached so far.
    CancelDrag,
    /// Focus the free-text line.
    StartTextEntry,
    /// Focus the bank search line.
    StartSearch,
    /// Type a character into the focused line.
    InsertChar(char),
    /// Delete the last character of the focused line.
    DeleteChar,
    /// Submit the focused line.
    Submit,
    /// Leave the focused line.
    CancelEntry,
    /// Empty the poem.
    ClearPoem,
    /// Copy the poem as plain text.
    CopyPoem,
    /// Show the keybinding help.
    ShowHelp,
    /// Leave the application.
    Quit,
}

/// Result of processing an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// The key maps to an action.
    Action(Action),
    /// The input was ignored (not applicable to this handler).
    Ignored,
}

/// Context passed to input handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    /// Current focus.
    pub focus: Focus,
    /// Whether a poem item is being dragged.
    pub dragging: bool,
}

/// Trait for handling keyboard input.
///
/// Implementations of this trait handle input for specific focuses.
pub trait InputHandler {
    /// Handle a key event.
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult;

    /// Get the name of this handler (for debugging).
    fn name(&self) -> &'static str;
}

/// Handler for global shortcuts (help, quit).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputResult::Action(Action::Quit);
        }

        if key.code == KeyCode::F(1) {
            return InputResult::Action(Action::ShowHelp);
        }

        // Printable keys belong to the line being edited
        if ctx.focus.is_line_edit() {
            return InputResult::Ignored;
        }

        match key.code {
            KeyCode::Char('?') => InputResult::Action(Action::ShowHelp),
            KeyCode::Char('q') if !ctx.dragging => InputResult::Action(Action::Quit),
            _ => InputResult::Ignored,
        }
    }

    fn name(&self) -> &'static str {
        "GlobalHandler"
    }
}

/// Shortcuts shared by the bank and poem panes.
fn pane_shortcut(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::Select(Step::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::Select(Step::Down)),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchFocus),
        KeyCode::Char('i') => Some(Action::StartTextEntry),
        KeyCode::Char('C') => Some(Action::ClearPoem),
        KeyCode::Char('y') => Some(Action::CopyPoem),
        _ => None,
    }
}

/// Handler for the word bank.
#[derive(Debug, Default)]
pub struct BankHandler;

impl InputHandler for BankHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if ctx.focus != Focus::Bank {
            return InputResult::Ignored;
        }
        let action = match key.code {
            KeyCode::Enter => Some(Action::AddSelected),
            KeyCode::Char('/') => Some(Action::StartSearch),
            code => pane_shortcut(code),
        };
        action.map_or(InputResult::Ignored, InputResult::Action)
    }

    fn name(&self) -> &'static str {
        "BankHandler"
    }
}

/// Handler for the poem pane, including keyboard dragging.
#[derive(Debug, Default)]
pub struct PoemHandler;

impl InputHandler for PoemHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if ctx.focus != Focus::Poem {
            return InputResult::Ignored;
        }

        let action = if ctx.dragging {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => Some(Action::DragStep(Step::Up)),
                KeyCode::Down | KeyCode::Char('j') => Some(Action::DragStep(Step::Down)),
                KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Drop),
                KeyCode::Esc => Some(Action::CancelDrag),
                _ => None,
            }
        } else {
            match key.code {
                KeyCode::Enter | KeyCode::Delete | KeyCode::Backspace | KeyCode::Char('x') => {
                    Some(Action::RemoveSelected)
                }
                KeyCode::Char(' ') => Some(Action::PickUp),
                code => pane_shortcut(code),
            }
        };
        action.map_or(InputResult::Ignored, InputResult::Action)
    }

    fn name(&self) -> &'static str {
        "PoemHandler"
    }
}

/// Handler for the text-entry and search lines.
#[derive(Debug, Default)]
pub struct LineEditHandler;

impl InputHandler for LineEditHandler {
    fn handle(&mut self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if !ctx.focus.is_line_edit() {
            return InputResult::Ignored;
        }
        let action = match key.code {
            KeyCode::Enter => Action::Submit,
            KeyCode::Esc => Action::CancelEntry,
            KeyCode::Backspace => Action::DeleteChar,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::InsertChar(c)
            }
            _ => return InputResult::Ignored,
        };
        InputResult::Action(action)
    }

    fn name(&self) -> &'static str {
        "LineEditHandler"
    }
}

/// Run the handler chain and return the first action produced.
pub fn dispatch(key: KeyEvent, ctx: &InputContext) -> Option<Action> {
    let (mut global, mut line, mut bank, mut poem) =
        (GlobalHandler, LineEditHandler, BankHandler, PoemHandler);
    let mut handlers: [&mut dyn InputHandler; 4] = [&mut global, &mut line, &mut bank, &mut poem];
    handlers.iter_mut().find_map(|handler| match handler.handle(key, ctx) {
        InputResult::Action(action) => {
            tracing::trace!("{} -> {action:?}", handler.name());
            Some(action)
        }
        InputResult::Ignored => None,
    })
}
