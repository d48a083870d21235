use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key press during play or on the end-of-round screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Key name for the engine's direction input (`ArrowUp`, `w`, ...)
    Steer(String),
    EndGame,
    Restart,
    Quit,
    None,
}

/// Key press while the start dialog is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    Type(char),
    Backspace,
    PrevDifficulty,
    NextDifficulty,
    Submit,
    Dismiss,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Name of a key the way browsers report it
    pub fn key_name(code: KeyCode) -> Option<String> {
        match code {
            KeyCode::Up => Some("ArrowUp".to_string()),
            KeyCode::Down => Some("ArrowDown".to_string()),
            KeyCode::Left => Some("ArrowLeft".to_string()),
            KeyCode::Right => Some("ArrowRight".to_string()),
            KeyCode::Char(c) => Some(c.to_string()),
            _ => None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if is_ctrl_c(&key) {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                Self::key_name(key.code).map_or(KeyAction::None, KeyAction::Steer)
            }
            KeyCode::Char('w' | 'W' | 'a' | 'A' | 's' | 'S' | 'd' | 'D') => {
                Self::key_name(key.code).map_or(KeyAction::None, KeyAction::Steer)
            }

            // Controls
            KeyCode::Char('e') | KeyCode::Char('E') => KeyAction::EndGame,
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Char('n') | KeyCode::Char('N') => {
                KeyAction::Restart
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    pub fn handle_dialog_event(&self, key: KeyEvent) -> DialogAction {
        if is_ctrl_c(&key) {
            return DialogAction::Quit;
        }

        match key.code {
            KeyCode::Enter => DialogAction::Submit,
            KeyCode::Esc => DialogAction::Dismiss,
            KeyCode::Backspace => DialogAction::Backspace,
            KeyCode::Left | KeyCode::Up => DialogAction::PrevDifficulty,
            KeyCode::Right | KeyCode::Down | KeyCode::Tab => DialogAction::NextDifficulty,
            KeyCode::Char(c) if !c.is_control() => DialogAction::Type(c),
            _ => DialogAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
