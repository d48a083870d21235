use crate::input::DialogAction;

const MAX_NAME_LEN: usize = 24;

/// Name used when the dialog is submitted with an empty name
pub const DEFAULT_PLAYER_NAME: &str = "Anonymous";

/// Result of feeding one key to the dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Editing,
    /// Start a round with this name and difficulty index
    Submit { name: String, difficulty: usize },
    Dismiss,
    Quit,
}

/// The start-of-round form: player name and difficulty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartDialog {
    pub name: String,
    pub selected: usize,
    options: usize,
}

impl StartDialog {
    pub fn new(name: impl Into<String>, selected: usize, options: usize) -> Self {
        let options = options.max(1);
        Self {
            name: name.into(),
            selected: selected.min(options - 1),
            options,
        }
    }

    pub fn apply(&mut self, action: DialogAction) -> DialogOutcome {
        match action {
            DialogAction::Type(c) => {
                if self.name.chars().count() < MAX_NAME_LEN {
                    self.name.push(c);
                }
            }
            DialogAction::Backspace => {
                self.name.pop();
            }
            DialogAction::PrevDifficulty => {
                self.selected = (self.selected + self.options - 1) % self.options;
            }
            DialogAction::NextDifficulty => {
                self.selected = (self.selected + 1) % self.options;
            }
            DialogAction::Submit => {
                let name = match self.name.trim() {
                    "" => DEFAULT_PLAYER_NAME.to_string(),
                    trimmed => trimmed.to_string(),
                };
                return DialogOutcome::Submit {
                    name,
                    difficulty: self.selected,
                };
            }
            DialogAction::Dismiss => return DialogOutcome::Dismiss,
            DialogAction::Quit => return DialogOutcome::Quit,
            DialogAction::None => {}
        }
        DialogOutcome::Editing
    }
}
