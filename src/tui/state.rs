use std::fmt::{self, Display, Formatter};

/// State backing the add form. The form is either showing its add button
/// or its text input, never both; `editing` decides which.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub editing: bool,
    pub draft: DraftInput,
    pub entries: Vec<String>,
    pub message: Option<String>,
    pub button_label: String,
}

// Alias for R3BL TUI compatibility
pub type State = AppState;

// App signals for R3BL TUI event handling
#[derive(Debug, Clone, Default)]
pub enum AppSignal {
    #[default]
    CloseForm,
    EntryAdded(String),
    ShowMessage(String),
}

/// The two render branches of the add form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Button,
    Form,
}

/// Uncommitted text held by the rendered input while the form is open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DraftInput {
    pub text: String,
}

impl DraftInput {
    pub fn handle_char(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn handle_backspace(&mut self) {
        self.text.pop();
    }

    /// Empty and whitespace-only drafts are both treated as "no input".
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            editing: false,
            draft: DraftInput::default(),
            entries: vec![],
            message: None,
            button_label: "+ Add entry".to_string(),
        }
    }
}

impl Display for AppState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AppState {{ mode: {:?}, entries: {}, draft: {} chars }}",
            self.mode(),
            self.entries.len(),
            self.draft.text.len()
        )
    }
}

impl AppState {
    pub fn mode(&self) -> Mode {
        if self.editing {
            Mode::Form
        } else {
            Mode::Button
        }
    }

    /// Explicit state-transition entry point. Opening the form always
    /// presents an empty input.
    pub fn set_editing(&mut self, next: bool) {
        if next && !self.editing {
            self.draft = DraftInput::default();
        }
        self.editing = next;
    }

    /// Reads the current input value. A blank draft is not an error: the
    /// submission is ignored and the draft is left as typed. A non-blank
    /// draft is returned verbatim, the draft is cleared, and the form
    /// reverts to the button.
    pub fn submit(&mut self) -> Option<String> {
        if self.draft.is_blank() {
            return None;
        }
        let value = self.draft.take();
        self.editing = false;
        Some(value)
    }

    pub fn add_entry(&mut self, value: String) {
        self.entries.push(value);
    }
}
