use iced::widget::text_editor;
use std::path::PathBuf;
use verilab_core::{Config, EditorTheme, EditorWidget, SyntaxMode};

/// One tab's editor widget.
///
/// The session owns the text; this mirrors it into iced's editor state and
/// relays edits back.
pub struct EditorPane {
    pub content: text_editor::Content,
    pub theme: EditorTheme,
    pub mode: SyntaxMode,
}

impl EditorPane {
    pub fn new(text: &str, theme: EditorTheme, mode: SyntaxMode) -> Self {
        Self {
            content: text_editor::Content::with_text(text),
            theme,
            mode,
        }
    }
}

impl EditorWidget for EditorPane {
    // `Content::text` appends a newline the user never typed; join lines instead
    fn content(&self) -> String {
        self.content
            .lines()
            .enumerate()
            .fold(String::new(), |mut text, (i, line)| {
                if i > 0 {
                    text.push('\n');
                }
                text.push_str(&line);
                text
            })
    }

    fn set_content(&mut self, text: &str) {
        self.content = text_editor::Content::with_text(text);
    }

    fn theme(&self) -> EditorTheme {
        self.theme
    }

    fn set_theme(&mut self, theme: EditorTheme) {
        self.theme = theme;
    }

    fn syntax_mode(&self) -> SyntaxMode {
        self.mode
    }

    fn set_syntax_mode(&mut self, mode: SyntaxMode) {
        self.mode = mode;
    }
}

/// Result of the startup liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Reachable,
    Unreachable(String),
}

#[derive(Debug, Default)]
pub struct Flags {
    /// File loaded into the startup tab
    pub file: Option<PathBuf>,
    pub config: Config,
}
