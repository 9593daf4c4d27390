//! Editor widget capability.
//!
//! ## Learning: Traits as Seams
//!
//! The session never touches a concrete text widget. Anything that can get
//! and set text, a theme and a syntax mode can stand in: the iced adapter in
//! `verilab-ui`, or [`MemoryWidget`] in headless code and tests.

use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::CoreResult;

/// Color theme of an editor widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorTheme {
    #[default]
    Monokai,
    Github,
}

impl EditorTheme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            EditorTheme::Monokai => EditorTheme::Github,
            EditorTheme::Github => EditorTheme::Monokai,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, EditorTheme::Monokai)
    }

    pub fn name(self) -> &'static str {
        match self {
            EditorTheme::Monokai => "monokai",
            EditorTheme::Github => "github",
        }
    }
}

/// Syntax mode of an editor widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyntaxMode {
    #[default]
    Verilog,
    PlainText,
}

impl SyntaxMode {
    pub fn name(self) -> &'static str {
        match self {
            SyntaxMode::Verilog => "verilog",
            SyntaxMode::PlainText => "text",
        }
    }
}

/// What the session needs from a text-editing widget.
pub trait EditorWidget {
    /// Current text.
    fn content(&self) -> String;

    /// Replaces the whole text.
    fn set_content(&mut self, text: &str);

    fn theme(&self) -> EditorTheme;

    fn set_theme(&mut self, theme: EditorTheme);

    fn syntax_mode(&self) -> SyntaxMode;

    fn set_syntax_mode(&mut self, mode: SyntaxMode);
}

/// Plain in-memory widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryWidget {
    text: String,
    theme: EditorTheme,
    mode: SyntaxMode,
}

impl MemoryWidget {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

impl EditorWidget for MemoryWidget {
    fn content(&self) -> String {
        self.text.clone()
    }

    fn set_content(&mut self, text: &str) {
        self.text = text.to_string();
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

/// Pushes the active buffer's content into a widget.
pub fn sync_widget<W: EditorWidget + ?Sized>(session: &Session, widget: &mut W) -> CoreResult<()> {
    let buffer = session.active_buffer()?;
    if widget.content() != buffer.content() {
        widget.set_content(buffer.content());
    }
    Ok(())
}

/// Copies a widget's text into the active buffer (live-edit relay).
pub fn relay_edit<W: EditorWidget + ?Sized>(session: &mut Session, widget: &W) -> CoreResult<()> {
    session.set_active_content(widget.content())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(EditorTheme::Monokai.toggled(), EditorTheme::Github);
        assert_eq!(EditorTheme::Github.toggled().toggled(), EditorTheme::Github);
        assert!(EditorTheme::Monokai.is_dark());
    }

    #[test]
    fn test_sync_and_relay() {
        let mut session = Session::new();
        session.create_tab("module a; endmodule");

        let mut widget = MemoryWidget::default();
        sync_widget(&session, &mut widget).unwrap();
        assert_eq!(widget.content(), "module a; endmodule");

        widget.set_content("module b; endmodule");
        relay_edit(&mut session, &widget).unwrap();
        assert_eq!(session.active_buffer().unwrap().content(), "module b; endmodule");
    }

    #[test]
    fn test_sync_without_tabs_fails() {
        let session = Session::new();
        let mut widget = MemoryWidget::new("x");
        assert!(sync_widget(&session, &mut widget).is_err());
        assert_eq!(widget.content(), "x");
    }
}
