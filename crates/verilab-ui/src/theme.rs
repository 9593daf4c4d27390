//! Colors for the application chrome and the two editor themes.

use iced::Color;
use verilab_core::{BorderState, EditorTheme};

/// Application chrome (toolbar, tabs, status bar).
pub mod colors {
    use iced::Color;

    pub const BG_DARK: Color = Color::from_rgb(0.11, 0.11, 0.13);
    pub const BG_MEDIUM: Color = Color::from_rgb(0.14, 0.14, 0.16);
    pub const BG_LIGHT: Color = Color::from_rgb(0.18, 0.18, 0.20);
    pub const BG_HOVER: Color = Color::from_rgb(0.22, 0.22, 0.25);

    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.93, 0.93, 0.93);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.65, 0.65, 0.68);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.45, 0.45, 0.48);

    pub const ACCENT: Color = Color::from_rgb(0.36, 0.54, 0.90);
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);

    pub const SUCCESS: Color = Color::from_rgb(0.20, 0.75, 0.35);
    pub const FAILURE: Color = Color::from_rgb(0.90, 0.25, 0.25);
    pub const WARNING: Color = Color::from_rgb(0.95, 0.70, 0.25);
}

/// Editor border for a submission verdict.
pub fn border_color(state: BorderState) -> Color {
    match state {
        BorderState::Neutral => colors::BORDER,
        BorderState::Success => colors::SUCCESS,
        BorderState::Failure => colors::FAILURE,
    }
}

/// Colors used inside one editor.
#[derive(Debug, Clone, Copy)]
pub struct EditorPalette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub selection: Color,
    pub syntax: SyntaxColors,
}

/// Syntax highlighting colors.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxColors {
    pub keyword: Color,
    pub control: Color,
    pub type_name: Color,
    pub system_task: Color,
    pub directive: Color,
    pub string: Color,
    pub number: Color,
    pub comment: Color,
    pub operator: Color,
    pub default: Color,
}

impl EditorPalette {
    pub fn for_theme(theme: EditorTheme) -> Self {
        match theme {
            EditorTheme::Monokai => Self::monokai(),
            EditorTheme::Github => Self::github(),
        }
    }

    pub fn monokai() -> Self {
        Self {
            background: Color::from_rgb(0.153, 0.157, 0.133),
            text: Color::from_rgb(0.973, 0.973, 0.949),
            muted: Color::from_rgb(0.46, 0.44, 0.37),
            selection: Color::from_rgba(0.29, 0.29, 0.25, 0.9),
            syntax: SyntaxColors {
                keyword: Color::from_rgb(0.976, 0.149, 0.447),     // Pink
                control: Color::from_rgb(0.976, 0.149, 0.447),
                type_name: Color::from_rgb(0.400, 0.851, 0.937),   // Cyan
                system_task: Color::from_rgb(0.651, 0.886, 0.180), // Green
                directive: Color::from_rgb(0.992, 0.592, 0.122),   // Orange
                string: Color::from_rgb(0.902, 0.859, 0.455),      // Yellow
                number: Color::from_rgb(0.682, 0.506, 1.0),        // Purple
                comment: Color::from_rgb(0.459, 0.443, 0.369),
                operator: Color::from_rgb(0.976, 0.149, 0.447),
                default: Color::from_rgb(0.973, 0.973, 0.949),
            },
        }
    }

    pub fn github() -> Self {
        Self {
            background: Color::from_rgb(1.0, 1.0, 1.0),
            text: Color::from_rgb(0.14, 0.16, 0.18),
            muted: Color::from_rgb(0.43, 0.47, 0.51),
            selection: Color::from_rgba(0.33, 0.60, 0.95, 0.3),
            syntax: SyntaxColors {
                keyword: Color::from_rgb(0.84, 0.23, 0.29),        // Red
                control: Color::from_rgb(0.84, 0.23, 0.29),
                type_name: Color::from_rgb(0.44, 0.27, 0.73),      // Purple
                system_task: Color::from_rgb(0.0, 0.36, 0.77),     // Blue
                directive: Color::from_rgb(0.58, 0.34, 0.0),       // Brown
                string: Color::from_rgb(0.01, 0.18, 0.36),         // Navy
                number: Color::from_rgb(0.0, 0.36, 0.77),
                comment: Color::from_rgb(0.43, 0.47, 0.51),
                operator: Color::from_rgb(0.84, 0.23, 0.29),
                default: Color::from_rgb(0.14, 0.16, 0.18),
            },
        }
    }
}
