use iced::keyboard;
use iced::widget::text_editor;
use std::path::PathBuf;
use verilab_core::{SubmissionResult, SubmissionTicket, TabId};

#[derive(Debug, Clone)]
pub enum Message {
    // Tabs
    NewTab,
    TabSelected(TabId),
    NextTab,
    PrevTab,

    // Editor
    EditorAction(text_editor::Action),
    ToggleTheme,
    ToggleSyntax,
    ExampleSelected(String),

    // Files
    ImportFile,
    ExportFile,

    // Backend
    Run,

    // Notices
    DismissNotice,

    KeyPressed(keyboard::Key, keyboard::Modifiers),

    // Async results
    ImportPicked(Option<PathBuf>),
    ExportPicked(Option<PathBuf>),
    RunFinished(SubmissionTicket, SubmissionResult),
    ProbeFinished(Result<(), String>),
}
