//! Command dispatch for session actions.
//!
//! ## Learning: The Command Pattern
//!
//! Every user action that changes session state is a `Command` value. The UI
//! turns clicks and key presses into commands; tests build them directly.
//! Nothing here knows about widgets or windows.

use std::path::PathBuf;

use crate::buffer::{BorderState, TabId};
use crate::session::Session;
use crate::CoreResult;

/// Session commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewTab { initial: String },
    SwitchTo(TabId),
    NextTab,
    PrevTab,
    SetContent(String),
    LoadExample(String),
    Import(PathBuf),
    /// Export the active tab into a directory
    Export(PathBuf),
    SetBorder(BorderState),
}

impl Command {
    /// Returns the command's display name.
    pub fn display_name(&self) -> &str {
        match self {
            Command::NewTab { .. } => "New Tab",
            Command::SwitchTo(_) => "Switch Tab",
            Command::NextTab => "Next Tab",
            Command::PrevTab => "Previous Tab",
            Command::SetContent(_) => "Set Content",
            Command::LoadExample(_) => "Load Example",
            Command::Import(_) => "Import File",
            Command::Export(_) => "Export File",
            Command::SetBorder(_) => "Set Border",
        }
    }
}

/// Result of a dispatched command worth reporting back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    None,
    Created(TabId),
    Exported(PathBuf),
}

impl Session {
    /// Executes a command against this session.
    pub fn dispatch(&mut self, cmd: Command) -> CoreResult<CommandOutcome> {
        tracing::trace!("Dispatching {}", cmd.display_name());

        match cmd {
            Command::NewTab { initial } => {
                let id = self.create_tab(initial).id();
                Ok(CommandOutcome::Created(id))
            }
            Command::SwitchTo(id) => self.switch_to(id).map(|_| CommandOutcome::None),
            Command::NextTab => self.next_tab().map(|_| CommandOutcome::None),
            Command::PrevTab => self.prev_tab().map(|_| CommandOutcome::None),
            Command::SetContent(text) => self.set_active_content(text).map(|_| CommandOutcome::None),
            Command::LoadExample(name) => self.load_example(&name).map(|_| CommandOutcome::None),
            Command::Import(path) => self.import_file(path).map(|_| CommandOutcome::None),
            Command::Export(dir) => self.export_active(dir).map(CommandOutcome::Exported),
            Command::SetBorder(state) => {
                self.set_active_border_state(state).map(|_| CommandOutcome::None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn test_command_display_name() {
        assert_eq!(Command::NextTab.display_name(), "Next Tab");
        assert_eq!(
            Command::LoadExample("hello".to_string()).display_name(),
            "Load Example"
        );
    }

    #[test]
    fn test_dispatch_sequence() {
        let mut session = Session::new();

        let first = match session
            .dispatch(Command::NewTab { initial: "moduleA".into() })
            .unwrap()
        {
            CommandOutcome::Created(id) => id,
            other => panic!("unexpected outcome: {other:?}"),
        };
        session
            .dispatch(Command::NewTab { initial: "moduleB".into() })
            .unwrap();
        session.dispatch(Command::SwitchTo(first)).unwrap();
        session
            .dispatch(Command::SetContent("module a2; endmodule".into()))
            .unwrap();
        session.dispatch(Command::SetBorder(BorderState::Success)).unwrap();

        let active = session.active_buffer().unwrap();
        assert_eq!(active.id(), first);
        assert_eq!(active.content(), "module a2; endmodule");
        assert_eq!(active.border_state(), BorderState::Success);
    }

    #[test]
    fn test_dispatch_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::bootstrap();
        session.dispatch(Command::LoadExample("counter".into())).unwrap();

        let outcome = session
            .dispatch(Command::Export(dir.path().to_path_buf()))
            .unwrap();
        assert_eq!(outcome, CommandOutcome::Exported(dir.path().join("tab1.v")));
    }

    #[test]
    fn test_dispatch_errors_propagate() {
        let mut session = Session::new();
        assert!(matches!(
            session.dispatch(Command::NextTab),
            Err(CoreError::NoActiveTab)
        ));
        assert!(matches!(
            session.dispatch(Command::SwitchTo(TabId::from_sequence(1))),
            Err(CoreError::TabNotFound(_))
        ));
    }
}
