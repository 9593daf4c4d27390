use iced::keyboard::{self, key::Named};
use iced::widget::text_editor::{Binding, KeyPress};
use iced::Task;
use std::path::PathBuf;
use verilab_core::submission::PENDING_MESSAGE;
use verilab_core::widget::{relay_edit, sync_widget};
use verilab_core::{Command, CommandOutcome, EditorWidget, SyntaxMode, Verdict};

use super::{App, BackendStatus, EditorPane, Message};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.handle(message);
        self.log_session_events();
        task
    }

    fn handle(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NewTab => {
                match self.session.dispatch(Command::NewTab { initial: String::new() }) {
                    Ok(CommandOutcome::Created(id)) => {
                        self.editors.insert(
                            id,
                            EditorPane::new("", self.config.editor.theme, self.config.editor.syntax),
                        );
                        self.status_message = format!("Created {}", id);
                    }
                    Ok(_) => {}
                    Err(e) => self.status_message = format!("Error: {}", e),
                }
            }

            Message::TabSelected(id) => self.switch_tab(Command::SwitchTo(id)),
            Message::NextTab => self.switch_tab(Command::NextTab),
            Message::PrevTab => self.switch_tab(Command::PrevTab),

            Message::EditorAction(action) => {
                if let Some(id) = self.session.active_id()
                    && let Some(pane) = self.editors.get_mut(&id)
                {
                    let is_edit = action.is_edit();
                    pane.content.perform(action);
                    if is_edit && let Err(e) = relay_edit(&mut self.session, pane) {
                        tracing::warn!("Dropped edit: {}", e);
                    }
                }
            }

            Message::ToggleTheme => {
                if let Some(id) = self.session.active_id()
                    && let Some(pane) = self.editors.get_mut(&id)
                {
                    let theme = pane.theme().toggled();
                    pane.set_theme(theme);
                    self.session.announce_theme(theme);
                    self.status_message = format!("Theme: {}", theme.name());
                }
            }

            Message::ToggleSyntax => {
                if let Some(id) = self.session.active_id()
                    && let Some(pane) = self.editors.get_mut(&id)
                {
                    let mode = match pane.syntax_mode() {
                        SyntaxMode::Verilog => SyntaxMode::PlainText,
                        SyntaxMode::PlainText => SyntaxMode::Verilog,
                    };
                    pane.set_syntax_mode(mode);
                    self.status_message = format!("Syntax: {}", mode.name());
                }
            }

            Message::ExampleSelected(name) => {
                match self.session.dispatch(Command::LoadExample(name.clone())) {
                    Ok(_) => {
                        self.sync_active_pane();
                        self.status_message = format!("Loaded example: {}", name);
                    }
                    Err(e) => self.status_message = format!("Error: {}", e),
                }
                self.selected_example = Some(name);
            }

            Message::ImportFile => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .add_filter("Verilog", &["v", "sv", "vh"])
                            .add_filter("All Files", &["*"])
                            .pick_file()
                            .await
                            .map(|file| file.path().to_path_buf())
                    },
                    Message::ImportPicked,
                );
            }

            Message::ImportPicked(picked) => match picked {
                Some(path) => self.apply_import(path),
                None => self.notice = Some("No file selected".to_string()),
            },

            Message::ExportFile => {
                let name = verilab_core::export_file_name(self.session.active_buffer().ok());
                return Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_title(format!("Export {}", name))
                            .pick_folder()
                            .await
                            .map(|dir| dir.path().to_path_buf())
                    },
                    Message::ExportPicked,
                );
            }

            Message::ExportPicked(picked) => {
                if let Some(dir) = picked {
                    match self.session.dispatch(Command::Export(dir)) {
                        Ok(CommandOutcome::Exported(path)) => {
                            self.status_message = format!("Exported: {}", path.display());
                        }
                        Ok(_) => {}
                        Err(e) => self.status_message = format!("Export failed: {}", e),
                    }
                }
            }

            Message::Run => return self.start_run(),

            Message::RunFinished(ticket, result) => {
                let completion = self.session.complete_submission(
                    ticket,
                    result,
                    self.config.submission.attribution,
                );
                self.output = completion.display;
                self.status_message = match (completion.target, completion.verdict) {
                    (Some(id), Verdict::Success) => format!("{}: simulation finished", id),
                    (Some(id), Verdict::Failure) => format!("{}: compilation failed", id),
                    (None, _) => "Result arrived for a closed tab".to_string(),
                };
            }

            Message::ProbeFinished(result) => match result {
                Ok(()) => self.backend_status = BackendStatus::Reachable,
                Err(e) => {
                    tracing::warn!("Server not reachable: {}", e);
                    self.backend_status = BackendStatus::Unreachable(e);
                }
            },

            Message::DismissNotice => self.notice = None,

            Message::KeyPressed(key, modifiers) => {
                if let Some(message) = shortcut(&key, modifiers) {
                    return self.handle(message);
                }
            }
        }

        Task::none()
    }

    fn log_session_events(&mut self) {
        for event in self.events.drain() {
            tracing::debug!("Session event: {:?}", event);
        }
    }

    fn switch_tab(&mut self, cmd: Command) {
        match self.session.dispatch(cmd) {
            Ok(_) => {
                if let Ok(buffer) = self.session.active_buffer() {
                    self.status_message = format!("Editing: {}", buffer.label());
                }
            }
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    fn sync_active_pane(&mut self) {
        if let Some(id) = self.session.active_id()
            && let Some(pane) = self.editors.get_mut(&id)
            && let Err(e) = sync_widget(&self.session, pane)
        {
            tracing::warn!("Editor out of sync: {}", e);
        }
    }

    /// Loads a file into the active tab, or raises a blocking notice.
    pub(crate) fn apply_import(&mut self, path: PathBuf) {
        match self.session.dispatch(Command::Import(path.clone())) {
            Ok(_) => {
                self.sync_active_pane();
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "file".to_string());
                self.status_message = format!("Imported: {}", name);
            }
            Err(e) => self.notice = Some(e.to_string()),
        }
    }

    fn start_run(&mut self) -> Task<Message> {
        let (ticket, code) = match self.session.begin_submission() {
            Ok(started) => started,
            Err(e) => {
                self.status_message = format!("Error: {}", e);
                return Task::none();
            }
        };
        self.output = PENDING_MESSAGE.to_string();
        self.status_message = format!("Running {}...", ticket.origin);

        let client = self.client.clone();
        Task::perform(
            async move { client.submit(ticket, code).await },
            |(ticket, result)| Message::RunFinished(ticket, result),
        )
    }

    #[cfg(test)]
    pub(crate) fn tab_at(&self, idx: usize) -> Option<verilab_core::TabId> {
        self.session.tab_ids().get(idx).copied()
    }
}

/// Maps a key press to a message.
fn shortcut(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<Message> {
    if !modifiers.command() {
        return None;
    }
    match key.as_ref() {
        keyboard::Key::Character("t") => Some(Message::NewTab),
        keyboard::Key::Character("o") => Some(Message::ImportFile),
        keyboard::Key::Character("s") => Some(Message::ExportFile),
        keyboard::Key::Named(Named::Enter) => Some(Message::Run),
        keyboard::Key::Named(Named::Tab) if modifiers.shift() => Some(Message::PrevTab),
        keyboard::Key::Named(Named::Tab) => Some(Message::NextTab),
        _ => None,
    }
}

/// Key bindings for the focused editor.
///
/// The editor captures every key it handles, so app shortcuts have to be
/// claimed here before its defaults (Enter would otherwise insert a newline).
pub(crate) fn editor_key_binding(key_press: KeyPress) -> Option<Binding<Message>> {
    match shortcut(&key_press.key, key_press.modifiers) {
        Some(message) => Some(Binding::Custom(message)),
        None => Binding::from_key_press(key_press),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Flags;
    use verilab_core::{AttributionPolicy, BorderState, Config, SubmissionFailure};

    fn app() -> App {
        let mut config = Config::default();
        config.backend.probe_on_startup = false;
        App::new(Flags { file: None, config }).0
    }

    #[test]
    fn test_starts_with_bootstrap_tab() {
        let app = app();
        assert_eq!(app.session.len(), 1);
        assert_eq!(app.editors.len(), 1);
        let pane = app.active_pane().unwrap();
        assert!(pane.content().contains("Hello, VLSI World!"));
    }

    #[test]
    fn test_new_tab_gets_editor_and_focus() {
        let mut app = app();
        let _ = app.update(Message::NewTab);
        let second = app.tab_at(1).unwrap();
        assert_eq!(app.session.active_id(), Some(second));
        assert!(app.editors.contains_key(&second));

        let _ = app.update(Message::TabSelected(app.tab_at(0).unwrap()));
        assert_eq!(app.session.active_id(), app.tab_at(0));
    }

    #[test]
    fn test_example_updates_session_and_widget() {
        let mut app = app();
        let _ = app.update(Message::ExampleSelected("counter".to_string()));
        let content = app.session.active_buffer().unwrap().content().to_string();
        assert!(content.contains("module counter"));
        assert_eq!(app.active_pane().unwrap().content().trim_end(), content.trim_end());
    }

    #[test]
    fn test_missing_import_raises_notice() {
        let mut app = app();
        let _ = app.update(Message::ImportPicked(None));
        assert_eq!(app.notice.as_deref(), Some("No file selected"));
        let _ = app.update(Message::DismissNotice);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_import_file_into_active_tab() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.v");
        std::fs::write(&path, "module top; endmodule").unwrap();

        let mut app = app();
        let _ = app.update(Message::ImportPicked(Some(path)));
        assert!(app.notice.is_none());
        assert_eq!(
            app.session.active_buffer().unwrap().content(),
            "module top; endmodule"
        );
    }

    #[test]
    fn test_export_writes_tab_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        let _ = app.update(Message::ExportPicked(Some(dir.path().to_path_buf())));
        let written = std::fs::read_to_string(dir.path().join("tab1.v")).unwrap();
        assert!(written.contains("Hello, VLSI World!"));
    }

    #[test]
    fn test_run_result_follows_origin_after_switch() {
        let mut app = app();
        assert_eq!(app.config.submission.attribution, AttributionPolicy::Originating);
        let first = app.tab_at(0).unwrap();

        let (ticket, _) = app.session.begin_submission().unwrap();
        let _ = app.update(Message::NewTab);
        let _ = app.update(Message::RunFinished(
            ticket,
            Ok("Error: unexpected token".to_string()),
        ));

        assert!(app.output.contains("Error"));
        assert_eq!(
            app.session.buffer(first).unwrap().border_state(),
            BorderState::Failure
        );
        assert_eq!(
            app.session.active_buffer().unwrap().border_state(),
            BorderState::Neutral
        );
    }

    #[test]
    fn test_transport_failure_message() {
        let mut app = app();
        let (ticket, _) = app.session.begin_submission().unwrap();
        let _ = app.update(Message::RunFinished(
            ticket,
            Err(SubmissionFailure::new("connection refused")),
        ));
        assert_eq!(app.output, "Error occurred while compiling.");
    }

    #[test]
    fn test_probe_failure_is_non_blocking() {
        let mut app = app();
        let _ = app.update(Message::ProbeFinished(Err("refused".to_string())));
        assert_eq!(
            app.backend_status,
            BackendStatus::Unreachable("refused".to_string())
        );
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_theme_toggle_only_touches_active_pane() {
        let mut app = app();
        let first = app.tab_at(0).unwrap();
        let _ = app.update(Message::NewTab);
        let _ = app.update(Message::ToggleTheme);

        let second = app.tab_at(1).unwrap();
        assert_eq!(app.editors[&second].theme(), app.config.editor.theme.toggled());
        assert_eq!(app.editors[&first].theme(), app.config.editor.theme);
    }

    #[test]
    fn test_typing_relays_exact_text_to_buffer() {
        use iced::widget::text_editor::{Action, Edit};

        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        let _ = app.update(Message::NewTab);
        let _ = app.update(Message::EditorAction(Action::Edit(Edit::Insert('x'))));

        assert_eq!(app.session.active_buffer().unwrap().content(), "x");
        assert_eq!(app.active_pane().unwrap().content(), "x");

        let _ = app.update(Message::ExportPicked(Some(dir.path().to_path_buf())));
        assert_eq!(std::fs::read_to_string(dir.path().join("tab2.v")).unwrap(), "x");
    }

    #[test]
    fn test_pane_content_keeps_real_trailing_newline() {
        let pane = EditorPane::new("module m;\nendmodule\n", Default::default(), Default::default());
        assert_eq!(pane.content(), "module m;\nendmodule\n");

        let pane = EditorPane::new("endmodule", Default::default(), Default::default());
        assert_eq!(pane.content(), "endmodule");
    }

    fn key_press(key: keyboard::Key, modifiers: keyboard::Modifiers) -> KeyPress {
        KeyPress {
            key,
            modifiers,
            text: None,
            status: iced::widget::text_editor::Status::Focused,
        }
    }

    #[test]
    fn test_editor_claims_run_shortcut() {
        let enter = || keyboard::Key::Named(Named::Enter);

        assert!(matches!(
            editor_key_binding(key_press(enter(), keyboard::Modifiers::COMMAND)),
            Some(Binding::Custom(Message::Run))
        ));
        assert!(matches!(
            editor_key_binding(key_press(enter(), keyboard::Modifiers::empty())),
            Some(Binding::Enter)
        ));
    }

    #[test]
    fn test_update_consumes_session_events() {
        let mut app = app();
        let _ = app.update(Message::NewTab);
        let _ = app.update(Message::ToggleTheme);
        assert!(app.events.drain().is_empty());

        app.session.announce_theme(verilab_core::EditorTheme::Github);
        assert_eq!(
            app.events.drain(),
            vec![verilab_core::SessionEvent::ThemeChanged(verilab_core::EditorTheme::Github)]
        );
    }

    #[test]
    fn test_shortcuts() {
        let ctrl = keyboard::Modifiers::COMMAND;
        assert!(matches!(
            shortcut(&keyboard::Key::Character("t".into()), ctrl),
            Some(Message::NewTab)
        ));
        assert!(matches!(
            shortcut(&keyboard::Key::Named(Named::Tab), ctrl | keyboard::Modifiers::SHIFT),
            Some(Message::PrevTab)
        ));
        assert!(shortcut(&keyboard::Key::Character("t".into()), keyboard::Modifiers::empty()).is_none());
    }
}
