use iced::{keyboard, Subscription, Task};
use std::collections::HashMap;
use verilab_client::CompilerClient;
use verilab_core::{Config, EventHandler, Session, TabId};

pub mod messages;
pub mod types;
pub mod update;
pub mod view;

pub use messages::*;
pub use types::*;

pub struct App {
    pub session: Session,
    pub editors: HashMap<TabId, EditorPane>,
    pub client: CompilerClient,
    pub config: Config,
    pub output: String,
    pub status_message: String,
    pub backend_status: BackendStatus,
    /// Blocking notice; must be dismissed
    pub notice: Option<String>,
    pub selected_example: Option<String>,
    /// Session events, logged after each update
    pub events: EventHandler,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags { file, config } = flags;

        let session = Session::bootstrap();
        let events = EventHandler::new(session.subscribe());
        let mut app = Self {
            session,
            editors: HashMap::new(),
            client: CompilerClient::from_config(&config.backend),
            config,
            output: String::new(),
            status_message: "Ready | Ctrl+T: New Tab | Ctrl+Enter: Run | Ctrl+O: Import | Ctrl+S: Export"
                .to_string(),
            backend_status: BackendStatus::Unknown,
            notice: None,
            selected_example: None,
            events,
        };
        app.attach_editors();

        if let Some(path) = file {
            app.apply_import(path);
        }

        let task = if app.config.backend.probe_on_startup {
            app.probe_task()
        } else {
            Task::none()
        };

        (app, task)
    }

    /// Creates editor widgets for any tab that lacks one.
    pub(crate) fn attach_editors(&mut self) {
        let theme = self.config.editor.theme;
        let mode = self.config.editor.syntax;
        for buffer in self.session.buffers() {
            self.editors
                .entry(buffer.id())
                .or_insert_with(|| EditorPane::new(buffer.content(), theme, mode));
        }
    }

    pub(crate) fn active_pane(&self) -> Option<&EditorPane> {
        self.session.active_id().and_then(|id| self.editors.get(&id))
    }

    pub(crate) fn probe_task(&self) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(
            async move { client.probe().await.map_err(|e| e.to_string()) },
            Message::ProbeFinished,
        )
    }

    pub fn title(&self) -> String {
        let label = self
            .session
            .active_buffer()
            .map(|b| b.label().to_string())
            .unwrap_or_else(|_| "No tab".to_string());

        let pending = if self.session.is_pending() { " (running)" } else { "" };

        format!("{}{} - Verilab", label, pending)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers)))
    }
}

pub fn run(flags: Flags) -> iced::Result {
    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(iced::Size::new(1200.0, 800.0))
        .theme(|_| iced::Theme::Dark)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
