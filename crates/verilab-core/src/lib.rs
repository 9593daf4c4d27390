//! # Verilab Core
//!
//! Session state and bookkeeping for the Verilab editor.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Session                            │
//! │  ┌─────────────┐ ┌─────────────┐ ┌──────────────────────┐ │
//! │  │  Event Bus  │ │ Submissions │ │  Command Dispatcher  │ │
//! │  └─────────────┘ └─────────────┘ └──────────────────────┘ │
//! │         │                                                 │
//! │  ┌──────┴──────────────────────────────────┐              │
//! │  │               Buffers (tabs)             │              │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐     │              │
//! │  │  │  tab1   │ │  tab2   │ │  tab3   │     │              │
//! │  │  └─────────┘ └─────────┘ └─────────┘     │              │
//! │  └──────────────────────────────────────────┘              │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate renders or talks to the network. The UI owns a
//! [`Session`] and feeds it [`Command`]s; the HTTP client lives in
//! `verilab-client`.

pub mod buffer;
pub mod command;
pub mod config;
pub mod event;
pub mod library;
pub mod session;
pub mod submission;
pub mod widget;

pub use buffer::{export_file_name, BorderState, Buffer, TabId};
pub use command::{Command, CommandOutcome};
pub use config::{AttributionPolicy, Config};
pub use event::{EventBus, EventHandler, SessionEvent};
pub use session::Session;
pub use submission::{Completion, SubmissionFailure, SubmissionResult, SubmissionTicket, Verdict};
pub use widget::{EditorTheme, EditorWidget, MemoryWidget, SyntaxMode};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("No active tab")]
    NoActiveTab,

    #[error("Unknown example: {0}")]
    UnknownExample(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}
