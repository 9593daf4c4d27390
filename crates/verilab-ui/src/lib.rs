//! # Verilab UI
//!
//! Desktop front-end for the Verilab editor, built on iced.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture:
//! - **Model**: [`App`] wraps a [`verilab_core::Session`] plus one editor
//!   widget per tab
//! - **Message**: Events from widgets, shortcuts and finished tasks
//! - **Update**: Applies a message to the session and returns follow-up tasks
//! - **View**: Renders toolbar, tab strip, editor, output panel and status bar
//!
//! Network calls run as `Task`s; their results come back as messages tagged
//! with the submission ticket, so a tab switch mid-run does not confuse
//! attribution.

pub mod app;
pub mod highlighter;
pub mod theme;

pub use app::{run, App, Flags};
