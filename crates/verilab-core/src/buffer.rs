//! Editing buffers (one per tab).
//!
//! ## Learning: Newtypes
//!
//! `TabId` wraps the sequence number a tab was minted with. Keeping it a
//! distinct type means a tab index, a sequence number and an id can never be
//! mixed up, while `Display` still renders the familiar `tab<N>` form.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// File name used for exports when no tab is active.
pub const FALLBACK_EXPORT_NAME: &str = "verilog_code.v";

/// Unique identifier for a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TabId(u64);

impl TabId {
    /// Wraps a sequence number.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(sequence)
    }

    /// Returns the sequence number this id was minted with.
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tab{}", self.0)
    }
}

/// Error returned when a string is not of the form `tab<N>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid tab id: {0:?}")]
pub struct ParseTabIdError(String);

impl FromStr for TabId {
    type Err = ParseTabIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("tab")
            .and_then(|n| n.parse::<u64>().ok())
            .map(TabId)
            .ok_or_else(|| ParseTabIdError(s.to_string()))
    }
}

/// Verdict of the last submission, used for the editor border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderState {
    #[default]
    Neutral,
    Success,
    Failure,
}

/// One editable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    id: TabId,
    label: String,
    content: String,
    border_state: BorderState,
    last_output: Option<String>,
}

impl Buffer {
    /// Creates a buffer for a freshly minted id.
    pub(crate) fn new(id: TabId, content: impl Into<String>) -> Self {
        Self {
            id,
            label: format!("Tab {}", id.sequence()),
            content: content.into(),
            border_state: BorderState::Neutral,
            last_output: None,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    /// Display name shown in the tab bar.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn border_state(&self) -> BorderState {
        self.border_state
    }

    /// Output of the last submission attributed to this buffer.
    pub fn last_output(&self) -> Option<&str> {
        self.last_output.as_deref()
    }

    /// Name of the file this buffer exports to.
    pub fn export_file_name(&self) -> String {
        format!("{}.v", self.id)
    }

    pub(crate) fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Returns true if the state actually changed.
    pub(crate) fn set_border_state(&mut self, state: BorderState) -> bool {
        let changed = self.border_state != state;
        self.border_state = state;
        changed
    }

    pub(crate) fn set_last_output(&mut self, output: impl Into<String>) {
        self.last_output = Some(output.into());
    }
}

/// Export file name for an optional active buffer.
pub fn export_file_name(active: Option<&Buffer>) -> String {
    active
        .map(Buffer::export_file_name)
        .unwrap_or_else(|| FALLBACK_EXPORT_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_id_display_and_parse() {
        let id = TabId::from_sequence(3);
        assert_eq!(id.to_string(), "tab3");
        assert_eq!("tab3".parse::<TabId>().unwrap(), id);
        assert!("tab".parse::<TabId>().is_err());
        assert!("3".parse::<TabId>().is_err());
        assert!("tabx".parse::<TabId>().is_err());
    }

    #[test]
    fn test_new_buffer_defaults() {
        let buf = Buffer::new(TabId::from_sequence(2), "module m; endmodule");
        assert_eq!(buf.label(), "Tab 2");
        assert_eq!(buf.border_state(), BorderState::Neutral);
        assert!(buf.last_output().is_none());
    }

    #[test]
    fn test_export_file_name() {
        let buf = Buffer::new(TabId::from_sequence(7), "");
        assert_eq!(export_file_name(Some(&buf)), "tab7.v");
        assert_eq!(export_file_name(None), FALLBACK_EXPORT_NAME);
    }

    #[test]
    fn test_border_change_reports_difference() {
        let mut buf = Buffer::new(TabId::from_sequence(1), "");
        assert!(buf.set_border_state(BorderState::Failure));
        assert!(!buf.set_border_state(BorderState::Failure));
        assert!(buf.set_border_state(BorderState::Success));
    }
}
