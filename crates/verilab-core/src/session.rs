//! Tab session management.
//!
//! `Session` is the single source of truth for which text is being edited.
//! It owns every [`Buffer`], the active-tab pointer and the counter that
//! mints tab ids.
//!
//! ## Invariants
//!
//! - Whenever at least one buffer exists, exactly one is active and
//!   `active` names a key of `buffers`.
//! - The sequence counter never rewinds, so ids are never reused.
//! - Creating a buffer makes it active.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::buffer::{BorderState, Buffer, TabId};
use crate::config::AttributionPolicy;
use crate::event::{EventBus, SessionEvent};
use crate::library;
use crate::submission::{Completion, SubmissionResult, SubmissionTicket};
use crate::widget::EditorTheme;
use crate::{CoreError, CoreResult};

/// Open tabs plus the active-tab pointer.
///
/// ## Thread Safety
///
/// A session is owned by the UI update loop. Network results come back as
/// messages and are applied through [`Session::complete_submission`]; the
/// session itself is never shared or locked.
pub struct Session {
    /// All buffers by id
    buffers: HashMap<TabId, Buffer>,

    /// Display order of tabs
    order: Vec<TabId>,

    /// Currently active tab
    active: Option<TabId>,

    /// Last sequence number handed out
    next_sequence: u64,

    /// Last submission serial handed out
    next_serial: u64,

    /// Submissions started but not completed
    in_flight: usize,

    /// Event bus for notifications
    event_bus: EventBus,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
            order: Vec::new(),
            active: None,
            next_sequence: 0,
            next_serial: 0,
            in_flight: 0,
            event_bus: EventBus::new(),
        }
    }

    /// Creates a session holding the startup tab with the bootstrap example.
    pub fn bootstrap() -> Self {
        let mut session = Self::new();
        session.create_tab(library::bootstrap_source());
        session
    }

    // ==================== Tabs ====================

    /// Creates a tab, makes it active and returns it.
    pub fn create_tab(&mut self, initial_content: impl Into<String>) -> &Buffer {
        self.next_sequence += 1;
        let id = TabId::from_sequence(self.next_sequence);

        self.buffers.insert(id, Buffer::new(id, initial_content));
        self.order.push(id);
        self.active = Some(id);

        tracing::debug!("Created {}", id);
        self.emit(SessionEvent::TabCreated(id));
        self.emit(SessionEvent::TabFocused(id));

        &self.buffers[&id]
    }

    /// Makes `id` the active tab.
    ///
    /// Unknown ids fail with [`CoreError::TabNotFound`] and leave the active
    /// tab unchanged. Switching to the tab that is already active does nothing.
    pub fn switch_to(&mut self, id: TabId) -> CoreResult<()> {
        if !self.buffers.contains_key(&id) {
            return Err(CoreError::TabNotFound(id));
        }
        if self.active == Some(id) {
            return Ok(());
        }

        self.active = Some(id);
        tracing::debug!("Switched to {}", id);
        self.emit(SessionEvent::TabFocused(id));
        Ok(())
    }

    /// Activates the next tab in display order, wrapping around.
    pub fn next_tab(&mut self) -> CoreResult<()> {
        self.cycle(1)
    }

    /// Activates the previous tab in display order, wrapping around.
    pub fn prev_tab(&mut self) -> CoreResult<()> {
        self.cycle(-1)
    }

    fn cycle(&mut self, step: isize) -> CoreResult<()> {
        let active = self.active.ok_or(CoreError::NoActiveTab)?;
        let len = self.order.len() as isize;
        let pos = self
            .order
            .iter()
            .position(|&id| id == active)
            .ok_or(CoreError::TabNotFound(active))? as isize;
        let target = self.order[(pos + step).rem_euclid(len) as usize];
        self.switch_to(target)
    }

    /// Returns the active buffer.
    pub fn active_buffer(&self) -> CoreResult<&Buffer> {
        self.active
            .and_then(|id| self.buffers.get(&id))
            .ok_or(CoreError::NoActiveTab)
    }

    /// Returns a mutable reference to the active buffer.
    pub fn active_buffer_mut(&mut self) -> CoreResult<&mut Buffer> {
        self.active
            .and_then(|id| self.buffers.get_mut(&id))
            .ok_or(CoreError::NoActiveTab)
    }

    /// Returns the active tab id, if any.
    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    /// Returns a buffer by id.
    pub fn buffer(&self, id: TabId) -> CoreResult<&Buffer> {
        self.buffers.get(&id).ok_or(CoreError::TabNotFound(id))
    }

    /// Returns buffers in display order.
    pub fn buffers(&self) -> impl Iterator<Item = &Buffer> {
        self.order.iter().filter_map(|id| self.buffers.get(id))
    }

    /// Returns tab ids in display order.
    pub fn tab_ids(&self) -> &[TabId] {
        &self.order
    }

    /// Returns the number of open tabs.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns true if no tabs are open.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    // ==================== Content ====================

    /// Overwrites the active buffer's content.
    pub fn set_active_content(&mut self, text: impl Into<String>) -> CoreResult<()> {
        let buffer = self.active_buffer_mut()?;
        buffer.set_content(text);
        let id = buffer.id();
        self.emit(SessionEvent::ContentReplaced(id));
        Ok(())
    }

    /// Records a verdict on the active buffer without touching its content.
    pub fn set_active_border_state(&mut self, state: BorderState) -> CoreResult<()> {
        let buffer = self.active_buffer_mut()?;
        let id = buffer.id();
        if buffer.set_border_state(state) {
            self.emit(SessionEvent::BorderChanged(id, state));
        }
        Ok(())
    }

    /// Loads a built-in example into the active buffer.
    pub fn load_example(&mut self, name: &str) -> CoreResult<()> {
        let source = library::example(name)
            .ok_or_else(|| CoreError::UnknownExample(name.to_string()))?;
        self.set_active_content(source)
    }

    // ==================== Files ====================

    /// Replaces the active buffer with a file's text.
    ///
    /// Nothing is changed if the file cannot be read.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        // Check before reading so a failed import never half-applies
        self.active_buffer()?;
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Import(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Imported {} ({} bytes)", path.display(), text.len());
        self.set_active_content(text)
    }

    /// Writes the active buffer to `dir/<id>.v` and returns the path.
    pub fn export_active(&self, dir: impl AsRef<Path>) -> CoreResult<PathBuf> {
        let buffer = self.active_buffer()?;
        let path = dir.as_ref().join(buffer.export_file_name());
        std::fs::write(&path, buffer.content())?;
        tracing::info!("Exported {} to {}", buffer.id(), path.display());
        Ok(path)
    }

    // ==================== Submissions ====================

    /// Starts a submission from the active tab.
    ///
    /// Returns the ticket to hand back on completion and the code to send.
    pub fn begin_submission(&mut self) -> CoreResult<(SubmissionTicket, String)> {
        let buffer = self.active_buffer()?;
        let origin = buffer.id();
        let code = buffer.content().to_string();

        self.next_serial += 1;
        self.in_flight += 1;
        let ticket = SubmissionTicket {
            origin,
            serial: self.next_serial,
        };

        tracing::debug!("Submission #{} from {}", ticket.serial, origin);
        self.emit(SessionEvent::SubmissionStarted(origin));
        Ok((ticket, code))
    }

    /// Applies a submission result.
    ///
    /// Results are applied in the order they arrive; a later completion
    /// overwrites an earlier one on the same tab.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: SubmissionResult,
        policy: AttributionPolicy,
    ) -> Completion {
        self.in_flight = self.in_flight.saturating_sub(1);

        let target = match policy {
            AttributionPolicy::Originating => {
                Some(ticket.origin).filter(|id| self.buffers.contains_key(id))
            }
            AttributionPolicy::ActiveTab => self.active,
        };
        if policy == AttributionPolicy::ActiveTab && target != Some(ticket.origin) {
            tracing::warn!(
                "Result of submission #{} from {} applied to {:?}",
                ticket.serial,
                ticket.origin,
                target
            );
        }

        let completion = Completion::from_result(target, &result);
        if let Err(e) = &result {
            tracing::warn!("Submission #{} failed: {}", ticket.serial, e);
        }

        if let Some(id) = target
            && let Some(buffer) = self.buffers.get_mut(&id)
        {
            let state = completion.verdict.border_state();
            let changed = buffer.set_border_state(state);
            buffer.set_last_output(completion.display.clone());
            if changed {
                self.emit(SessionEvent::BorderChanged(id, state));
            }
            self.emit(SessionEvent::SubmissionFinished(id, completion.verdict));
        }

        completion
    }

    /// Number of submissions still waiting for a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns true while any submission is pending.
    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    // ==================== Events ====================

    /// Subscribes to session events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<SessionEvent> {
        self.event_bus.subscribe()
    }

    /// Tells observers the editor theme changed.
    pub fn announce_theme(&self, theme: EditorTheme) {
        self.emit(SessionEvent::ThemeChanged(theme));
    }

    fn emit(&self, event: SessionEvent) {
        self.event_bus.emit(event);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
