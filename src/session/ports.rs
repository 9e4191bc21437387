//! Editor widget boundary
//!
//! The widget owns what the user sees. It reports content and cursor
//! changes as [`WidgetEvent`]s and receives commands through
//! [`EditorWidget`].

use super::state::ApplyMode;
use crate::awareness::RemoteParticipant;
use crate::text::{EditOperation, Position, Range};

/// Something happened in the editor
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Content changed; operations are sequential and already applied by
    /// the widget. `mode` is whatever the widget was told when it applied
    /// them, so echoes of remote edits come back as non-local.
    ContentChanged {
        operations: Vec<EditOperation>,
        mode: ApplyMode,
    },
    /// Local caret or selections moved
    CursorChanged { ranges: Vec<Range> },
}

impl WidgetEvent {
    /// A change typed by the local user
    pub fn typed(operations: Vec<EditOperation>) -> Self {
        WidgetEvent::ContentChanged {
            operations,
            mode: ApplyMode::Local,
        }
    }
}

/// Commands the session sends to the editor widget
pub trait EditorWidget {
    /// Apply edits in order; echo them back with the same `mode`
    fn apply_edits(&mut self, operations: &[EditOperation], mode: &ApplyMode);

    fn set_read_only(&mut self, read_only: bool);

    fn set_cursor_position(&mut self, position: Position);

    /// Transient user-visible status line
    fn show_status(&mut self, _message: &str) {}

    fn refresh_preview(&mut self, _text: &str) {}

    /// Remote participants changed (cursors, online or typing state)
    fn presence_changed(&mut self, _participants: &[RemoteParticipant]) {}
}
