//! Effects requested by the session core
//!
//! [`EditSession`](super::EditSession) never performs I/O. Every operation
//! returns the effects it wants executed, in order; the driver carries them
//! out and feeds results (loaded text, save outcome) back in.

use super::ports::EditorWidget;
use super::state::ApplyMode;
use crate::awareness::RemoteParticipant;
use crate::protocol::RelayEnvelope;
use crate::text::{EditOperation, Position};
use std::fmt;

/// Why the document is being (re)loaded from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReloadReason {
    Initial,
    /// A transformed remote edit did not fit the local buffer
    Divergence,
    /// A remote lock was held too long
    LockTimeout,
}

impl fmt::Display for ReloadReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReloadReason::Initial => "initial",
            ReloadReason::Divergence => "divergence",
            ReloadReason::LockTimeout => "lock-timeout",
        })
    }
}

/// Calls into the editor widget
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetCommand {
    ApplyEdits {
        operations: Vec<EditOperation>,
        mode: ApplyMode,
    },
    SetReadOnly(bool),
    SetCursor(Position),
    ShowStatus(String),
    /// Document text changed; re-render any preview
    RefreshPreview(String),
    PresenceChanged(Vec<RemoteParticipant>),
}

impl WidgetCommand {
    pub fn dispatch<W: EditorWidget + ?Sized>(self, widget: &mut W) {
        match self {
            WidgetCommand::ApplyEdits { operations, mode } => widget.apply_edits(&operations, &mode),
            WidgetCommand::SetReadOnly(read_only) => widget.set_read_only(read_only),
            WidgetCommand::SetCursor(position) => widget.set_cursor_position(position),
            WidgetCommand::ShowStatus(message) => widget.show_status(&message),
            WidgetCommand::RefreshPreview(text) => widget.refresh_preview(&text),
            WidgetCommand::PresenceChanged(participants) => widget.presence_changed(&participants),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// Send an envelope to the relay
    Publish(RelayEnvelope),
    /// Load the document; answer with `document_loaded`
    Load { reason: ReloadReason },
    /// Persist a snapshot; answer with `save_completed(revision, ..)`
    Save { text: String, revision: u64 },
    Widget(WidgetCommand),
}

impl SessionEffect {
    pub fn is_publish(&self) -> bool {
        matches!(self, SessionEffect::Publish(_))
    }

    pub fn envelope(&self) -> Option<&RelayEnvelope> {
        match self {
            SessionEffect::Publish(envelope) => Some(envelope),
            _ => None,
        }
    }
}

impl From<WidgetCommand> for SessionEffect {
    fn from(command: WidgetCommand) -> Self {
        SessionEffect::Widget(command)
    }
}
