use crate::ParticipantId;
use std::fmt;

/// Lifecycle of an edit session
///
/// `Connecting` covers both the initial load and any recovery reload; local
/// edits are rejected until the document is installed again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Active,
    /// A remote participant is typing and the local editor is read-only
    RemoteLocked { holder: ParticipantId },
    Closed,
}

impl SessionState {
    /// Whether local edits are accepted
    pub fn is_editable(&self) -> bool {
        matches!(self, SessionState::Active)
    }

    /// Whether a document baseline is installed and remote edits apply
    pub fn is_live(&self) -> bool {
        matches!(self, SessionState::Active | SessionState::RemoteLocked { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Connecting => "connecting",
            SessionState::Active => "active",
            SessionState::RemoteLocked { .. } => "remote-locked",
            SessionState::Closed => "closed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::RemoteLocked { holder } => write!(f, "remote-locked by {}", holder),
            other => f.write_str(other.name()),
        }
    }
}

/// Where an edit handed to the widget (or echoed back by it) came from
///
/// The widget reports every content change, including the ones the session
/// itself asked it to apply. The mode travels with the edit so those echoes
/// are recognized and never treated as local typing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApplyMode {
    /// Typed by the local user
    Local,
    /// Received from a peer through the relay
    Remote { sender: ParticipantId },
    /// Whole-document install after a (re)load
    Reload,
}

impl ApplyMode {
    pub fn is_local(&self) -> bool {
        matches!(self, ApplyMode::Local)
    }

    pub fn sender(&self) -> Option<&str> {
        match self {
            ApplyMode::Remote { sender } => Some(sender),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_active_is_editable() {
        assert!(SessionState::Active.is_editable());
        assert!(!SessionState::Connecting.is_editable());
        assert!(!SessionState::RemoteLocked {
            holder: "bob".to_string()
        }
        .is_editable());
        assert!(SessionState::RemoteLocked {
            holder: "bob".to_string()
        }
        .is_live());
    }

    #[test]
    fn test_display() {
        let locked = SessionState::RemoteLocked {
            holder: "bob".to_string(),
        };
        assert_eq!(locked.to_string(), "remote-locked by bob");
        assert_eq!(SessionState::Closed.to_string(), "closed");
    }

    #[test]
    fn test_apply_mode_sender() {
        let mode = ApplyMode::Remote {
            sender: "bob".to_string(),
        };
        assert_eq!(mode.sender(), Some("bob"));
        assert!(!mode.is_local());
        assert_eq!(ApplyMode::Local.sender(), None);
    }
}
