//! Edit Session Controller
//!
//! Split in two layers:
//! - [`EditSession`]: the per-document state machine. Synchronous and free
//!   of I/O; every call returns the [`SessionEffect`]s to perform.
//! - [`SessionDriver`]: the tokio task that owns the relay channels, the
//!   widget and the document store, and executes those effects.
//!
//! ```text
//! Connecting ──load──▶ Active ◀──typing=false / offline──┐
//!     ▲                  │                                │
//!     │                  └──remote typing=true──▶ RemoteLocked
//!     └──────── divergence / lock timeout reload ─────────┘
//! ```

mod controller;
mod driver;
mod effects;
mod ports;
mod state;
mod timers;

pub use controller::{EditSession, RELOAD_STATUS};
pub use driver::{RelayLink, SessionDriver};
pub use effects::{ReloadReason, SessionEffect, WidgetCommand};
pub use ports::{EditorWidget, WidgetEvent};
pub use state::{ApplyMode, SessionState};
pub use timers::{SessionTimers, TimerKind};
