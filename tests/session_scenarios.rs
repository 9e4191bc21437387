//! End-to-end session scenarios on a paused tokio clock
//!
//! Sessions run inside their real drivers and talk through an in-memory
//! relay hub that broadcasts every envelope to every session, including the
//! one that sent it.

use coedit_core::protocol::{CursorDto, PresenceDto, RangeDto};
use coedit_core::{
    ApplyMode, CoeditError, DocumentStore, EditOperation, EditSession, EditorWidget, MemoryStore,
    ParticipantTimestampMap, Position, Range, RelayEnvelope, RelayLink, RelayMessage,
    RemoteParticipant, Result, SessionConfig, SessionDriver, WidgetEvent,
};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const DOC: &str = "doc-1";

#[derive(Debug, Default)]
struct WidgetLog {
    applied: Vec<(Vec<EditOperation>, ApplyMode)>,
    read_only: Vec<bool>,
    statuses: Vec<String>,
    cursors: Vec<Position>,
    presence: Vec<Vec<RemoteParticipant>>,
}

/// Widget that records every command and echoes applied edits back, the
/// way a real editor reports its own content changes
#[derive(Clone)]
struct RecordingWidget {
    log: Arc<Mutex<WidgetLog>>,
    events: mpsc::Sender<WidgetEvent>,
}

impl RecordingWidget {
    fn last_read_only(&self) -> Option<bool> {
        self.log.lock().unwrap().read_only.last().copied()
    }

    fn statuses(&self) -> Vec<String> {
        self.log.lock().unwrap().statuses.clone()
    }
}

impl EditorWidget for RecordingWidget {
    fn apply_edits(&mut self, operations: &[EditOperation], mode: &ApplyMode) {
        self.log
            .lock()
            .unwrap()
            .applied
            .push((operations.to_vec(), mode.clone()));
        let _ = self.events.try_send(WidgetEvent::ContentChanged {
            operations: operations.to_vec(),
            mode: mode.clone(),
        });
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.log.lock().unwrap().read_only.push(read_only);
    }

    fn set_cursor_position(&mut self, position: Position) {
        self.log.lock().unwrap().cursors.push(position);
    }

    fn show_status(&mut self, message: &str) {
        self.log.lock().unwrap().statuses.push(message.to_string());
    }

    fn presence_changed(&mut self, participants: &[RemoteParticipant]) {
        self.log
            .lock()
            .unwrap()
            .presence
            .push(participants.to_vec());
    }
}

/// Memory-backed store that counts calls and can fail saves on demand
#[derive(Clone, Default)]
struct InstrumentedStore {
    inner: MemoryStore,
    loads: Arc<AtomicUsize>,
    saves: Arc<AtomicUsize>,
    failing_saves: Arc<AtomicUsize>,
}

impl InstrumentedStore {
    fn with_document(text: &str) -> Self {
        Self {
            inner: MemoryStore::with_document(DOC, text),
            ..Self::default()
        }
    }

    fn fail_next_saves(&self, count: usize) {
        self.failing_saves.store(count, Ordering::SeqCst);
    }

    fn saved_text(&self) -> Option<String> {
        self.inner.get(DOC)
    }
}

impl DocumentStore for InstrumentedStore {
    fn load_document(&self, document_id: &str) -> impl Future<Output = Result<String>> + Send {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load_document(document_id)
    }

    fn save_document(
        &self,
        document_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let fail = self
            .failing_saves
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if !fail {
            self.inner.insert(document_id, text);
        }
        async move {
            if fail {
                Err(CoeditError::Persistence("disk full".to_string()))
            } else {
                Ok(())
            }
        }
    }
}

struct Peer {
    widget: RecordingWidget,
    events: mpsc::Sender<WidgetEvent>,
    shutdown: CancellationToken,
    handle: JoinHandle<EditSession>,
}

impl Peer {
    async fn type_op(&self, operation: EditOperation) {
        self.events
            .send(WidgetEvent::typed(vec![operation]))
            .await
            .unwrap();
    }

    async fn stop(self) -> EditSession {
        self.shutdown.cancel();
        self.handle.await.unwrap()
    }
}

fn spawn_peer(
    id: &str,
    config: SessionConfig,
    store: InstrumentedStore,
    outbound: mpsc::Sender<RelayEnvelope>,
    inbound: mpsc::Receiver<RelayEnvelope>,
) -> Peer {
    let (events_tx, events_rx) = mpsc::channel(256);
    let widget = RecordingWidget {
        log: Arc::new(Mutex::new(WidgetLog::default())),
        events: events_tx.clone(),
    };

    let session = EditSession::new(DOC, id, config);
    let driver = SessionDriver::new(
        session,
        widget.clone(),
        store,
        RelayLink { outbound, inbound },
        events_rx,
    );
    let shutdown = driver.shutdown_token();
    let handle = tokio::spawn(driver.run());

    Peer {
        widget,
        events: events_tx,
        shutdown,
        handle,
    }
}

/// Relay hub: broadcasts every envelope to every inbound channel
fn spawn_hub(
    inbound: Vec<mpsc::Sender<RelayEnvelope>>,
    copies: usize,
) -> (mpsc::Sender<RelayEnvelope>, Arc<Mutex<Vec<RelayEnvelope>>>) {
    let (bus_tx, mut bus_rx) = mpsc::channel::<RelayEnvelope>(1024);
    let history = Arc::new(Mutex::new(Vec::new()));
    let recorded = history.clone();

    tokio::spawn(async move {
        while let Some(envelope) = bus_rx.recv().await {
            recorded.lock().unwrap().push(envelope.clone());
            for tx in &inbound {
                for _ in 0..copies {
                    let _ = tx.send(envelope.clone()).await;
                }
            }
        }
    });

    (bus_tx, history)
}

fn two_peers(
    store: &InstrumentedStore,
    config: SessionConfig,
    copies: usize,
) -> (Peer, Peer, Arc<Mutex<Vec<RelayEnvelope>>>) {
    let (alice_tx, alice_rx) = mpsc::channel(1024);
    let (bob_tx, bob_rx) = mpsc::channel(1024);
    let (bus, history) = spawn_hub(vec![alice_tx, bob_tx], copies);

    let alice = spawn_peer("alice", config.clone(), store.clone(), bus.clone(), alice_rx);
    let bob = spawn_peer("bob", config, store.clone(), bus, bob_rx);
    (alice, bob, history)
}

async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[tokio::test(start_paused = true)]
async fn concurrent_edits_on_different_lines_converge() {
    let store = InstrumentedStore::with_document("line1\nline2\nline3");
    let (alice, bob, _) = two_peers(&store, SessionConfig::default(), 1);
    settle(Duration::from_millis(100)).await;

    alice
        .type_op(EditOperation::insert(Position::new(1, 1), "X\n"))
        .await;
    bob.type_op(EditOperation::insert(Position::new(2, 1), "Y"))
        .await;
    settle(Duration::from_secs(2)).await;

    let alice = alice.stop().await;
    let bob = bob.stop().await;

    assert_eq!(alice.text(), "X\nline1\nYline2\nline3");
    assert_eq!(bob.text(), alice.text());
    assert_eq!(store.saved_text().as_deref(), Some("X\nline1\nYline2\nline3"));
}

#[tokio::test(start_paused = true)]
async fn concurrent_inserts_at_same_point_converge() {
    let store = InstrumentedStore::with_document("ab");
    let (alice, bob, _) = two_peers(&store, SessionConfig::default(), 1);
    settle(Duration::from_millis(100)).await;

    alice
        .type_op(EditOperation::insert(Position::new(1, 2), "111"))
        .await;
    bob.type_op(EditOperation::insert(Position::new(1, 2), "222"))
        .await;
    settle(Duration::from_secs(2)).await;

    let alice = alice.stop().await;
    let bob = bob.stop().await;

    assert_eq!(alice.text(), bob.text());
    assert!(alice.text().starts_with('a') && alice.text().ends_with('b'));
    assert_eq!(alice.text().len(), 8);
}

#[tokio::test(start_paused = true)]
async fn redelivered_batches_apply_once() {
    let store = InstrumentedStore::with_document("hello");
    let (alice, bob, _) = two_peers(&store, SessionConfig::default(), 2);
    settle(Duration::from_millis(100)).await;

    alice
        .type_op(EditOperation::insert(Position::new(1, 6), " world"))
        .await;
    settle(Duration::from_secs(2)).await;

    let bob = bob.stop().await;
    let alice = alice.stop().await;

    assert_eq!(bob.text(), "hello world");
    assert_eq!(alice.text(), "hello world");
}

#[tokio::test(start_paused = true)]
async fn remote_edits_are_not_echoed_back_as_local() {
    let store = InstrumentedStore::with_document("abc");
    let (alice, bob, history) = two_peers(&store, SessionConfig::default(), 1);
    settle(Duration::from_millis(100)).await;

    alice
        .type_op(EditOperation::insert(Position::new(1, 4), "d"))
        .await;
    settle(Duration::from_secs(2)).await;

    let bob_widget = bob.widget.clone();
    let bob = bob.stop().await;
    alice.stop().await;

    // Bob's widget echoed the remote edit, but bob never published an edit
    let bob_edits = history
        .lock()
        .unwrap()
        .iter()
        .filter(|envelope| envelope.actor_id == "bob")
        .filter(|envelope| matches!(envelope.decode(), Ok(RelayMessage::Edit(_))))
        .count();
    assert_eq!(bob_edits, 0);
    assert!(!bob.is_dirty());
    assert!(bob_widget
        .log
        .lock()
        .unwrap()
        .applied
        .iter()
        .any(|(_, mode)| matches!(mode, ApplyMode::Remote { sender } if sender == "alice")));
}

#[tokio::test(start_paused = true)]
async fn lock_timeout_triggers_exactly_one_reload() {
    let store = InstrumentedStore::with_document("abc");
    let config = SessionConfig {
        lock_while_remote_typing: true,
        ..SessionConfig::default()
    };
    let (outbound, _published) = mpsc::channel(1024);
    let (inbound_tx, inbound_rx) = mpsc::channel(1024);
    let alice = spawn_peer("alice", config, store.clone(), outbound, inbound_rx);
    settle(Duration::from_millis(100)).await;

    let typing = RelayEnvelope::presence(
        "bob",
        PresenceDto {
            online: true,
            typing: true,
            name: Some("Bob".to_string()),
        },
    )
    .unwrap();
    inbound_tx.send(typing).await.unwrap();
    settle(Duration::from_millis(100)).await;
    assert_eq!(alice.widget.last_read_only(), Some(true));

    settle(Duration::from_secs(10)).await;

    assert_eq!(store.loads.load(Ordering::SeqCst), 2);
    assert_eq!(alice.widget.statuses(), vec!["Reloading document…".to_string()]);
    assert_eq!(alice.widget.last_read_only(), Some(false));

    let session = alice.stop().await;
    assert_eq!(session.text(), "abc");
}

#[tokio::test(start_paused = true)]
async fn failed_save_is_retried_on_next_tick() {
    let store = InstrumentedStore::with_document("abc");
    store.fail_next_saves(1);
    let (outbound, _published) = mpsc::channel(1024);
    let (_inbound_tx, inbound_rx) = mpsc::channel(1024);
    let alice = spawn_peer("alice", SessionConfig::default(), store.clone(), outbound, inbound_rx);
    settle(Duration::from_millis(100)).await;

    alice
        .type_op(EditOperation::insert(Position::new(1, 4), "d"))
        .await;

    // Typing idle save fails
    settle(Duration::from_secs(4)).await;
    assert_eq!(store.saves.load(Ordering::SeqCst), 1);
    assert_eq!(store.saved_text().as_deref(), Some("abc"));

    // Periodic save retries
    settle(Duration::from_secs(27)).await;
    assert_eq!(store.saves.load(Ordering::SeqCst), 2);
    assert_eq!(store.saved_text().as_deref(), Some("abcd"));

    let session = alice.stop().await;
    assert!(!session.is_dirty());
    assert_eq!(store.saves.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn teardown_flushes_and_saves() {
    let store = InstrumentedStore::with_document("abc");
    let (outbound, mut published) = mpsc::channel(1024);
    let (_inbound_tx, inbound_rx) = mpsc::channel(1024);
    let alice = spawn_peer("alice", SessionConfig::default(), store.clone(), outbound, inbound_rx);
    settle(Duration::from_millis(100)).await;

    alice
        .type_op(EditOperation::insert(Position::new(1, 1), ">"))
        .await;
    settle(Duration::from_millis(10)).await;
    let session = alice.stop().await;

    assert_eq!(store.saved_text().as_deref(), Some(">abc"));
    assert!(!session.is_dirty());

    let mut messages = Vec::new();
    while let Ok(envelope) = published.try_recv() {
        messages.push(envelope.decode().unwrap());
    }
    assert!(messages.iter().any(|m| matches!(m, RelayMessage::Edit(_))));
    assert!(matches!(
        messages.last(),
        Some(RelayMessage::Presence(PresenceDto { online: false, .. }))
    ));
}

#[tokio::test(start_paused = true)]
async fn offline_participants_have_no_cursors() {
    let store = InstrumentedStore::with_document("abc\ndef");
    let (outbound, _published) = mpsc::channel(1024);
    let (inbound_tx, inbound_rx) = mpsc::channel(1024);
    let alice = spawn_peer("alice", SessionConfig::default(), store.clone(), outbound, inbound_rx);
    settle(Duration::from_millis(100)).await;

    let cursor = RelayEnvelope::cursor(
        "bob",
        CursorDto {
            ranges: vec![RangeDto::from(Range::caret(Position::new(2, 2)))],
            timestamp: 1,
            known: ParticipantTimestampMap::new(),
        },
    )
    .unwrap();
    inbound_tx.send(cursor).await.unwrap();
    settle(Duration::from_millis(100)).await;

    {
        let log = alice.widget.log.lock().unwrap();
        let latest = log.presence.last().unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].cursor_ranges, vec![Range::caret(Position::new(2, 2))]);
    }

    let offline = RelayEnvelope::presence(
        "bob",
        PresenceDto {
            online: false,
            typing: false,
            name: None,
        },
    )
    .unwrap();
    inbound_tx.send(offline).await.unwrap();
    settle(Duration::from_millis(100)).await;

    let session = alice.stop().await;
    let bob = session.presence().participant("bob").unwrap();
    assert!(!bob.online);
    assert!(bob.cursor_ranges.is_empty());
}

#[tokio::test(start_paused = true)]
async fn silent_participants_time_out() {
    let store = InstrumentedStore::with_document("abc");
    let (outbound, _published) = mpsc::channel(1024);
    let (inbound_tx, inbound_rx) = mpsc::channel(1024);
    let alice = spawn_peer("alice", SessionConfig::default(), store.clone(), outbound, inbound_rx);
    settle(Duration::from_millis(100)).await;

    let online = RelayEnvelope::presence(
        "bob",
        PresenceDto {
            online: true,
            typing: false,
            name: None,
        },
    )
    .unwrap();
    inbound_tx.send(online).await.unwrap();
    settle(Duration::from_secs(45)).await;

    let session = alice.stop().await;
    assert_eq!(session.presence().online_count(), 0);
    assert_eq!(session.presence().len(), 1);
}
