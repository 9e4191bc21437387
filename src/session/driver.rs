//! Async driver for an [`EditSession`]
//!
//! Owns the channels and ports of one open document and runs a single
//! cooperative loop: relay messages, widget events and timer deadlines are
//! fed to the session core, and the effects it returns are executed in
//! order. Store calls are awaited inline, so at most one load or save is in
//! flight at any time.

use super::controller::EditSession;
use super::effects::SessionEffect;
use super::ports::{EditorWidget, WidgetEvent};
use crate::protocol::RelayEnvelope;
use crate::storage::DocumentStore;
use std::collections::VecDeque;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, Instrument};

/// Both directions of the relay connection for one session
#[derive(Debug)]
pub struct RelayLink {
    pub outbound: mpsc::Sender<RelayEnvelope>,
    pub inbound: mpsc::Receiver<RelayEnvelope>,
}

pub struct SessionDriver<W, S> {
    session: EditSession,
    widget: W,
    store: S,
    relay: RelayLink,
    widget_events: mpsc::Receiver<WidgetEvent>,
    shutdown: CancellationToken,
}

impl<W: EditorWidget, S: DocumentStore> SessionDriver<W, S> {
    pub fn new(
        session: EditSession,
        widget: W,
        store: S,
        relay: RelayLink,
        widget_events: mpsc::Receiver<WidgetEvent>,
    ) -> Self {
        Self {
            session,
            widget,
            store,
            relay,
            widget_events,
            shutdown: CancellationToken::new(),
        }
    }

    /// Stop the loop when `token` is cancelled
    pub fn with_shutdown(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Token that ends [`run`](Self::run) when cancelled
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Run until shutdown or until either inbound channel closes
    ///
    /// The session is closed on the way out (final flush, offline
    /// announcement, final save when dirty) and handed back.
    pub async fn run(mut self) -> EditSession {
        let span = tracing::debug_span!(
            "edit_session",
            document = %self.session.document_id(),
            participant = %self.session.local_id()
        );
        async move {
            let effects = self.session.start();
            self.execute(effects).await;

            loop {
                let deadline = self.session.next_deadline();
                tokio::select! {
                    biased;

                    _ = self.shutdown.cancelled() => {
                        debug!("shutdown requested");
                        break;
                    }

                    envelope = self.relay.inbound.recv() => match envelope {
                        Some(envelope) => {
                            let effects = self.session.handle_relay(envelope, Instant::now());
                            self.execute(effects).await;
                        }
                        None => {
                            debug!("relay closed");
                            break;
                        }
                    },

                    event = self.widget_events.recv() => match event {
                        Some(event) => match self.session.handle_widget_event(event, Instant::now()) {
                            Ok(effects) => self.execute(effects).await,
                            Err(err) => debug!(error = %err, "widget event rejected"),
                        },
                        None => {
                            debug!("widget event channel closed");
                            break;
                        }
                    },

                    _ = sleep_until(deadline) => {
                        let effects = self.session.fire_timers(Instant::now());
                        self.execute(effects).await;
                    }
                }
            }

            let effects = self.session.close();
            self.execute(effects).await;
            self.session
        }
        .instrument(span)
        .await
    }

    async fn execute(&mut self, effects: Vec<SessionEffect>) {
        let mut queue: VecDeque<SessionEffect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            match effect {
                SessionEffect::Publish(envelope) => {
                    if self.relay.outbound.send(envelope).await.is_err() {
                        debug!("relay outbound closed, dropping message");
                    }
                }
                SessionEffect::Load { reason } => {
                    debug!(%reason, "loading document");
                    let result = self.store.load_document(self.session.document_id()).await;
                    queue.extend(self.session.document_loaded(result, Instant::now()));
                }
                SessionEffect::Save { text, revision } => {
                    let result = self
                        .store
                        .save_document(self.session.document_id(), &text)
                        .await;
                    queue.extend(self.session.save_completed(revision, result));
                }
                SessionEffect::Widget(command) => command.dispatch(&mut self.widget),
            }
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
