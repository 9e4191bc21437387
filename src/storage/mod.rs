//! Persistence boundary
//!
//! The engine only ever loads a whole document and saves a whole snapshot.
//! Backends implement [`DocumentStore`]; [`MemoryStore`] keeps documents in
//! process memory and is what the tests run against.

use crate::error::{CoeditError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Snapshot sink for document text
///
/// Implementations can write to disk, call an HTTP API, or use other
/// backends. The driver awaits each call before handling the next event.
pub trait DocumentStore {
    /// Load the latest saved text of a document
    fn load_document(&self, document_id: &str) -> impl Future<Output = Result<String>> + Send;

    /// Replace the saved text of a document
    fn save_document(
        &self,
        document_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// In-memory document store
///
/// Clones share the same documents, so one store can back several sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with one document
    pub fn with_document(document_id: &str, text: &str) -> Self {
        let store = Self::new();
        store.insert(document_id, text);
        store
    }

    pub fn insert(&self, document_id: &str, text: &str) {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert(document_id.to_string(), text.to_string());
        }
    }

    /// Current saved text, without going through the async interface
    pub fn get(&self, document_id: &str) -> Option<String> {
        self.documents
            .lock()
            .ok()
            .and_then(|documents| documents.get(document_id).cloned())
    }

    fn read(&self, document_id: &str) -> Result<String> {
        let documents = self
            .documents
            .lock()
            .map_err(|_| CoeditError::Persistence("store lock poisoned".to_string()))?;
        documents
            .get(document_id)
            .cloned()
            .ok_or_else(|| CoeditError::Persistence(format!("document {} not found", document_id)))
    }

    fn write(&self, document_id: &str, text: &str) -> Result<()> {
        let mut documents = self
            .documents
            .lock()
            .map_err(|_| CoeditError::Persistence("store lock poisoned".to_string()))?;
        documents.insert(document_id.to_string(), text.to_string());
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn load_document(&self, document_id: &str) -> impl Future<Output = Result<String>> + Send {
        let result = self.read(document_id);
        async move { result }
    }

    fn save_document(
        &self,
        document_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let result = self.write(document_id, text);
        async move { result }
    }
}
