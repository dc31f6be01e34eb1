// src/store/memory.rs
//! In-memory store implementation for testing.

use std::collections::HashMap;

use anyhow::Result;
use tokio::sync::Mutex;

use crate::models::CallRecord;

use super::CallLogStore;

/// In-memory call-log store for testing purposes.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, CallRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }

    pub async fn get(&self, call_id: &str) -> Option<CallRecord> {
        self.records.lock().await.get(call_id).cloned()
    }
}

#[async_trait::async_trait]
impl CallLogStore for MemoryStore {
    async fn exists(&self, call_id: &str) -> Result<bool> {
        Ok(self.records.lock().await.contains_key(call_id))
    }

    async fn create(&self, record: &CallRecord) -> Result<()> {
        let mut records = self.records.lock().await;
        if records.contains_key(&record.call_id) {
            anyhow::bail!("duplicate call_id: {}", record.call_id);
        }
        records.insert(record.call_id.clone(), record.clone());
        Ok(())
    }
}
