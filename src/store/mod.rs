//! Remote store capability.

mod memory;
mod odoo;

pub use memory::MemoryStore;
pub use odoo::OdooStore;

use anyhow::Result;

use crate::models::CallRecord;

/// The call-log store consumed by the sync writer: lookup by natural key
/// and create, nothing else. Existing records are never updated.
#[async_trait::async_trait]
pub trait CallLogStore: Send + Sync {
    /// Whether a record with this `call_id` already exists remotely.
    async fn exists(&self, call_id: &str) -> Result<bool>;

    /// Create a new call-log entity from `record`.
    async fn create(&self, record: &CallRecord) -> Result<()>;
}
