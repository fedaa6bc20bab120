use async_trait::async_trait;
use bson::oid::ObjectId;
use serde::Serialize;
use serde_json::{Map, Value};

use super::models::SkillFields;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("malformed document: {0}")]
    Malformed(#[from] bson::ser::Error),
}

// The original service returned the driver's raw operation summaries to
// callers, so these mirror that wire shape. The driver's own result types are
// non-exhaustive and cannot be built by other backends.

#[derive(Debug, Clone, Serialize)]
pub struct InsertSummary {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteSummary {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSummary {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Access to the skill collection. Handlers receive an implementation through
/// app data; nothing in the request path talks to the database directly.
#[async_trait]
pub trait SkillStore: Send + Sync {
    /// Every skill document, in the store's natural order.
    async fn list(&self) -> Result<Vec<Value>, StoreError>;

    async fn insert(&self, document: Map<String, Value>) -> Result<InsertSummary, StoreError>;

    /// Removes at most one document. A zero count is not an error.
    async fn delete(&self, id: ObjectId) -> Result<DeleteSummary, StoreError>;

    /// Rewrites the fixed field set, creating the document under `id` if absent.
    async fn upsert(&self, id: ObjectId, fields: SkillFields) -> Result<UpdateSummary, StoreError>;

    /// Appends `entry` to the named category array of the parent document,
    /// creating the array if it does not exist yet.
    async fn push_entry(
        &self,
        id: ObjectId,
        category: &str,
        entry: Map<String, Value>,
    ) -> Result<UpdateSummary, StoreError>;
}

/// Access to the read-only "about me" collection.
#[async_trait]
pub trait AboutStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Value>, StoreError>;
}
