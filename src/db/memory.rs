//! In-memory store backend, used by the test suite and for running the API
//! without a MongoDB instance. Documents are plain JSON objects whose `_id`
//! is the hex form an ObjectId would have.

use std::sync::Mutex;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::{Map, Value};

use super::models::SkillFields;
use super::store::{
    AboutStore, DeleteSummary, InsertSummary, SkillStore, StoreError, UpdateSummary,
};

#[derive(Default)]
pub struct MemoryStore {
    skills: Mutex<Vec<Map<String, Value>>>,
    about: Mutex<Vec<Map<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_about(entries: Vec<Map<String, Value>>) -> Self {
        Self {
            skills: Mutex::new(Vec::new()),
            about: Mutex::new(entries),
        }
    }

    /// Snapshot of the skill collection, for assertions and debugging.
    pub fn skills(&self) -> Vec<Map<String, Value>> {
        self.skills.lock().expect("skill lock poisoned").clone()
    }
}

fn has_id(document: &Map<String, Value>, hex: &str) -> bool {
    document.get("_id").and_then(Value::as_str) == Some(hex)
}

#[async_trait]
impl SkillStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Value>, StoreError> {
        let skills = self.skills.lock().expect("skill lock poisoned");
        Ok(skills.iter().cloned().map(Value::Object).collect())
    }

    async fn insert(&self, mut document: Map<String, Value>) -> Result<InsertSummary, StoreError> {
        let inserted_id = match document.get("_id").and_then(Value::as_str) {
            Some(existing) => existing.to_string(),
            None => {
                let id = ObjectId::new().to_hex();
                document.insert("_id".to_string(), Value::String(id.clone()));
                id
            }
        };

        self.skills.lock().expect("skill lock poisoned").push(document);

        Ok(InsertSummary {
            acknowledged: true,
            inserted_id,
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteSummary, StoreError> {
        let hex = id.to_hex();
        let mut skills = self.skills.lock().expect("skill lock poisoned");

        let deleted_count = match skills.iter().position(|document| has_id(document, &hex)) {
            Some(position) => {
                skills.remove(position);
                1
            }
            None => 0,
        };

        Ok(DeleteSummary {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn upsert(&self, id: ObjectId, fields: SkillFields) -> Result<UpdateSummary, StoreError> {
        let hex = id.to_hex();
        let replacement = fields.into_document();
        let mut skills = self.skills.lock().expect("skill lock poisoned");

        match skills.iter_mut().find(|document| has_id(document, &hex)) {
            Some(existing) => {
                let mut modified_count = 0;
                for (key, value) in replacement {
                    if existing.get(&key) != Some(&value) {
                        existing.insert(key, value);
                        modified_count = 1;
                    }
                }

                Ok(UpdateSummary {
                    acknowledged: true,
                    matched_count: 1,
                    modified_count,
                    upserted_id: None,
                })
            }
            None => {
                let mut document = Map::new();
                document.insert("_id".to_string(), Value::String(hex.clone()));
                document.extend(replacement);
                skills.push(document);

                Ok(UpdateSummary {
                    acknowledged: true,
                    matched_count: 0,
                    modified_count: 0,
                    upserted_id: Some(hex),
                })
            }
        }
    }

    async fn push_entry(
        &self,
        id: ObjectId,
        category: &str,
        entry: Map<String, Value>,
    ) -> Result<UpdateSummary, StoreError> {
        let hex = id.to_hex();
        let mut skills = self.skills.lock().expect("skill lock poisoned");

        let Some(parent) = skills.iter_mut().find(|document| has_id(document, &hex)) else {
            return Ok(UpdateSummary {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_id: None,
            });
        };

        // $push creates the array when the field is absent.
        let slot = parent
            .entry(category.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        match slot {
            Value::Array(items) => items.push(Value::Object(entry)),
            other => *other = Value::Array(vec![Value::Object(entry)]),
        }

        Ok(UpdateSummary {
            acknowledged: true,
            matched_count: 1,
            modified_count: 1,
            upserted_id: None,
        })
    }
}

#[async_trait]
impl AboutStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Value>, StoreError> {
        let about = self.about.lock().expect("about lock poisoned");
        Ok(about.iter().cloned().map(Value::Object).collect())
    }
}
