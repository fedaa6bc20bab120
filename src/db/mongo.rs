use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId, Bson, Document},
    results::UpdateResult,
    Client, Collection, Cursor, Database,
};
use serde_json::{Map, Value};

use super::models::SkillFields;
use super::store::{
    AboutStore, DeleteSummary, InsertSummary, SkillStore, StoreError, UpdateSummary,
};

/// MongoDB-backed store. One instance wraps the single long-lived client
/// created at startup and is shared by every request.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(client: Client, database_name: &str) -> Self {
        Self {
            db: client.database(database_name),
        }
    }

    fn skills(&self) -> Collection<Document> {
        self.db.collection("skills")
    }

    fn about(&self) -> Collection<Document> {
        self.db.collection("about_me")
    }
}

#[async_trait]
impl SkillStore for MongoStore {
    async fn list(&self) -> Result<Vec<Value>, StoreError> {
        let cursor = self.skills().find(doc! {}).await?;
        drain(cursor).await
    }

    async fn insert(&self, document: Map<String, Value>) -> Result<InsertSummary, StoreError> {
        let document = bson::to_document(&document)?;
        let result = self.skills().insert_one(document).await?;

        Ok(InsertSummary {
            acknowledged: true,
            inserted_id: id_to_string(result.inserted_id),
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<DeleteSummary, StoreError> {
        let result = self.skills().delete_one(doc! { "_id": id }).await?;

        Ok(DeleteSummary {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn upsert(&self, id: ObjectId, fields: SkillFields) -> Result<UpdateSummary, StoreError> {
        let update = doc! { "$set": bson::to_document(&fields)? };
        let result = self
            .skills()
            .update_one(doc! { "_id": id }, update)
            .upsert(true)
            .await?;

        Ok(update_summary(result))
    }

    async fn push_entry(
        &self,
        id: ObjectId,
        category: &str,
        entry: Map<String, Value>,
    ) -> Result<UpdateSummary, StoreError> {
        let mut push = Document::new();
        push.insert(category, bson::to_document(&entry)?);

        let result = self
            .skills()
            .update_one(doc! { "_id": id }, doc! { "$push": push })
            .await?;

        Ok(update_summary(result))
    }
}

#[async_trait]
impl AboutStore for MongoStore {
    async fn list(&self) -> Result<Vec<Value>, StoreError> {
        let cursor = self.about().find(doc! {}).await?;
        drain(cursor).await
    }
}

async fn drain(mut cursor: Cursor<Document>) -> Result<Vec<Value>, StoreError> {
    let mut documents = Vec::new();
    while let Some(document) = cursor.try_next().await? {
        documents.push(document_to_json(document));
    }
    Ok(documents)
}

fn update_summary(result: UpdateResult) -> UpdateSummary {
    UpdateSummary {
        acknowledged: true,
        matched_count: result.matched_count,
        modified_count: result.modified_count,
        upserted_id: result.upserted_id.map(id_to_string),
    }
}

fn id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

/// Renders a stored document the way the API returns it: object ids as their
/// hex string, datetimes as RFC 3339, everything else as plain JSON.
pub(crate) fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(formatted) => Value::String(formatted),
            Err(_) => Bson::DateTime(dt).into_relaxed_extjson(),
        },
        Bson::Document(nested) => document_to_json(nested),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}
