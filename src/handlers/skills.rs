use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    config::{AppConfig, SkillStorage},
    db::{models::SkillFields, SkillStore, UpdateSummary},
    error::{ApiError, Result},
};

#[get("/skills")]
pub async fn list_skills(store: web::Data<dyn SkillStore>) -> Result<HttpResponse> {
    let skills = store
        .list()
        .await
        .map_err(ApiError::database("Failed to fetch skills."))?;

    Ok(HttpResponse::Ok().json(skills))
}

#[post("/skills")]
pub async fn create_skill(
    body: web::Json<Value>,
    settings: web::Data<AppConfig>,
    store: web::Data<dyn SkillStore>,
) -> Result<HttpResponse> {
    let document = match settings.skill_storage {
        SkillStorage::Flat => {
            let fields: SkillFields = serde_json::from_value(body.into_inner())
                .map_err(|err| ApiError::BadRequest(err.to_string()))?;
            fields.into_document()
        }
        SkillStorage::Nested => {
            let document = into_object(body.into_inner())?;
            validate_parent(&document)?;
            document
        }
    };

    let summary = store
        .insert(document)
        .await
        .map_err(ApiError::database("Failed to add skill"))?;

    log::info!("Added skill {}", summary.inserted_id);

    Ok(HttpResponse::Ok().json(summary))
}

#[delete("/skills/{id}")]
pub async fn delete_skill(
    path: web::Path<String>,
    store: web::Data<dyn SkillStore>,
) -> Result<HttpResponse> {
    let id = parse_skill_id(&path)?;

    // A zero deleted_count is still a success response, matching the
    // original contract.
    let summary = store
        .delete(id)
        .await
        .map_err(ApiError::database("Failed to delete skill"))?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Body of the flat-mode upsert. `selectedSkillType` is what portfolio
/// frontends send for the stored `category` field.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSkillRequest {
    pub name: String,
    pub proficiency: String,
    #[serde(deserialize_with = "crate::db::models::experience_years")]
    pub experience_years: u32,
    pub image: String,
    #[serde(rename = "selectedSkillType")]
    pub skill_type: String,
    pub description: String,
}

impl From<UpdateSkillRequest> for SkillFields {
    fn from(request: UpdateSkillRequest) -> Self {
        SkillFields {
            name: request.name,
            proficiency: request.proficiency,
            experience_years: request.experience_years,
            image: request.image,
            category: request.skill_type,
            description: request.description,
        }
    }
}

#[put("/skills/{id}")]
pub async fn update_skill(
    path: web::Path<String>,
    body: web::Json<UpdateSkillRequest>,
    store: web::Data<dyn SkillStore>,
) -> Result<HttpResponse> {
    let id = parse_skill_id(&path)?;

    let summary = store
        .upsert(id, body.into_inner().into())
        .await
        .map_err(ApiError::database("Failed to update skill"))?;

    Ok(HttpResponse::Ok().json(summary))
}

#[derive(Debug, Serialize)]
pub struct AppendSkillResponse {
    pub message: String,
    pub result: UpdateSummary,
}

#[patch("/skills/{id}")]
pub async fn append_sub_skill(
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
    store: web::Data<dyn SkillStore>,
) -> Result<HttpResponse> {
    let id = parse_skill_id(&path)?;
    let body = body.into_inner();

    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    if body.len() > 1 {
        return Err(ApiError::BadRequest(
            "Body must contain exactly one category".to_string(),
        ));
    }

    let Some((category, fields)) = body.into_iter().next() else {
        return Err(ApiError::EmptyBody);
    };
    let mut entry = into_object(fields)
        .map_err(|_| ApiError::BadRequest(format!("'{}' must hold a JSON object", category)))?;

    entry.insert(
        "sub_id".to_string(),
        Value::String(Uuid::new_v4().to_string()),
    );

    let summary = store
        .push_entry(id, &category, entry)
        .await
        .map_err(ApiError::database("Failed to update skill"))?;

    if summary.matched_count == 0 || summary.modified_count == 0 {
        return Err(ApiError::NotFound(
            "Skill not found or already added".to_string(),
        ));
    }

    log::info!("Appended {} sub-skill to {}", category, id.to_hex());

    let response = AppendSkillResponse {
        message: "Skill added successfully".to_string(),
        result: summary,
    };

    Ok(HttpResponse::Ok().json(response))
}

fn parse_skill_id(raw: &str) -> Result<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::BadRequest("Expected a JSON object".to_string())),
    }
}

/// Nested-mode parents are objects of named category arrays.
fn validate_parent(document: &Map<String, Value>) -> Result<()> {
    if document.is_empty() {
        return Err(ApiError::EmptyBody);
    }
    for (category, entries) in document {
        if !entries.is_array() {
            return Err(ApiError::BadRequest(format!(
                "'{}' must be an array of sub-skills",
                category
            )));
        }
    }
    Ok(())
}
