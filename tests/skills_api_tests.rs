use std::sync::Arc;

use actix_web::{test, web, App};
use bson::oid::ObjectId;
use serde_json::{json, Value};

use portfolio_api::app::configure_routes;
use portfolio_api::config::{AppConfig, SkillStorage};
use portfolio_api::db::{AboutStore, MemoryStore, SkillStore};
use portfolio_api::token::TokenService;

fn test_settings(storage: SkillStorage) -> AppConfig {
    AppConfig {
        mongodb_uri: String::new(),
        database_name: "portfolio".to_string(),
        token_secret: "test-secret".to_string(),
        token_expiry_hours: 24,
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: Vec::new(),
        cookie_secure: false,
        skill_storage: storage,
        require_auth: false,
    }
}

fn skill_body() -> Value {
    json!({
        "name": "Rust",
        "proficiency": "advanced",
        "experience_years": 4,
        "image": "https://example.com/rust.png",
        "category": "backend",
        "description": "Systems programming"
    })
}

#[actix_web::test]
async fn list_skills_on_empty_store_returns_empty_array() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Flat);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::get().uri("/skills").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn created_skill_appears_in_listing_with_an_id() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Flat);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/skills")
        .set_json(skill_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["acknowledged"], json!(true));
    let inserted_id = created["inserted_id"].as_str().unwrap();
    assert_eq!(inserted_id.len(), 24);

    let req = test::TestRequest::get().uri("/skills").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["_id"], json!(inserted_id));
    assert_eq!(listed[0]["name"], json!("Rust"));
}

#[actix_web::test]
async fn create_rejects_unknown_fields() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Flat);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let mut body = skill_body();
    body["favorite_color"] = json!("green");

    let req = test::TestRequest::post().uri("/skills").set_json(body).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    assert!(store.skills().is_empty());
}

#[actix_web::test]
async fn delete_of_unknown_id_reports_zero_count_with_success() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Flat);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let uri = format!("/skills/{}", ObjectId::new().to_hex());
    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;

    // Deleting a missing document is a success with a zero count, not a 404.
    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["deleted_count"], json!(0));
}

#[actix_web::test]
async fn delete_with_malformed_id_is_a_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Flat);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::delete().uri("/skills/not-hex").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
}

#[actix_web::test]
async fn upsert_creates_the_document_under_the_requested_id() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Flat);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let id = ObjectId::new().to_hex();
    let req = test::TestRequest::put()
        .uri(&format!("/skills/{}", id))
        .set_json(json!({
            "name": "React",
            "proficiency": "intermediate",
            "experience_years": "3",
            "image": "https://example.com/react.png",
            "selectedSkillType": "frontend",
            "description": "UI library"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["matched_count"], json!(0));
    assert_eq!(body["upserted_id"], json!(id));

    let skills = store.skills();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["_id"], json!(id));
    assert_eq!(skills[0]["category"], json!("frontend"));
    assert_eq!(skills[0]["experience_years"], json!(3));
}

#[actix_web::test]
async fn append_with_empty_body_is_rejected_and_parent_unchanged() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Nested);

    let id = ObjectId::new();
    let parent = json!({ "_id": id.to_hex() });
    store
        .insert(parent.as_object().unwrap().clone())
        .await
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/skills/{}", id.to_hex()))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    assert_eq!(store.skills()[0], *parent.as_object().unwrap());
}

#[actix_web::test]
async fn append_adds_an_entry_with_a_generated_sub_identifier() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Nested);

    let id = ObjectId::new();
    store
        .insert(json!({ "_id": id.to_hex() }).as_object().unwrap().clone())
        .await
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/skills/{}", id.to_hex()))
        .set_json(json!({ "frontend": { "name": "React" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Skill added successfully"));
    assert_eq!(body["result"]["matched_count"], json!(1));

    let skills = store.skills();
    let entries = skills[0]["frontend"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["name"], json!("React"));
    assert!(!entries[0]["sub_id"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn append_to_unknown_parent_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Nested);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/skills/{}", ObjectId::new().to_hex()))
        .set_json(json!({ "frontend": { "name": "React" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn append_with_multiple_categories_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Nested);

    let id = ObjectId::new();
    store
        .insert(json!({ "_id": id.to_hex() }).as_object().unwrap().clone())
        .await
        .unwrap();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/skills/{}", id.to_hex()))
        .set_json(json!({
            "frontend": { "name": "React" },
            "backend": { "name": "Rust" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn nested_create_requires_category_arrays() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Nested);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/skills")
        .set_json(json!({ "frontend": "React" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let req = test::TestRequest::post()
        .uri("/skills")
        .set_json(json!({ "frontend": [{ "name": "React" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn patch_route_is_not_mounted_in_flat_mode() {
    let store = Arc::new(MemoryStore::new());
    let settings = test_settings(SkillStorage::Flat);

    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(store.clone() as Arc<dyn SkillStore>))
            .app_data(web::Data::from(store.clone() as Arc<dyn AboutStore>))
            .app_data(web::Data::new(TokenService::new("test-secret", 24)))
            .app_data(web::Data::new(settings.clone()))
            .configure(|cfg| configure_routes(cfg, &settings)),
    )
    .await;

    let req = test::TestRequest::patch()
        .uri(&format!("/skills/{}", ObjectId::new().to_hex()))
        .set_json(json!({ "frontend": { "name": "React" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}
