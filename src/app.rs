use actix_web::{middleware::from_fn, web};

use crate::config::{AppConfig, SkillStorage};
use crate::handlers;
use crate::middleware::auth_middleware;

/// Mounts the HTTP surface for the configured variant. Shared by the binary
/// and the integration tests; app data (stores, token service, settings) is
/// registered by the caller.
pub fn configure_routes(cfg: &mut web::ServiceConfig, settings: &AppConfig) {
    // Read surface and token issuance are always public.
    cfg.service(handlers::home::home)
        .service(handlers::issue_token)
        .service(handlers::list_skills)
        .service(handlers::list_about);

    let mutations = web::scope("")
        .service(handlers::create_skill)
        .service(handlers::delete_skill);
    let mutations = match settings.skill_storage {
        SkillStorage::Flat => mutations.service(handlers::update_skill),
        SkillStorage::Nested => mutations.service(handlers::append_sub_skill),
    };

    if settings.require_auth {
        cfg.service(mutations.wrap(from_fn(auth_middleware)));
    } else {
        cfg.service(mutations);
    }
}
