use actix_web::{cookie::time::Duration, cookie::Cookie, post, web, HttpResponse};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    config::AppConfig,
    error::Result,
    token::{TokenService, TOKEN_COOKIE},
};

#[derive(Debug, Serialize)]
pub struct IssueTokenResponse {
    pub success: bool,
    pub message: String,
}

/// Signs the caller-claimed identity and sets it as the token cookie. This
/// endpoint performs no credential check; the claims are opaque to the
/// service and only gain meaning from the signature and expiry.
#[post("/jwt")]
pub async fn issue_token(
    body: web::Json<Map<String, Value>>,
    tokens: web::Data<TokenService>,
    settings: web::Data<AppConfig>,
) -> Result<HttpResponse> {
    let token = tokens.issue(body.into_inner())?;

    let cookie = Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(settings.cookie_secure)
        .max_age(Duration::hours(settings.token_expiry_hours))
        .finish();

    log::debug!("Issued identity token");

    let response = IssueTokenResponse {
        success: true,
        message: "JWT token issued".to_string(),
    };

    Ok(HttpResponse::Ok().cookie(cookie).json(response))
}
