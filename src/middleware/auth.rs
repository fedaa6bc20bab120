use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web, HttpMessage,
};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::token::{TokenService, TOKEN_COOKIE};

/// Decoded claims of the authenticated caller, attached to the request by the
/// auth gate for downstream handlers.
#[derive(Clone, Debug)]
pub struct Identity(pub Map<String, Value>);

pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    // A missing cookie halts here; the handler chain is never reached.
    let token = req
        .cookie(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(ApiError::Unauthorized)?;

    let tokens = req
        .app_data::<web::Data<TokenService>>()
        .ok_or_else(|| ApiError::Config("token service not available".to_string()))?;

    let claims = tokens.verify(&token).map_err(|err| {
        log::debug!("Rejected identity token: {}", err);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(Identity(claims.identity));

    next.call(req).await
}
