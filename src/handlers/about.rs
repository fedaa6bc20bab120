use actix_web::{get, web, HttpResponse};

use crate::{
    db::AboutStore,
    error::{ApiError, Result},
};

/// The "about me" collection is read-only from the API surface.
#[get("/about")]
pub async fn list_about(store: web::Data<dyn AboutStore>) -> Result<HttpResponse> {
    let entries = store
        .list()
        .await
        .map_err(ApiError::database("Error retrieving data"))?;

    Ok(HttpResponse::Ok().json(entries))
}
