pub mod accounts;
pub mod data;
pub mod index;
pub mod votes;

use crate::client::ClientError;
use actix_web::{http::header::ContentType, HttpResponse};
use log::error;
use serde::Serialize;

/// Pretty printed JSON response
pub(crate) fn json_response<T: Serialize>(value: &T) -> HttpResponse {
    match serde_json::to_string_pretty(value) {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(body),
        Err(e) => {
            error!("Failed to serialize response: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Stacks API failures answer 502, anything else 500
pub(crate) fn error_response(e: anyhow::Error) -> HttpResponse {
    error!("{e:#}");
    if e.downcast_ref::<ClientError>().is_some() {
        HttpResponse::BadGateway()
            .content_type(ContentType::plaintext())
            .body(format!("{e:#}"))
    } else {
        HttpResponse::InternalServerError().finish()
    }
}
