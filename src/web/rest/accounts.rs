use super::{error_response, json_response};
use crate::{clarity::c32::is_valid_stacks_address, server::Indexer};
use actix_web::{
    get,
    http::header::ContentType,
    web::{self, Data},
    HttpResponse,
};
use log::debug;
use std::sync::Arc;

#[get("/{principal}")]
pub async fn get_account_txs(
    indexer: Data<Arc<Indexer>>,
    principal: web::Path<String>,
) -> HttpResponse {
    let principal = principal.into_inner();
    if !is_valid_stacks_address(&principal) {
        return HttpResponse::NotFound()
            .content_type(ContentType::plaintext())
            .body(format!(
                "{principal} is not a valid Stacks address or path."
            ));
    }

    match indexer.get_or_fetch_txs(&principal).await {
        Ok(txs) => {
            debug!("Serving {} txs for {principal}", txs.len());
            json_response(&txs)
        }
        Err(e) => error_response(e),
    }
}
