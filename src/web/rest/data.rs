use super::{error_response, json_response};
use crate::{server::Indexer, transaction::store::CachedAccount};
use actix_web::{get, web::Data, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

/// Key listing of the transaction cache
#[derive(Debug, Serialize)]
pub struct AccountList {
    pub keys: Vec<CachedAccount>,

    /// Always `true`, the whole cache is listed at once
    pub list_complete: bool,
}

#[get("/data")]
pub async fn get_data(indexer: Data<Arc<Indexer>>) -> HttpResponse {
    match indexer.list_accounts() {
        Ok(keys) => json_response(&AccountList {
            keys,
            list_complete: true,
        }),
        Err(e) => error_response(e),
    }
}
