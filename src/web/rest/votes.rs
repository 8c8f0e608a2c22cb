use super::{error_response, json_response};
use crate::server::Indexer;
use actix_web::{get, web::Data, HttpResponse};
use log::debug;
use std::sync::Arc;

#[get("/votes")]
pub async fn get_votes(indexer: Data<Arc<Indexer>>) -> HttpResponse {
    match indexer.vote_tally().await {
        Ok(tally) => {
            debug!(
                "Vote tally: {} yes, {} no, {} discarded",
                tally.total_yes, tally.total_no, tally.total_discarded_txs
            );
            json_response(&tally)
        }
        Err(e) => error_response(e),
    }
}
