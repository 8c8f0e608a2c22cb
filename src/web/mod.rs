pub mod rest;

use self::rest::{accounts, data, index, votes};
use crate::{
    constants::{CORS_MAX_AGE_SECS, INDEXER_HEADER, VERSION},
    server::Indexer,
};
use actix_cors::Cors;
use actix_web::{middleware, web::Data, App, HttpServer};
use std::{net, sync::Arc};
use tokio_graceful_shutdown::{FutureExt, SubsystemHandle};

/// Registers the REST routes, `/{principal}` last since it matches any path
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(index::get_index)
        .service(data::get_data)
        .service(votes::get_votes)
        .service(accounts::get_account_txs);
}

pub fn cors() -> Cors {
    Cors::permissive()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .max_age(CORS_MAX_AGE_SECS)
}

pub fn default_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, OPTIONS"))
        .add(("Access-Control-Max-Age", CORS_MAX_AGE_SECS.to_string()))
        .add((INDEXER_HEADER, VERSION))
}

pub async fn start_web_server<A: net::ToSocketAddrs>(
    subsys: SubsystemHandle,
    indexer: Arc<Indexer>,
    addrs: A,
) -> anyhow::Result<()> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(indexer.clone()))
            .configure(configure)
            .wrap(default_headers())
            .wrap(cors())
            .wrap(middleware::Logger::default())
    })
    .bind(addrs)?
    .run();

    if let Ok(result) = server.cancel_on_shutdown(&subsys).await {
        result?;
    }
    Ok(())
}
