use actix_web::{get, http::header::ContentType, HttpResponse};

const ROUTES: &str = "Simple transaction indexer for Stacks, supported routes:

    /{principal} - returns all transactions for a given principal
    /data        - returns all known accounts in the indexer store
    /votes       - returns compiled vote data for SIP-015
    /            - returns this page
";

#[get("/")]
pub async fn get_index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(ROUTES)
}
