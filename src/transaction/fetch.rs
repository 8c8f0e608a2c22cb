use super::{TransactionRecord, TransactionSet};
use crate::{
    client::{ClientError, StacksClient},
    constants::TXS_PAGE_LIMIT,
};
use log::{debug, warn};

/// Fetch an account's transactions, page by page
///
/// A non-exhaustive fetch stops after the first page. It is only used to
/// learn the API's current total. Any failed page fails the whole fetch, as
/// does an exhaustive fetch running out of pages before the reported total.
pub async fn fetch_account_txs(
    client: &dyn StacksClient,
    principal: &str,
    exhaustive: bool,
) -> Result<TransactionSet, ClientError> {
    let mut results: Vec<TransactionRecord> = Vec::new();
    let mut total: Option<u64> = None;

    debug!("Fetching transactions for {principal} (exhaustive: {exhaustive})");
    loop {
        let offset = results.len() as u64;
        let page = client
            .get_account_transactions(principal, TXS_PAGE_LIMIT, offset)
            .await?;
        let total_queried = *total.get_or_insert(page.total);

        let page_len = page.results.len();
        results.extend(page.results);

        if !exhaustive {
            break;
        }

        debug!("{principal}: {} of {total_queried}", results.len());
        if results.len() as u64 >= total_queried {
            break;
        }
        if page_len == 0 {
            warn!("Empty page at offset {offset} for {principal} before the reported total");
            return Err(ClientError::ShortPage {
                principal: principal.to_string(),
                offset,
                fetched: results.len() as u64,
                total: total_queried,
            });
        }
    }

    Ok(TransactionSet::new(total.unwrap_or_default(), results))
}
