use super::{fetch::fetch_account_txs, store::TransactionStore, TransactionSet};
use crate::client::StacksClient;
use anyhow::Context;
use chrono::Utc;
use log::{debug, info};
use std::time::Duration;

/// Return the cached transaction set for `principal` unless it is stale
///
/// Staleness is decided by a single-page probe: an account's transaction
/// count never decreases, so the cache is current exactly when the API still
/// reports the cached `totalQueried`. Stale or missing entries are replaced
/// wholesale by an exhaustive fetch.
///
/// With `probe_ttl` set, entries fetched less than `probe_ttl` ago are served
/// without probing.
///
/// Concurrent calls for the same account may both refetch, the last write
/// wins.
pub async fn get_or_fetch_txs(
    client: &dyn StacksClient,
    store: &dyn TransactionStore,
    principal: &str,
    probe_ttl: Option<Duration>,
) -> anyhow::Result<TransactionSet> {
    if let Some(metadata) = store.get_txs_metadata(principal)? {
        debug!("Found cached txs for {principal}");

        let fresh = probe_ttl.is_some_and(|ttl| {
            metadata.last_updated_at().is_some_and(|at| {
                Utc::now()
                    .signed_duration_since(at)
                    .to_std()
                    .is_ok_and(|age| age < ttl)
            })
        });

        let current = if fresh {
            debug!("Cached txs for {principal} within probe ttl");
            true
        } else {
            let probe = fetch_account_txs(client, principal, false)
                .await
                .with_context(|| format!("probing transaction total for {principal}"))?;
            probe.total_queried() == metadata.total_queried
        };

        if current {
            if let Some(results) = store.get_txs_results(principal)? {
                debug!("Totals match for {principal}, serving cached txs");
                return Ok(TransactionSet::from_parts(metadata, results));
            }
        }
        info!("Cached txs for {principal} are stale, refetching");
    }

    let txs = fetch_account_txs(client, principal, true)
        .await
        .with_context(|| format!("fetching transactions for {principal}"))?;
    store.set_txs(principal, &txs)?;

    info!(
        "Cached {} of {} txs for {principal}",
        txs.metadata.total_processed, txs.metadata.total_queried
    );
    Ok(txs)
}
