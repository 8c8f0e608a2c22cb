#[cfg(test)]
mod fetch {
    use crate::helpers::{txs, MockStacksClient};
    use anyhow::Result;
    use stacks_indexer::{client::ClientError, transaction::fetch::fetch_account_txs};

    #[tokio::test]
    async fn exhaustive_fetch_walks_every_page() -> Result<()> {
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 120));

        let set = fetch_account_txs(&client, "SPA", true).await?;
        assert_eq!(client.page_requests("SPA"), vec![0, 50, 100]);
        assert_eq!(set.metadata.total_queried, 120);
        assert_eq!(set.metadata.total_processed, 120);
        assert_eq!(set.metadata.total_results, 120);
        assert_eq!(set.results.len(), 120);

        // retrieval order
        let ids: Vec<_> = set.results.iter().map(|tx| tx.tx_id.clone()).collect();
        let expected: Vec<_> = txs("a", 120).into_iter().map(|tx| tx.tx_id).collect();
        assert_eq!(ids, expected);
        Ok(())
    }

    #[tokio::test]
    async fn probe_fetches_one_page() -> Result<()> {
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 120));

        let set = fetch_account_txs(&client, "SPA", false).await?;
        assert_eq!(client.page_requests("SPA"), vec![0]);
        assert_eq!(set.metadata.total_queried, 120);
        assert_eq!(set.metadata.total_processed, 50);
        assert_eq!(set.metadata.total_results, 50);
        assert_eq!(set.results.len(), 50);
        Ok(())
    }

    #[tokio::test]
    async fn exact_page_multiple() -> Result<()> {
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 100));

        let set = fetch_account_txs(&client, "SPA", true).await?;
        assert_eq!(client.page_requests("SPA"), vec![0, 50]);
        assert_eq!(set.results.len(), 100);
        Ok(())
    }

    #[tokio::test]
    async fn empty_account() -> Result<()> {
        let client = MockStacksClient::new();

        let set = fetch_account_txs(&client, "SPEMPTY", true).await?;
        assert_eq!(client.page_requests("SPEMPTY"), vec![0]);
        assert_eq!(set.metadata.total_queried, 0);
        assert!(set.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn short_page_fails_exhaustive_fetch() {
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 50));
        client.set_total("SPA", 60);

        let result = fetch_account_txs(&client, "SPA", true).await;
        assert_eq!(client.page_requests("SPA"), vec![0, 50]);
        match result {
            Err(ClientError::ShortPage {
                offset,
                fetched,
                total,
                ..
            }) => assert_eq!((offset, fetched, total), (50, 50, 60)),
            other => panic!("expected a short page error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn single_page_fetch_allows_short_total() -> Result<()> {
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 50));
        client.set_total("SPA", 60);

        let set = fetch_account_txs(&client, "SPA", false).await?;
        assert_eq!(client.page_requests("SPA"), vec![0]);
        assert_eq!(set.metadata.total_queried, 60);
        assert_eq!(set.metadata.total_processed, 50);
        Ok(())
    }

    #[tokio::test]
    async fn failed_page_fails_fetch() {
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 120));
        client.fail_page("SPA", 50);

        let result = fetch_account_txs(&client, "SPA", true).await;
        assert!(matches!(result, Err(ClientError::Status { .. })));
        assert_eq!(client.page_requests("SPA"), vec![0, 50]);
    }
}

#[cfg(test)]
mod reconcile {
    use crate::helpers::{create_indexer_store, txs, MockStacksClient};
    use anyhow::Result;
    use pretty_assertions::assert_eq;
    use stacks_indexer::{
        client::ClientError,
        transaction::{reconcile::get_or_fetch_txs, store::TransactionStore},
    };
    use std::time::Duration;

    #[tokio::test]
    async fn cache_miss_fetches_and_stores() -> Result<()> {
        let (_dir, store) = create_indexer_store("reconcile-miss")?;
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 70));

        let set = get_or_fetch_txs(&client, &store, "SPA", None).await?;
        assert_eq!(client.page_requests("SPA"), vec![0, 50]);
        assert_eq!(set.results.len(), 70);
        assert_eq!(store.get_txs_with_metadata("SPA")?, Some(set));
        Ok(())
    }

    #[tokio::test]
    async fn matching_total_serves_cache() -> Result<()> {
        let (_dir, store) = create_indexer_store("reconcile-hit")?;
        let client = MockStacksClient::new();
        client.set_txs("SPY", txs("y", 120));

        let first = get_or_fetch_txs(&client, &store, "SPY", None).await?;
        client.clear_requests();

        let second = get_or_fetch_txs(&client, &store, "SPY", None).await?;
        assert_eq!(second.metadata.total_queried, 120);
        assert_eq!(client.page_requests("SPY"), vec![0]);
        assert_eq!(
            serde_json::to_vec(&second.results)?,
            serde_json::to_vec(&first.results)?
        );
        assert_eq!(second.metadata.last_updated, first.metadata.last_updated);
        Ok(())
    }

    #[tokio::test]
    async fn new_transactions_refresh_cache() -> Result<()> {
        let (_dir, store) = create_indexer_store("reconcile-refresh")?;
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 60));

        get_or_fetch_txs(&client, &store, "SPA", None).await?;
        client.push_txs("SPA", txs("b", 5));
        client.clear_requests();

        let set = get_or_fetch_txs(&client, &store, "SPA", None).await?;
        // probe, then the exhaustive fetch
        assert_eq!(client.page_requests("SPA"), vec![0, 0, 50]);
        assert_eq!(set.metadata.total_queried, 65);
        assert_eq!(set.results.len(), 65);
        assert_eq!(store.get_txs_metadata("SPA")?.unwrap().total_queried, 65);
        Ok(())
    }

    #[tokio::test]
    async fn probe_ttl_skips_probe() -> Result<()> {
        let (_dir, store) = create_indexer_store("reconcile-ttl")?;
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 10));

        let ttl = Some(Duration::from_secs(3600));
        let first = get_or_fetch_txs(&client, &store, "SPA", ttl).await?;
        client.push_txs("SPA", txs("b", 1));
        client.clear_requests();

        let second = get_or_fetch_txs(&client, &store, "SPA", ttl).await?;
        assert!(client.page_requests("SPA").is_empty());
        assert_eq!(second, first);
        Ok(())
    }

    #[tokio::test]
    async fn failed_probe_keeps_cache() -> Result<()> {
        let (_dir, store) = create_indexer_store("reconcile-probe-fail")?;
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 10));

        let cached = get_or_fetch_txs(&client, &store, "SPA", None).await?;
        client.fail_page("SPA", 0);

        let err = get_or_fetch_txs(&client, &store, "SPA", None)
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<ClientError>().is_some());
        assert_eq!(store.get_txs_with_metadata("SPA")?, Some(cached));
        Ok(())
    }

    #[tokio::test]
    async fn short_fetch_caches_nothing() -> Result<()> {
        let (_dir, store) = create_indexer_store("reconcile-short")?;
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 50));
        client.set_total("SPA", 60);

        let err = get_or_fetch_txs(&client, &store, "SPA", None)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::ShortPage { .. })
        ));
        assert_eq!(store.get_txs_metadata("SPA")?, None);

        // a later request fetches again instead of serving a partial set
        client.clear_requests();
        assert!(get_or_fetch_txs(&client, &store, "SPA", None).await.is_err());
        assert_eq!(client.page_requests("SPA"), vec![0, 50]);
        Ok(())
    }

    #[tokio::test]
    async fn short_refresh_keeps_previous_cache() -> Result<()> {
        let (_dir, store) = create_indexer_store("reconcile-short-refresh")?;
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 50));

        let cached = get_or_fetch_txs(&client, &store, "SPA", None).await?;
        client.set_total("SPA", 60);

        assert!(get_or_fetch_txs(&client, &store, "SPA", None).await.is_err());
        assert_eq!(store.get_txs_with_metadata("SPA")?, Some(cached));
        Ok(())
    }

    #[tokio::test]
    async fn failed_refresh_caches_nothing() -> Result<()> {
        let (_dir, store) = create_indexer_store("reconcile-refresh-fail")?;
        let client = MockStacksClient::new();
        client.set_txs("SPA", txs("a", 120));
        client.fail_page("SPA", 100);

        assert!(get_or_fetch_txs(&client, &store, "SPA", None).await.is_err());
        assert_eq!(store.get_txs_metadata("SPA")?, None);
        assert!(store.list_accounts()?.is_empty());
        Ok(())
    }
}
