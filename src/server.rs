use crate::{
    client::{throttle::RateLimiter, HttpStacksClient, StacksClient},
    store::IndexerStore,
    transaction::{
        reconcile::get_or_fetch_txs,
        store::{CachedAccount, TransactionStore},
        TransactionSet,
    },
    vote::{compute_tally, VoteConfig, VoteTally},
};
use log::{debug, info};
use std::{path::PathBuf, sync::Arc, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfiguration {
    pub api_url: String,
    pub database_dir: PathBuf,
    pub web_hostname: String,
    pub web_port: u16,
    pub rate_limit: Duration,
    pub probe_ttl: Option<Duration>,
    pub vote: VoteConfig,
}

/// Transaction cache and ballot tally over one Stacks client and store
pub struct Indexer {
    client: Arc<dyn StacksClient>,
    store: Arc<dyn TransactionStore>,
    vote: VoteConfig,
    probe_ttl: Option<Duration>,
}

impl Indexer {
    pub fn new(
        client: Arc<dyn StacksClient>,
        store: Arc<dyn TransactionStore>,
        vote: VoteConfig,
        probe_ttl: Option<Duration>,
    ) -> Self {
        Self {
            client,
            store,
            vote,
            probe_ttl,
        }
    }

    /// Opens the store in `config.database_dir` and talks to `config.api_url`
    pub fn from_config(config: &IndexerConfiguration) -> anyhow::Result<Self> {
        debug!("Creating a new IndexerStore in {}", config.database_dir.display());
        let store = Arc::new(IndexerStore::new(&config.database_dir)?);

        let limiter = Arc::new(RateLimiter::new(config.rate_limit));
        let client = Arc::new(HttpStacksClient::new(&config.api_url, limiter));

        info!("Indexing {} transactions", config.api_url);
        Ok(Self::new(
            client,
            store,
            config.vote.clone(),
            config.probe_ttl,
        ))
    }

    pub async fn get_or_fetch_txs(&self, principal: &str) -> anyhow::Result<TransactionSet> {
        get_or_fetch_txs(
            self.client.as_ref(),
            self.store.as_ref(),
            principal,
            self.probe_ttl,
        )
        .await
    }

    /// Reconciles the yes ballot, then the no ballot, then tallies
    pub async fn vote_tally(&self) -> anyhow::Result<VoteTally> {
        let yes_txs = self.get_or_fetch_txs(&self.vote.yes_address).await?;
        debug!("yes txs: {}", yes_txs.len());

        let no_txs = self.get_or_fetch_txs(&self.vote.no_address).await?;
        debug!("no txs: {}", no_txs.len());

        Ok(compute_tally(
            self.client.as_ref(),
            &self.vote,
            &yes_txs.results,
            &no_txs.results,
        )
        .await)
    }

    pub fn list_accounts(&self) -> anyhow::Result<Vec<CachedAccount>> {
        self.store.list_accounts()
    }
}
