use super::{TransactionRecord, TransactionSet, TransactionSetMetadata};
use serde::{Deserialize, Serialize};

/// A cached account as listed by [TransactionStore::list_accounts]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedAccount {
    pub name: String,
    pub metadata: TransactionSetMetadata,
}

pub trait TransactionStore: Send + Sync {
    /// Get the cached metadata for `principal`, without its results
    fn get_txs_metadata(&self, principal: &str) -> anyhow::Result<Option<TransactionSetMetadata>>;

    /// Get the cached results for `principal`
    fn get_txs_results(&self, principal: &str) -> anyhow::Result<Option<Vec<TransactionRecord>>>;

    /// Get the full cached set for `principal`
    fn get_txs_with_metadata(&self, principal: &str) -> anyhow::Result<Option<TransactionSet>> {
        match self.get_txs_metadata(principal)? {
            Some(metadata) => Ok(self
                .get_txs_results(principal)?
                .map(|results| TransactionSet::from_parts(metadata, results))),
            None => Ok(None),
        }
    }

    /// Replace whatever is cached for `principal` with `txs`
    fn set_txs(&self, principal: &str, txs: &TransactionSet) -> anyhow::Result<()>;

    /// All cached accounts, ordered by name
    fn list_accounts(&self) -> anyhow::Result<Vec<CachedAccount>>;
}
