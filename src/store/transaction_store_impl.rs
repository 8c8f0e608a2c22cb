use super::{column_families::ColumnFamilyHelpers, IndexerStore};
use crate::transaction::{
    store::{CachedAccount, TransactionStore},
    TransactionRecord, TransactionSet, TransactionSetMetadata,
};
use anyhow::Context;
use log::trace;
use speedb::{IteratorMode, WriteBatch};

impl TransactionStore for IndexerStore {
    fn get_txs_metadata(&self, principal: &str) -> anyhow::Result<Option<TransactionSetMetadata>> {
        trace!("Getting txs metadata for {principal}");
        Ok(self
            .database
            .get_pinned_cf(self.account_txs_metadata_cf(), principal.as_bytes())?
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .with_context(|| format!("corrupt txs metadata for {principal}"))?)
    }

    fn get_txs_results(&self, principal: &str) -> anyhow::Result<Option<Vec<TransactionRecord>>> {
        trace!("Getting txs results for {principal}");
        Ok(self
            .database
            .get_pinned_cf(self.account_txs_results_cf(), principal.as_bytes())?
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .with_context(|| format!("corrupt txs results for {principal}"))?)
    }

    /// Metadata and results are written in one batch
    fn set_txs(&self, principal: &str, txs: &TransactionSet) -> anyhow::Result<()> {
        trace!(
            "Setting {} txs for {principal}",
            txs.metadata.total_results
        );

        let mut batch = WriteBatch::default();
        batch.put_cf(
            self.account_txs_metadata_cf(),
            principal.as_bytes(),
            serde_json::to_vec(&txs.metadata)?,
        );
        batch.put_cf(
            self.account_txs_results_cf(),
            principal.as_bytes(),
            serde_json::to_vec(&txs.results)?,
        );
        self.database.write(batch)?;
        Ok(())
    }

    fn list_accounts(&self) -> anyhow::Result<Vec<CachedAccount>> {
        trace!("Listing cached accounts");

        let mut accounts = vec![];
        for entry in self
            .database
            .iterator_cf(self.account_txs_metadata_cf(), IteratorMode::Start)
        {
            let (key, value) = entry?;
            accounts.push(CachedAccount {
                name: String::from_utf8(key.to_vec())?,
                metadata: serde_json::from_slice(&value)?,
            });
        }
        Ok(accounts)
    }
}
