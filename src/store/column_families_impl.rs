use crate::store::{column_families::ColumnFamilyHelpers, IndexerStore};
use speedb::ColumnFamily;

impl ColumnFamilyHelpers for IndexerStore {
    /// CF for storing account transaction set metadata:
    /// `principal -> metadata`
    fn account_txs_metadata_cf(&self) -> &ColumnFamily {
        self.database
            .cf_handle("account-txs-metadata")
            .expect("account-txs-metadata column family exists")
    }

    /// CF for storing account transaction results:
    /// `principal -> results`
    fn account_txs_results_cf(&self) -> &ColumnFamily {
        self.database
            .cf_handle("account-txs-results")
            .expect("account-txs-results column family exists")
    }
}
