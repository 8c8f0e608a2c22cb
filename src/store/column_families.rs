/// Indexer store column family helper trait
use speedb::ColumnFamily;

pub trait ColumnFamilyHelpers {
    /// CF for storing account transaction set metadata
    fn account_txs_metadata_cf(&self) -> &ColumnFamily;

    /// CF for storing account transaction results
    fn account_txs_results_cf(&self) -> &ColumnFamily;
}
