//! This module contains the implementations of all store traits for the
//! [IndexerStore]

// traits
pub mod column_families;

// impls
pub mod column_families_impl;
pub mod transaction_store_impl;

use log::debug;
use speedb::{ColumnFamilyDescriptor, DBCompressionType, DB};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct IndexerStore {
    pub db_path: PathBuf,
    pub database: DB,
}

impl IndexerStore {
    /// Add the corresponding CF helper to [ColumnFamilyHelpers]
    const COLUMN_FAMILIES: [&'static str; 2] = [
        // account transactions
        "account-txs-metadata",
        "account-txs-results",
    ];

    /// Opens (or creates) the indexer store at `path`
    pub fn new(path: &Path) -> anyhow::Result<Self> {
        let mut cf_opts = speedb::Options::default();
        cf_opts.set_max_write_buffer_number(16);
        cf_opts.set_compression_type(DBCompressionType::Zstd);

        let mut database_opts = speedb::Options::default();
        database_opts.set_compression_type(DBCompressionType::Zstd);
        database_opts.create_missing_column_families(true);
        database_opts.create_if_missing(true);

        let column_families: Vec<ColumnFamilyDescriptor> = Self::COLUMN_FAMILIES
            .iter()
            .map(|cf| ColumnFamilyDescriptor::new(*cf, cf_opts.clone()))
            .collect();

        debug!("Opening indexer store at {path:#?}");
        Ok(Self {
            db_path: path.into(),
            database: speedb::DBWithThreadMode::open_cf_descriptors(
                &database_opts,
                path,
                column_families,
            )?,
        })
    }
}
