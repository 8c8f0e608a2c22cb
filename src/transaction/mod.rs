pub mod fetch;
pub mod reconcile;
pub mod store;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TxStatus {
    Success,
    Other(String),
}

/// An account transaction as returned by the Stacks API
///
/// Only the fields the indexer reads are typed, everything else is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub tx_id: String,
    pub tx_status: TxStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,

    pub sender_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_block_time: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Everything about a [TransactionSet] except its results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSetMetadata {
    /// Number of transactions actually retrieved
    pub total_processed: u64,

    /// Number of transactions the API reported at fetch time
    pub total_queried: u64,

    pub total_results: u64,

    /// Fetch completion time (RFC 3339)
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSet {
    #[serde(flatten)]
    pub metadata: TransactionSetMetadata,

    /// Retrieval order, not necessarily chronological
    pub results: Vec<TransactionRecord>,
}

impl TxStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl TransactionRecord {
    pub fn is_success(&self) -> bool {
        self.tx_status.is_success()
    }

    /// Successful and mined within `[start, end]`
    pub fn is_within(&self, start: u64, end: u64) -> bool {
        self.is_success()
            && self
                .block_height
                .is_some_and(|height| start <= height && height <= end)
    }
}

impl TransactionSetMetadata {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.last_updated)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl TransactionSet {
    /// Builds a set stamped with the current time
    pub fn new(total_queried: u64, results: Vec<TransactionRecord>) -> Self {
        let count = results.len() as u64;
        Self {
            metadata: TransactionSetMetadata {
                total_processed: count,
                total_queried,
                total_results: count,
                last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            results,
        }
    }

    pub fn from_parts(metadata: TransactionSetMetadata, results: Vec<TransactionRecord>) -> Self {
        Self { metadata, results }
    }

    pub fn total_queried(&self) -> u64 {
        self.metadata.total_queried
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/////////////////
// conversions //
/////////////////

impl From<String> for TxStatus {
    fn from(value: String) -> Self {
        if value == "success" {
            Self::Success
        } else {
            Self::Other(value)
        }
    }
}

impl From<&str> for TxStatus {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<TxStatus> for String {
    fn from(value: TxStatus) -> Self {
        match value {
            TxStatus::Success => "success".to_string(),
            TxStatus::Other(status) => status,
        }
    }
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Other(status) => write!(f, "{status}"),
        }
    }
}
