//! Ballot tally
//!
//! Votes are tallied in two phases. [group_votes] filters both ballot
//! accounts' transactions and groups the surviving vote attempts by sender.
//! [compute_tally] then disqualifies every sender with more than one attempt
//! and enriches the rest with their stacking lock.

use crate::{
    client::{ContractId, StacksClient},
    stacking::{get_stacking_info, StackingInfo},
    transaction::TransactionRecord,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ballot accounts and the voting period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteConfig {
    pub yes_address: String,
    pub no_address: String,

    /// First counted block height (inclusive)
    pub start_block: u64,

    /// Last counted block height (inclusive)
    pub end_block: u64,

    pub pox_contract: ContractId,
    pub pox_function: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub txid: String,

    /// `true` for yes
    pub vote: bool,

    #[serde(flatten)]
    pub stacking: Option<StackingInfo>,

    /// Set instead of `stacking` when the lookup failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacking_error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    /// Addresses counted as yes
    pub total_yes: u64,

    /// Addresses counted as no
    pub total_no: u64,

    /// Transactions filtered out or disqualified
    pub total_discarded_txs: u64,

    /// Sender address to its single counted vote
    pub votes: BTreeMap<String, VoteRecord>,
}

/// Qualifying vote attempts grouped by sender address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoteGroups {
    /// Transactions rejected by the status or block height filter
    pub filtered_txs: u64,

    /// Attempts in ballot order, yes side first
    pub attempts: BTreeMap<String, Vec<VoteRecord>>,
}

impl VoteRecord {
    pub fn new(txid: &str, vote: bool) -> Self {
        Self {
            txid: txid.to_string(),
            vote,
            stacking: None,
            stacking_error: None,
        }
    }
}

impl VoteGroups {
    /// Filter one ballot's transactions and add its qualifying attempts
    pub fn add_ballot(&mut self, txs: &[TransactionRecord], vote: bool, start: u64, end: u64) {
        for tx in txs {
            if tx.is_within(start, end) {
                self.attempts
                    .entry(tx.sender_address.clone())
                    .or_default()
                    .push(VoteRecord::new(&tx.tx_id, vote));
            } else {
                self.filtered_txs += 1;
            }
        }
    }

    /// One vote per address: any address with more than one attempt is
    /// dropped entirely, even when all its attempts agree
    pub fn resolve(self) -> VoteTally {
        let mut tally = VoteTally {
            total_discarded_txs: self.filtered_txs,
            ..Default::default()
        };

        for (address, mut attempts) in self.attempts {
            if attempts.len() != 1 {
                debug!("Disqualifying {address}: {} votes", attempts.len());
                tally.total_discarded_txs += attempts.len() as u64;
                continue;
            }

            let record = attempts.remove(0);
            if record.vote {
                tally.total_yes += 1;
            } else {
                tally.total_no += 1;
            }
            tally.votes.insert(address, record);
        }
        tally
    }
}

/// Phase one: filter both ballots and group the surviving attempts by sender
pub fn group_votes(
    yes_txs: &[TransactionRecord],
    no_txs: &[TransactionRecord],
    start: u64,
    end: u64,
) -> VoteGroups {
    let mut groups = VoteGroups::default();
    groups.add_ballot(yes_txs, true, start, end);
    groups.add_ballot(no_txs, false, start, end);
    groups
}

/// Tally both ballots and attach each counted voter's stacking lock
///
/// A failed stacking lookup does not fail the tally, the voter's record
/// carries the error instead.
pub async fn compute_tally(
    client: &dyn StacksClient,
    config: &VoteConfig,
    yes_txs: &[TransactionRecord],
    no_txs: &[TransactionRecord],
) -> VoteTally {
    let mut tally = group_votes(yes_txs, no_txs, config.start_block, config.end_block).resolve();
    debug!(
        "Tally: {} yes, {} no, {} discarded",
        tally.total_yes, tally.total_no, tally.total_discarded_txs
    );

    for (address, record) in tally.votes.iter_mut() {
        let lookup =
            get_stacking_info(client, &config.pox_contract, &config.pox_function, address).await;
        match lookup {
            Ok(info) => record.stacking = Some(info),
            Err(e) => {
                warn!("Stacking lookup failed for {address}: {e}");
                record.stacking_error = Some(e.to_string());
            }
        }
    }
    tally
}
