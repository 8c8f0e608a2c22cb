//////////////////
// Test modules //
//////////////////

mod transaction;

//////////////////
// Test helpers //
//////////////////

pub mod helpers {
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use stacks_indexer::{
        clarity::{c32::StacksAddress, ClarityValue},
        client::{ClientError, ContractId, StacksClient, TransactionPage},
        constants::{ADDRESS_STX_NO, ADDRESS_STX_YES, POX_CONTRACT, POX_FUNCTION},
        stacking::StackingInfo,
        store::IndexerStore,
        transaction::TransactionRecord,
        vote::VoteConfig,
    };
    use std::{
        collections::{BTreeMap, HashMap, HashSet},
        sync::Mutex,
    };

    pub const START_BLOCK: u64 = 82914;
    pub const END_BLOCK: u64 = 87284;

    /// Sets up a new temp dir, deleted when it goes out of scope
    pub fn setup_new_db_dir(prefix: &str) -> anyhow::Result<tempfile::TempDir> {
        let store_dir = tempfile::TempDir::with_prefix(prefix)?;
        if store_dir.path().exists() {
            std::fs::remove_dir_all(store_dir.path())?;
        }
        Ok(store_dir)
    }

    /// Store and the temp dir backing it
    pub fn create_indexer_store(prefix: &str) -> anyhow::Result<(tempfile::TempDir, IndexerStore)> {
        let store_dir = setup_new_db_dir(prefix)?;
        let store = IndexerStore::new(store_dir.path())?;
        Ok((store_dir, store))
    }

    /// A valid mainnet address, distinct for every `n`
    pub fn address(n: u8) -> String {
        StacksAddress::new(StacksAddress::MAINNET_SINGLESIG, [n; 20])
            .unwrap()
            .to_address()
    }

    pub fn tx(tx_id: &str, status: &str, block_height: u64, sender: &str) -> TransactionRecord {
        serde_json::from_value(serde_json::json!({
            "tx_id": tx_id,
            "tx_status": status,
            "block_height": block_height,
            "sender_address": sender,
            "tx_type": "token_transfer",
        }))
        .unwrap()
    }

    /// `n` successful in-window txs from distinct senders
    pub fn txs(prefix: &str, n: usize) -> Vec<TransactionRecord> {
        (0..n)
            .map(|i| tx(&format!("0x{prefix}{i:04}"), "success", 83000, &format!("SP{prefix}{i}")))
            .collect()
    }

    pub fn vote_config() -> VoteConfig {
        VoteConfig {
            yes_address: ADDRESS_STX_YES.to_string(),
            no_address: ADDRESS_STX_NO.to_string(),
            start_block: START_BLOCK,
            end_block: END_BLOCK,
            pox_contract: POX_CONTRACT.parse().unwrap(),
            pox_function: POX_FUNCTION.to_string(),
        }
    }

    pub fn stacker_info(info: StackingInfo) -> ClarityValue {
        let fields = BTreeMap::from([
            (
                "amount-ustx".to_string(),
                ClarityValue::UInt(info.amount_stacked.into()),
            ),
            (
                "first-reward-cycle".to_string(),
                ClarityValue::UInt(info.first_reward_cycle.into()),
            ),
            (
                "lock-period".to_string(),
                ClarityValue::UInt(info.lock_period.into()),
            ),
        ]);
        ClarityValue::OptionalSome(Box::new(ClarityValue::Tuple(fields)))
    }

    /// In-memory Stacks API
    ///
    /// Serves each account's txs in pages and records every request.
    #[derive(Default)]
    pub struct MockStacksClient {
        accounts: Mutex<HashMap<String, Vec<TransactionRecord>>>,
        totals: Mutex<HashMap<String, u64>>,
        stackers: Mutex<HashMap<String, ClarityValue>>,
        failing: Mutex<HashSet<(String, u64)>>,
        failing_stackers: Mutex<HashSet<String>>,
        page_requests: Mutex<Vec<(String, u64)>>,
        read_only_calls: Mutex<Vec<(String, String, String)>>,
    }

    impl MockStacksClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_txs(&self, principal: &str, txs: Vec<TransactionRecord>) {
            self.accounts
                .lock()
                .unwrap()
                .insert(principal.to_string(), txs);
        }

        pub fn push_txs(&self, principal: &str, txs: Vec<TransactionRecord>) {
            self.accounts
                .lock()
                .unwrap()
                .entry(principal.to_string())
                .or_default()
                .extend(txs);
        }

        /// Report `total` for `principal` regardless of its stored txs
        pub fn set_total(&self, principal: &str, total: u64) {
            self.totals
                .lock()
                .unwrap()
                .insert(principal.to_string(), total);
        }

        pub fn set_stacker(&self, address: &str, info: StackingInfo) {
            self.stackers
                .lock()
                .unwrap()
                .insert(address.to_string(), stacker_info(info));
        }

        /// The page at `offset` answers 503
        pub fn fail_page(&self, principal: &str, offset: u64) {
            self.failing
                .lock()
                .unwrap()
                .insert((principal.to_string(), offset));
        }

        pub fn fail_stacker(&self, address: &str) {
            self.failing_stackers
                .lock()
                .unwrap()
                .insert(address.to_string());
        }

        /// Offsets requested for `principal`, in request order
        pub fn page_requests(&self, principal: &str) -> Vec<u64> {
            self.page_requests
                .lock()
                .unwrap()
                .iter()
                .filter(|(p, _)| p == principal)
                .map(|(_, offset)| *offset)
                .collect()
        }

        pub fn clear_requests(&self) {
            self.page_requests.lock().unwrap().clear();
            self.read_only_calls.lock().unwrap().clear();
        }

        /// `(function, argument hex, sender)` of every read-only call
        pub fn read_only_calls(&self) -> Vec<(String, String, String)> {
            self.read_only_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StacksClient for MockStacksClient {
        async fn get_account_transactions(
            &self,
            principal: &str,
            limit: u64,
            offset: u64,
        ) -> Result<TransactionPage, ClientError> {
            self.page_requests
                .lock()
                .unwrap()
                .push((principal.to_string(), offset));

            if self
                .failing
                .lock()
                .unwrap()
                .contains(&(principal.to_string(), offset))
            {
                return Err(ClientError::Status {
                    url: format!("mock://{principal}/transactions?offset={offset}"),
                    status: StatusCode::SERVICE_UNAVAILABLE,
                });
            }

            let accounts = self.accounts.lock().unwrap();
            let txs = accounts.get(principal).cloned().unwrap_or_default();
            let start = (offset as usize).min(txs.len());
            let end = (start + limit as usize).min(txs.len());
            let total = self
                .totals
                .lock()
                .unwrap()
                .get(principal)
                .copied()
                .unwrap_or(txs.len() as u64);
            Ok(TransactionPage {
                limit,
                offset,
                total,
                results: txs[start..end].to_vec(),
            })
        }

        async fn call_read_only(
            &self,
            contract: &ContractId,
            function: &str,
            arguments: &[ClarityValue],
            sender: &str,
        ) -> Result<ClarityValue, ClientError> {
            let argument = arguments
                .first()
                .map(|arg| arg.to_hex())
                .transpose()?
                .unwrap_or_default();
            self.read_only_calls.lock().unwrap().push((
                function.to_string(),
                argument,
                sender.to_string(),
            ));

            if self.failing_stackers.lock().unwrap().contains(sender) {
                return Err(ClientError::ReadOnly {
                    function: format!("{contract}::{function}"),
                    cause: "mock failure".to_string(),
                });
            }
            Ok(self
                .stackers
                .lock()
                .unwrap()
                .get(sender)
                .cloned()
                .unwrap_or(ClarityValue::OptionalNone))
        }
    }
}
