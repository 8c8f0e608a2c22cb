// version

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// stacks api

pub const STACKS_API_URL: &str = "https://stacks-node-api.mainnet.stacks.co";

/// Number of transactions requested per page
pub const TXS_PAGE_LIMIT: u64 = 50;

/// Minimum spacing (ms) between two remote calls
pub const RATE_LIMIT_INTERVAL_MILLIS: u64 = 1000;

// SIP-015 ballot

pub const ADDRESS_STX_YES: &str = "SP00000000000003SCNSJTCHE66N2PXHX";
pub const ADDRESS_STX_NO: &str = "SP00000000000000DSQJTCHE66XE1NHQ";

/// First Stacks block height (inclusive) of the voting period
pub const VOTE_START_BLOCK: u64 = 82914;

/// Last Stacks block height (inclusive) of the voting period
pub const VOTE_END_BLOCK: u64 = 87284;

// stacking

pub const POX_CONTRACT: &str = "SP000000000000000000002Q6VF78.pox";
pub const POX_FUNCTION: &str = "get-stacker-info";

// web server

pub const DEFAULT_WEB_HOSTNAME: &str = "localhost";
pub const DEFAULT_WEB_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_DIR: &str = "/var/lib/stacks-indexer/database";
pub const CORS_MAX_AGE_SECS: usize = 86400;
pub const INDEXER_HEADER: &str = "X-Stacks-Indexer";
