use super::LogLevelFilter;
use crate::{constants::*, server::IndexerConfiguration, vote::VoteConfig};
use anyhow::{bail, Context};
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

/// Server arguments, given on the command line or in a YAML config file
/// (kebab-case keys, missing keys take the command line defaults)
#[derive(clap::Parser, Debug, Clone, PartialEq, Eq, Deserialize)]
#[command(author, version, about, long_about = None)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ServerArgs {
    /// Stacks Blockchain API base URL
    #[arg(long, default_value = STACKS_API_URL)]
    pub api_url: String,

    /// Path to directory for speedb
    #[arg(long, default_value = DEFAULT_DATABASE_DIR)]
    pub database_dir: PathBuf,

    /// Max stderr log level
    #[arg(long, default_value_t = LogLevelFilter::default())]
    pub log_level: LogLevelFilter,

    /// Web server hostname
    #[arg(long, default_value = DEFAULT_WEB_HOSTNAME)]
    pub web_hostname: String,

    /// Web server port
    #[arg(long, default_value_t = DEFAULT_WEB_PORT)]
    pub web_port: u16,

    /// Minimum delay (ms) in between two Stacks API calls
    #[arg(long, default_value_t = RATE_LIMIT_INTERVAL_MILLIS)]
    pub rate_limit_millis: u64,

    /// Serve cached transactions younger than this (sec) without probing
    /// the API for new ones
    #[arg(long)]
    pub probe_ttl_secs: Option<u64>,

    /// Ballot account counted as yes
    #[arg(long, default_value = ADDRESS_STX_YES)]
    pub yes_address: String,

    /// Ballot account counted as no
    #[arg(long, default_value = ADDRESS_STX_NO)]
    pub no_address: String,

    /// First block height of the voting period
    #[arg(long, default_value_t = VOTE_START_BLOCK)]
    pub vote_start_block: u64,

    /// Last block height of the voting period
    #[arg(long, default_value_t = VOTE_END_BLOCK)]
    pub vote_end_block: u64,

    /// PoX contract queried for stacking info
    #[arg(long, default_value = POX_CONTRACT)]
    pub pox_contract: String,

    /// PoX read-only function queried for stacking info
    #[arg(long, default_value = POX_FUNCTION)]
    pub pox_function: String,
}

#[derive(clap::Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ConfigArgs {
    /// Path to the server config file (YAML)
    #[arg(short, long)]
    pub path: PathBuf,
}

impl Default for ServerArgs {
    fn default() -> Self {
        Self {
            api_url: STACKS_API_URL.to_string(),
            database_dir: DEFAULT_DATABASE_DIR.into(),
            log_level: LogLevelFilter::default(),
            web_hostname: DEFAULT_WEB_HOSTNAME.to_string(),
            web_port: DEFAULT_WEB_PORT,
            rate_limit_millis: RATE_LIMIT_INTERVAL_MILLIS,
            probe_ttl_secs: None,
            yes_address: ADDRESS_STX_YES.to_string(),
            no_address: ADDRESS_STX_NO.to_string(),
            vote_start_block: VOTE_START_BLOCK,
            vote_end_block: VOTE_END_BLOCK,
            pox_contract: POX_CONTRACT.to_string(),
            pox_function: POX_FUNCTION.to_string(),
        }
    }
}

impl ConfigArgs {
    pub fn read(&self) -> anyhow::Result<ServerArgs> {
        let contents = std::fs::read(&self.path)
            .with_context(|| format!("reading config file {:#?}", self.path))?;
        serde_yaml::from_slice(&contents)
            .with_context(|| format!("parsing config file {:#?}", self.path))
    }
}

/////////////////
// conversions //
/////////////////

impl TryFrom<ServerArgs> for IndexerConfiguration {
    type Error = anyhow::Error;

    fn try_from(args: ServerArgs) -> anyhow::Result<Self> {
        use crate::clarity::c32::is_valid_stacks_address;

        for address in [&args.yes_address, &args.no_address] {
            if !is_valid_stacks_address(address) {
                bail!("Invalid ballot address: {address}");
            }
        }
        if args.yes_address == args.no_address {
            bail!("Yes and no ballot addresses must differ");
        }
        if args.vote_start_block > args.vote_end_block {
            bail!(
                "Vote start block {} is after end block {}",
                args.vote_start_block,
                args.vote_end_block
            );
        }

        Ok(Self {
            api_url: args.api_url,
            database_dir: args.database_dir,
            web_hostname: args.web_hostname,
            web_port: args.web_port,
            rate_limit: Duration::from_millis(args.rate_limit_millis),
            probe_ttl: args.probe_ttl_secs.map(Duration::from_secs),
            vote: VoteConfig {
                yes_address: args.yes_address,
                no_address: args.no_address,
                start_block: args.vote_start_block,
                end_block: args.vote_end_block,
                pox_contract: args.pox_contract.parse()?,
                pox_function: args.pox_function,
            },
        })
    }
}
