//! Stacks addresses
//!
//! An address is `S` followed by the c32check encoding of its version and
//! hash160.

use thiserror::Error;

const ADDRESS_PREFIX: char = 'S';

/// Address errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum C32Error {
    #[error(transparent)]
    Codec(#[from] ::c32::Error),
    #[error("invalid address version {0}")]
    Version(u8),
    #[error("invalid hash160 length {0}")]
    HashLength(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StacksAddress {
    version: u8,
    hash160: [u8; StacksAddress::HASH_LEN],
}

impl StacksAddress {
    pub const HASH_LEN: usize = 20;

    /// c32 has 32 digits, one per version
    pub const MAX_VERSION: u8 = 31;

    pub const MAINNET_SINGLESIG: u8 = 22;

    pub fn new(version: u8, hash160: [u8; Self::HASH_LEN]) -> Result<Self, C32Error> {
        if version > Self::MAX_VERSION {
            return Err(C32Error::Version(version));
        }
        Ok(Self { version, hash160 })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn hash160(&self) -> &[u8; Self::HASH_LEN] {
        &self.hash160
    }

    pub fn to_address(&self) -> String {
        // the version is range checked on construction
        ::c32::encode_check_prefixed(self.hash160, ADDRESS_PREFIX, self.version)
            .unwrap_or_default()
    }
}

impl std::str::FromStr for StacksAddress {
    type Err = C32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hash, version) = ::c32::decode_check_prefixed(s, ADDRESS_PREFIX)?;
        let hash160 = hash
            .try_into()
            .map_err(|hash: Vec<u8>| C32Error::HashLength(hash.len()))?;
        Self::new(version, hash160)
    }
}

impl std::fmt::Display for StacksAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_address())
    }
}

pub fn is_valid_stacks_address(address: &str) -> bool {
    address.parse::<StacksAddress>().is_ok()
}
