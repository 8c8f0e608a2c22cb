//! Clarity value consensus serialization
//!
//! Read-only contract calls take their arguments and return their result as
//! hex encoded, serialized Clarity values.

pub mod c32;

use self::c32::StacksAddress;
use std::collections::BTreeMap;
use thiserror::Error;

/// Clarity codec errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClarityError {
    #[error("unexpected end of input at byte {0}")]
    UnexpectedEnd(usize),
    #[error("unknown type prefix {0:#04x}")]
    UnknownPrefix(u8),
    #[error("trailing bytes after value: {0}")]
    TrailingBytes(usize),
    #[error("invalid hex: {0}")]
    Hex(String),
    #[error("invalid utf-8 in {0}")]
    Utf8(&'static str),
    #[error("invalid principal: {0}")]
    Principal(#[from] c32::C32Error),
    #[error("name longer than 128 bytes: {0}")]
    NameLength(String),
    #[error("missing or out of range field {0}")]
    MissingField(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClarityValue {
    Int(i128),
    UInt(u128),
    Buffer(Vec<u8>),
    Bool(bool),
    StandardPrincipal(StacksAddress),
    ContractPrincipal(StacksAddress, String),
    ResponseOk(Box<ClarityValue>),
    ResponseErr(Box<ClarityValue>),
    OptionalNone,
    OptionalSome(Box<ClarityValue>),
    List(Vec<ClarityValue>),
    Tuple(BTreeMap<String, ClarityValue>),
    StringAscii(String),
    StringUtf8(String),
}

mod prefix {
    pub const INT: u8 = 0x00;
    pub const UINT: u8 = 0x01;
    pub const BUFFER: u8 = 0x02;
    pub const TRUE: u8 = 0x03;
    pub const FALSE: u8 = 0x04;
    pub const STANDARD_PRINCIPAL: u8 = 0x05;
    pub const CONTRACT_PRINCIPAL: u8 = 0x06;
    pub const RESPONSE_OK: u8 = 0x07;
    pub const RESPONSE_ERR: u8 = 0x08;
    pub const NONE: u8 = 0x09;
    pub const SOME: u8 = 0x0a;
    pub const LIST: u8 = 0x0b;
    pub const TUPLE: u8 = 0x0c;
    pub const STRING_ASCII: u8 = 0x0d;
    pub const STRING_UTF8: u8 = 0x0e;
}

const MAX_NAME_LEN: usize = 128;

impl ClarityValue {
    pub fn principal(address: &str) -> Result<Self, ClarityError> {
        Ok(Self::StandardPrincipal(address.parse()?))
    }

    pub fn serialize(&self) -> Result<Vec<u8>, ClarityError> {
        let mut bytes = Vec::new();
        self.serialize_into(&mut bytes)?;
        Ok(bytes)
    }

    /// `0x` prefixed hex, the form the read-only call endpoint expects
    pub fn to_hex(&self) -> Result<String, ClarityError> {
        Ok(format!("0x{}", hex::encode(self.serialize()?)))
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, ClarityError> {
        let mut reader = Reader { bytes, pos: 0 };
        let value = reader.value()?;
        if reader.pos != bytes.len() {
            return Err(ClarityError::TrailingBytes(bytes.len() - reader.pos));
        }
        Ok(value)
    }

    /// Accepts hex with or without the `0x` prefix
    pub fn from_hex(hex_str: &str) -> Result<Self, ClarityError> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| ClarityError::Hex(e.to_string()))?;
        Self::deserialize(&bytes)
    }

    /// Unwraps `(ok v)` and `(some v)`; `none` becomes [None]
    pub fn into_inner(self) -> Option<ClarityValue> {
        match self {
            Self::ResponseOk(value) | Self::OptionalSome(value) => value.into_inner(),
            Self::OptionalNone => None,
            value => Some(value),
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Self::UInt(n) => Some(*n),
            Self::Int(n) => u128::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn tuple_get(&self, key: &str) -> Option<&ClarityValue> {
        match self {
            Self::Tuple(fields) => fields.get(key),
            _ => None,
        }
    }

    fn serialize_into(&self, out: &mut Vec<u8>) -> Result<(), ClarityError> {
        match self {
            Self::Int(n) => {
                out.push(prefix::INT);
                out.extend_from_slice(&n.to_be_bytes());
            }
            Self::UInt(n) => {
                out.push(prefix::UINT);
                out.extend_from_slice(&n.to_be_bytes());
            }
            Self::Buffer(buf) => {
                out.push(prefix::BUFFER);
                push_len_prefixed(out, buf);
            }
            Self::Bool(true) => out.push(prefix::TRUE),
            Self::Bool(false) => out.push(prefix::FALSE),
            Self::StandardPrincipal(address) => {
                out.push(prefix::STANDARD_PRINCIPAL);
                push_address(out, address);
            }
            Self::ContractPrincipal(address, name) => {
                out.push(prefix::CONTRACT_PRINCIPAL);
                push_address(out, address);
                push_name(out, name)?;
            }
            Self::ResponseOk(value) => {
                out.push(prefix::RESPONSE_OK);
                value.serialize_into(out)?;
            }
            Self::ResponseErr(value) => {
                out.push(prefix::RESPONSE_ERR);
                value.serialize_into(out)?;
            }
            Self::OptionalNone => out.push(prefix::NONE),
            Self::OptionalSome(value) => {
                out.push(prefix::SOME);
                value.serialize_into(out)?;
            }
            Self::List(values) => {
                out.push(prefix::LIST);
                out.extend_from_slice(&(values.len() as u32).to_be_bytes());
                for value in values {
                    value.serialize_into(out)?;
                }
            }
            Self::Tuple(fields) => {
                // BTreeMap iteration gives the lexicographic key order consensus requires
                out.push(prefix::TUPLE);
                out.extend_from_slice(&(fields.len() as u32).to_be_bytes());
                for (name, value) in fields {
                    push_name(out, name)?;
                    value.serialize_into(out)?;
                }
            }
            Self::StringAscii(s) => {
                out.push(prefix::STRING_ASCII);
                push_len_prefixed(out, s.as_bytes());
            }
            Self::StringUtf8(s) => {
                out.push(prefix::STRING_UTF8);
                push_len_prefixed(out, s.as_bytes());
            }
        }
        Ok(())
    }
}

fn push_len_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn push_address(out: &mut Vec<u8>, address: &StacksAddress) {
    out.push(address.version());
    out.extend_from_slice(address.hash160());
}

fn push_name(out: &mut Vec<u8>, name: &str) -> Result<(), ClarityError> {
    if name.len() > MAX_NAME_LEN {
        return Err(ClarityError::NameLength(name.to_string()));
    }
    out.push(name.len() as u8);
    out.extend_from_slice(name.as_bytes());
    Ok(())
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn take(&mut self, n: usize) -> Result<&[u8], ClarityError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ClarityError::UnexpectedEnd(self.pos))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ClarityError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, ClarityError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn bytes16(&mut self) -> Result<[u8; 16], ClarityError> {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(self.take(16)?);
        Ok(buf)
    }

    fn len_prefixed(&mut self) -> Result<Vec<u8>, ClarityError> {
        let len = self.u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn address(&mut self) -> Result<StacksAddress, ClarityError> {
        let version = self.u8()?;
        let mut hash160 = [0u8; StacksAddress::HASH_LEN];
        hash160.copy_from_slice(self.take(StacksAddress::HASH_LEN)?);
        Ok(StacksAddress::new(version, hash160)?)
    }

    fn name(&mut self) -> Result<String, ClarityError> {
        let len = self.u8()? as usize;
        String::from_utf8(self.take(len)?.to_vec()).map_err(|_| ClarityError::Utf8("name"))
    }

    fn value(&mut self) -> Result<ClarityValue, ClarityError> {
        let value = match self.u8()? {
            prefix::INT => ClarityValue::Int(i128::from_be_bytes(self.bytes16()?)),
            prefix::UINT => ClarityValue::UInt(u128::from_be_bytes(self.bytes16()?)),
            prefix::BUFFER => ClarityValue::Buffer(self.len_prefixed()?),
            prefix::TRUE => ClarityValue::Bool(true),
            prefix::FALSE => ClarityValue::Bool(false),
            prefix::STANDARD_PRINCIPAL => ClarityValue::StandardPrincipal(self.address()?),
            prefix::CONTRACT_PRINCIPAL => {
                let address = self.address()?;
                ClarityValue::ContractPrincipal(address, self.name()?)
            }
            prefix::RESPONSE_OK => ClarityValue::ResponseOk(Box::new(self.value()?)),
            prefix::RESPONSE_ERR => ClarityValue::ResponseErr(Box::new(self.value()?)),
            prefix::NONE => ClarityValue::OptionalNone,
            prefix::SOME => ClarityValue::OptionalSome(Box::new(self.value()?)),
            prefix::LIST => {
                let len = self.u32()?;
                let mut values = Vec::new();
                for _ in 0..len {
                    values.push(self.value()?);
                }
                ClarityValue::List(values)
            }
            prefix::TUPLE => {
                let len = self.u32()?;
                let mut fields = BTreeMap::new();
                for _ in 0..len {
                    let name = self.name()?;
                    fields.insert(name, self.value()?);
                }
                ClarityValue::Tuple(fields)
            }
            prefix::STRING_ASCII => ClarityValue::StringAscii(
                String::from_utf8(self.len_prefixed()?)
                    .map_err(|_| ClarityError::Utf8("string-ascii"))?,
            ),
            prefix::STRING_UTF8 => ClarityValue::StringUtf8(
                String::from_utf8(self.len_prefixed()?)
                    .map_err(|_| ClarityError::Utf8("string-utf8"))?,
            ),
            unknown => return Err(ClarityError::UnknownPrefix(unknown)),
        };
        Ok(value)
    }
}
