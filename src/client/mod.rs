//! Stacks Blockchain API client
//!
//! Every remote call goes through the client's [RateLimiter], so page fetches
//! and read-only contract calls share one admission budget.

pub mod throttle;

use crate::{
    clarity::{ClarityError, ClarityValue},
    transaction::TransactionRecord,
};
use async_trait::async_trait;
use log::{debug, trace};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use throttle::RateLimiter;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded {status}")]
    Status { url: String, status: StatusCode },
    #[error("{principal}: empty page at offset {offset} with {fetched} of {total} fetched")]
    ShortPage {
        principal: String,
        offset: u64,
        fetched: u64,
        total: u64,
    },
    #[error("read-only call {function} rejected: {cause}")]
    ReadOnly { function: String, cause: String },
    #[error("invalid clarity value: {0}")]
    Clarity(#[from] ClarityError),
}

/// One page of `/extended/v1/address/{principal}/transactions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
    pub total: u64,
    pub results: Vec<TransactionRecord>,
}

/// Fully qualified contract identifier, `{address}.{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractId {
    pub address: String,
    pub name: String,
}

impl std::str::FromStr for ContractId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((address, name)) if !address.is_empty() && !name.is_empty() => Ok(Self {
                address: address.to_string(),
                name: name.to_string(),
            }),
            _ => anyhow::bail!("Invalid contract id: {}", s),
        }
    }
}

impl std::fmt::Display for ContractId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.address, self.name)
    }
}

#[derive(Debug, Serialize)]
struct ReadOnlyRequest<'a> {
    sender: &'a str,
    arguments: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReadOnlyResponse {
    okay: bool,
    result: Option<String>,
    cause: Option<String>,
}

#[async_trait]
pub trait StacksClient: Send + Sync {
    /// Fetch one page of an account's transactions
    async fn get_account_transactions(
        &self,
        principal: &str,
        limit: u64,
        offset: u64,
    ) -> Result<TransactionPage, ClientError>;

    /// Call a read-only contract function as `sender`
    async fn call_read_only(
        &self,
        contract: &ContractId,
        function: &str,
        arguments: &[ClarityValue],
        sender: &str,
    ) -> Result<ClarityValue, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpStacksClient {
    api_url: String,
    http: reqwest::Client,
    limiter: Arc<RateLimiter>,
}

impl HttpStacksClient {
    pub fn new(api_url: &str, limiter: Arc<RateLimiter>) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            limiter,
        }
    }

    async fn send_json<T>(&self, url: String, request: reqwest::RequestBuilder) -> Result<T, ClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .limiter
            .throttle(|| request.send())
            .await
            .map_err(|source| ClientError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::Status { url, status });
        }
        response
            .json()
            .await
            .map_err(|source| ClientError::Http { url, source })
    }
}

#[async_trait]
impl StacksClient for HttpStacksClient {
    async fn get_account_transactions(
        &self,
        principal: &str,
        limit: u64,
        offset: u64,
    ) -> Result<TransactionPage, ClientError> {
        let url = format!("{}/extended/v1/address/{principal}/transactions", self.api_url);
        debug!("Fetching {url} limit {limit} offset {offset}");

        let request = self
            .http
            .get(&url)
            .query(&[("limit", limit), ("offset", offset)]);
        let page: TransactionPage = self.send_json(url, request).await?;

        trace!("Page at offset {offset}: {} of {}", page.results.len(), page.total);
        Ok(page)
    }

    async fn call_read_only(
        &self,
        contract: &ContractId,
        function: &str,
        arguments: &[ClarityValue],
        sender: &str,
    ) -> Result<ClarityValue, ClientError> {
        let url = format!(
            "{}/v2/contracts/call-read/{}/{}/{function}",
            self.api_url, contract.address, contract.name
        );
        debug!("Calling {contract}::{function} as {sender}");

        let body = ReadOnlyRequest {
            sender,
            arguments: arguments
                .iter()
                .map(ClarityValue::to_hex)
                .collect::<Result<_, _>>()?,
        };
        let request = self.http.post(&url).json(&body);
        let response: ReadOnlyResponse = self.send_json(url, request).await?;

        match response {
            ReadOnlyResponse {
                okay: true,
                result: Some(result),
                ..
            } => Ok(ClarityValue::from_hex(&result)?),
            ReadOnlyResponse { cause, .. } => Err(ClientError::ReadOnly {
                function: function.to_string(),
                cause: cause.unwrap_or_else(|| "no result".to_string()),
            }),
        }
    }
}
