use crate::{
    clarity::{ClarityError, ClarityValue},
    client::{ClientError, ContractId, StacksClient},
};
use log::trace;
use serde::{Deserialize, Serialize};

/// An account's PoX lock, all zero when the account is not stacking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackingInfo {
    /// Locked amount in micro-STX
    pub amount_stacked: u64,
    pub first_reward_cycle: u64,

    /// Lock length in reward cycles
    pub lock_period: u64,
}

/// Look up `address`'s stacking lock with a read-only call to `function` on
/// the PoX contract, sent by `address` itself
pub async fn get_stacking_info(
    client: &dyn StacksClient,
    pox_contract: &ContractId,
    function: &str,
    address: &str,
) -> Result<StackingInfo, ClientError> {
    let argument = ClarityValue::principal(address)?;
    let response = client
        .call_read_only(pox_contract, function, &[argument], address)
        .await?;

    trace!("{function} for {address}: {response:?}");
    Ok(stacking_info_from_clarity(response)?)
}

/// `(optional (tuple (amount-ustx uint) (first-reward-cycle uint) (lock-period uint) ...))`
pub fn stacking_info_from_clarity(value: ClarityValue) -> Result<StackingInfo, ClarityError> {
    let Some(info) = value.into_inner() else {
        return Ok(StackingInfo::default());
    };

    let field = |name: &str| -> Result<u64, ClarityError> {
        info.tuple_get(name)
            .and_then(ClarityValue::as_u128)
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| ClarityError::MissingField(name.to_string()))
    };
    Ok(StackingInfo {
        amount_stacked: field("amount-ustx")?,
        first_reward_cycle: field("first-reward-cycle")?,
        lock_period: field("lock-period")?,
    })
}
