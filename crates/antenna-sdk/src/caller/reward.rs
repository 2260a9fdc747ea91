use antenna_types::{ActionPayload, ClaimReward};
use num_bigint::BigInt;

use super::SendActionCaller;
use crate::SdkError;

/// Reward claim caller
#[derive(Debug)]
pub struct ClaimRewardCaller {
    core: SendActionCaller,
    amount: BigInt,
}

impl ClaimRewardCaller {
    pub(crate) fn new(core: SendActionCaller, amount: BigInt) -> Self {
        Self { core, amount }
    }

    /// Attach data to the claim, copied. Same field as `set_payload`.
    pub fn set_data(self, data: &[u8]) -> Self {
        self.set_payload(data)
    }

    fn into_action(self) -> (SendActionCaller, Result<ActionPayload, SdkError>) {
        let payload = ClaimReward::new(self.amount)
            .map(ActionPayload::ClaimReward)
            .map_err(SdkError::from);
        (self.core, payload)
    }
}

action_caller!(ClaimRewardCaller, payload);
