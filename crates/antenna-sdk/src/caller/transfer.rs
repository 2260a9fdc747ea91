use antenna_types::{ActionPayload, Transfer};
use num_bigint::BigInt;

use super::SendActionCaller;
use crate::SdkError;

/// Value transfer caller
#[derive(Debug)]
pub struct TransferCaller {
    core: SendActionCaller,
    recipient: String,
    amount: BigInt,
}

impl TransferCaller {
    pub(crate) fn new(core: SendActionCaller, recipient: &str, amount: BigInt) -> Self {
        Self {
            core,
            recipient: recipient.to_string(),
            amount,
        }
    }

    fn into_action(self) -> (SendActionCaller, Result<ActionPayload, SdkError>) {
        let payload = Transfer::new(self.amount, &self.recipient)
            .map(ActionPayload::Transfer)
            .map_err(SdkError::from);
        (self.core, payload)
    }
}

action_caller!(TransferCaller, payload);
