use antenna_primitives::Address;
use antenna_types::{
    ActionPayload, StakeAddDeposit, StakeChangeCandidate, StakeCreate, StakeReclaim, StakeRestake,
    StakeTransferOwnership,
};
use num_bigint::BigInt;

use super::SendActionCaller;
use crate::SdkError;

/// Entry point for the staking actions; pick one to get a [`StakeCaller`]
#[derive(Debug)]
pub struct StakingCaller {
    core: SendActionCaller,
}

impl StakingCaller {
    pub(crate) fn new(core: SendActionCaller) -> Self {
        Self { core }
    }

    fn with(self, payload: Result<ActionPayload, SdkError>) -> StakeCaller {
        StakeCaller {
            core: self.core,
            payload,
        }
    }

    /// Open a bucket voting for `candidate_name`
    pub fn create(
        self,
        candidate_name: &str,
        amount: impl Into<BigInt>,
        duration: u32,
        auto_stake: bool,
    ) -> StakeCaller {
        let payload = StakeCreate::new(candidate_name, amount, duration, auto_stake)
            .map(ActionPayload::StakeCreate)
            .map_err(SdkError::from);
        self.with(payload)
    }

    /// Start unlocking a bucket
    pub fn unstake(self, bucket_index: u64) -> StakeCaller {
        self.with(Ok(ActionPayload::StakeUnstake(StakeReclaim::new(bucket_index))))
    }

    /// Withdraw an unlocked bucket
    pub fn withdraw(self, bucket_index: u64) -> StakeCaller {
        self.with(Ok(ActionPayload::StakeWithdraw(StakeReclaim::new(bucket_index))))
    }

    /// Add `amount` to a bucket
    pub fn add_deposit(self, bucket_index: u64, amount: impl Into<BigInt>) -> StakeCaller {
        let payload = StakeAddDeposit::new(bucket_index, amount)
            .map(ActionPayload::StakeAddDeposit)
            .map_err(SdkError::from);
        self.with(payload)
    }

    /// Move a bucket's vote to `candidate_name`
    pub fn change_candidate(self, candidate_name: &str, bucket_index: u64) -> StakeCaller {
        let payload = StakeChangeCandidate::new(candidate_name, bucket_index)
            .map(ActionPayload::StakeChangeCandidate)
            .map_err(SdkError::from);
        self.with(payload)
    }

    /// Hand a bucket to `voter`
    pub fn transfer_ownership(self, voter: Address, bucket_index: u64) -> StakeCaller {
        self.with(Ok(ActionPayload::StakeTransferOwnership(
            StakeTransferOwnership::new(voter, bucket_index),
        )))
    }

    /// Change a bucket's lock terms
    pub fn restake(self, bucket_index: u64, duration: u32, auto_stake: bool) -> StakeCaller {
        self.with(Ok(ActionPayload::StakeRestake(StakeRestake::new(
            bucket_index,
            duration,
            auto_stake,
        ))))
    }
}

/// Caller for one staking action.
///
/// Invalid arguments given to [`StakingCaller`] surface from `call`, before
/// anything is sent.
#[derive(Debug)]
pub struct StakeCaller {
    core: SendActionCaller,
    payload: Result<ActionPayload, SdkError>,
}

impl StakeCaller {
    fn into_action(self) -> (SendActionCaller, Result<ActionPayload, SdkError>) {
        (self.core, self.payload)
    }
}

action_caller!(StakeCaller, payload);
