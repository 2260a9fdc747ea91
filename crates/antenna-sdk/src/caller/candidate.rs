use antenna_primitives::Address;
use antenna_types::{ActionPayload, CandidateRegister, CandidateUpdate};
use num_bigint::BigInt;

use super::SendActionCaller;
use crate::SdkError;

/// Entry point for the candidate actions
#[derive(Debug)]
pub struct CandidateCaller {
    core: SendActionCaller,
}

impl CandidateCaller {
    pub(crate) fn new(core: SendActionCaller) -> Self {
        Self { core }
    }

    /// Register a candidate with a self-stake of `amount`.
    ///
    /// The sender owns the candidate unless
    /// [`set_owner`](CandidateRegisterCaller::set_owner) names another account.
    pub fn register(
        self,
        name: &str,
        operator: Address,
        reward: Address,
        amount: impl Into<BigInt>,
        duration: u32,
        auto_stake: bool,
    ) -> CandidateRegisterCaller {
        CandidateRegisterCaller {
            core: self.core,
            register: CandidateRegister::new(name, operator, reward, amount, duration, auto_stake)
                .map_err(SdkError::from),
        }
    }

    /// Change a candidate's operator and reward accounts
    pub fn update(self, name: &str, operator: Address, reward: Address) -> CandidateUpdateCaller {
        CandidateUpdateCaller {
            core: self.core,
            update: CandidateUpdate::new(name, operator, reward).map_err(SdkError::from),
        }
    }
}

/// Candidate registration caller
#[derive(Debug)]
pub struct CandidateRegisterCaller {
    core: SendActionCaller,
    register: Result<CandidateRegister, SdkError>,
}

impl CandidateRegisterCaller {
    /// Register on behalf of `owner`
    pub fn set_owner(mut self, owner: Address) -> Self {
        self.register = self.register.map(|r| r.with_owner(owner));
        self
    }

    fn into_action(self) -> (SendActionCaller, Result<ActionPayload, SdkError>) {
        (
            self.core,
            self.register.map(ActionPayload::CandidateRegister),
        )
    }
}

action_caller!(CandidateRegisterCaller, payload);

/// Candidate update caller. Updates carry no payload.
#[derive(Debug)]
pub struct CandidateUpdateCaller {
    core: SendActionCaller,
    update: Result<CandidateUpdate, SdkError>,
}

impl CandidateUpdateCaller {
    fn into_action(self) -> (SendActionCaller, Result<ActionPayload, SdkError>) {
        (self.core, self.update.map(ActionPayload::CandidateUpdate))
    }
}

action_caller!(CandidateUpdateCaller);
