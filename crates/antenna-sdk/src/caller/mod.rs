//! Action callers.
//!
//! Each action kind has its own caller: a single-use builder that collects the
//! action's fields, then `call` resolves whatever the caller left unset,
//! signs and submits. Resolution runs in a fixed order:
//!
//! 1. nonce: the account's pending nonce, unless set with `set_nonce`
//! 2. gas limit: estimated by the service for a sealed draft whose fee fields
//!    are zero, unless set with `set_gas_limit`
//! 3. gas price: the service's suggestion, unless set with `set_gas_price`
//!
//! Callers of one account fetch nonces independently. Two callers resolved
//! concurrently can pick the same nonce; serialize them per account if that
//! matters.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use antenna_primitives::H256;
use antenna_types::{ActionCore, ActionPayload, Receipt};
use bytes::Bytes;
use num_bigint::BigUint;
use tokio_util::sync::CancellationToken;

use crate::account::Account;
use crate::api::ApiClient;
use crate::wait::wait_for_receipt;
use crate::SdkError;

/// Fee setters and terminal calls shared by every caller type.
///
/// The caller type needs a `core: SendActionCaller` field and an
/// `fn into_action(self) -> (SendActionCaller, Result<ActionPayload, SdkError>)`.
/// The `payload` form also adds `set_payload`.
macro_rules! action_caller {
    ($caller:ty) => {
        impl $caller {
            /// Use `nonce` instead of the account's pending nonce
            pub fn set_nonce(mut self, nonce: u64) -> Self {
                self.core.set_nonce(nonce);
                self
            }

            /// Use `gas_limit` instead of asking for an estimate
            pub fn set_gas_limit(mut self, gas_limit: u64) -> Self {
                self.core.set_gas_limit(gas_limit);
                self
            }

            /// Use `gas_price` instead of the suggested price
            pub fn set_gas_price(mut self, gas_price: impl Into<num_bigint::BigUint>) -> Self {
                self.core.set_gas_price(gas_price.into());
                self
            }

            /// Resolve, sign and submit; returns the action hash
            pub async fn call(self) -> Result<antenna_primitives::H256, $crate::SdkError> {
                let (core, payload) = self.into_action();
                core.send(payload, None).await
            }

            /// Like [`call`](Self::call), but gives up with
            /// [`SdkError::Cancelled`](crate::SdkError::Cancelled) as soon as
            /// `cancel` fires
            pub async fn call_with_cancel(
                self,
                cancel: tokio_util::sync::CancellationToken,
            ) -> Result<antenna_primitives::H256, $crate::SdkError> {
                let (core, payload) = self.into_action();
                core.send(payload, Some(&cancel)).await
            }

            /// Submit, wait the configured receipt delay and check the receipt
            pub async fn call_and_wait(self) -> Result<antenna_types::Receipt, $crate::SdkError> {
                let (core, payload) = self.into_action();
                core.send_and_wait(payload).await
            }
        }
    };
    ($caller:ty, payload) => {
        action_caller!($caller);

        impl $caller {
            /// Attach an opaque payload, copied
            pub fn set_payload(mut self, payload: &[u8]) -> Self {
                self.core.set_payload(payload);
                self
            }
        }
    };
}

pub(crate) use action_caller;

mod candidate;
mod contract;
mod reward;
mod staking;
mod transfer;

pub use candidate::{CandidateCaller, CandidateRegisterCaller, CandidateUpdateCaller};
pub use contract::{DeployContractCaller, ExecuteContractCaller};
pub use reward::ClaimRewardCaller;
pub use staking::{StakeCaller, StakingCaller};
pub use transfer::TransferCaller;

/// Where a caller is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallerState {
    /// Fields are being set
    Building,
    /// Nonce and fee fields are being fetched
    Resolving,
    /// The resolved body is being sealed
    Signing,
    /// The sealed action is being sent
    Submitting,
    /// The action was accepted
    Done,
    /// Some step failed; nothing more happens
    Failed,
}

impl fmt::Display for CallerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallerState::Building => "building",
            CallerState::Resolving => "resolving",
            CallerState::Signing => "signing",
            CallerState::Submitting => "submitting",
            CallerState::Done => "done",
            CallerState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Fields and plumbing every action caller shares
pub struct SendActionCaller {
    account: Arc<Account>,
    api: ApiClient,
    chain_id: u32,
    receipt_delay: Duration,
    nonce: Option<u64>,
    gas_limit: Option<u64>,
    gas_price: Option<BigUint>,
    payload: Option<Bytes>,
    state: CallerState,
}

impl SendActionCaller {
    pub(crate) fn new(
        account: Arc<Account>,
        api: ApiClient,
        chain_id: u32,
        receipt_delay: Duration,
    ) -> Self {
        Self {
            account,
            api,
            chain_id,
            receipt_delay,
            nonce: None,
            gas_limit: None,
            gas_price: None,
            payload: None,
            state: CallerState::Building,
        }
    }

    pub(crate) fn set_nonce(&mut self, nonce: u64) {
        self.nonce = Some(nonce);
    }

    pub(crate) fn set_gas_limit(&mut self, gas_limit: u64) {
        self.gas_limit = Some(gas_limit);
    }

    pub(crate) fn set_gas_price(&mut self, gas_price: BigUint) {
        self.gas_price = Some(gas_price);
    }

    pub(crate) fn set_payload(&mut self, payload: &[u8]) {
        self.payload = Some(Bytes::copy_from_slice(payload));
    }

    fn transition(&mut self, next: CallerState) {
        tracing::debug!("Caller {} -> {}", self.state, next);
        self.state = next;
    }

    /// Resolve, sign and submit `payload`; returns the action hash
    pub(crate) async fn send(
        mut self,
        payload: Result<ActionPayload, SdkError>,
        cancel: Option<&CancellationToken>,
    ) -> Result<H256, SdkError> {
        let result = match payload {
            Ok(payload) => self.run(payload, cancel).await,
            Err(e) => Err(e),
        };
        match &result {
            Ok(hash) => {
                self.transition(CallerState::Done);
                tracing::info!("Action submitted: hash={}", hash);
            }
            Err(e) => {
                tracing::warn!("Action failed while {}: {}", self.state, e);
                self.transition(CallerState::Failed);
            }
        }
        result
    }

    /// [`send`](Self::send), then wait for and check the receipt
    pub(crate) async fn send_and_wait(
        self,
        payload: Result<ActionPayload, SdkError>,
    ) -> Result<Receipt, SdkError> {
        let api = self.api.clone();
        let delay = self.receipt_delay;
        let hash = self.send(payload, None).await?;
        wait_for_receipt(&api, hash, delay).await
    }

    async fn run(
        &mut self,
        mut payload: ActionPayload,
        cancel: Option<&CancellationToken>,
    ) -> Result<H256, SdkError> {
        if let Some(blob) = &self.payload {
            payload.set_payload(blob);
        }
        let kind = payload.kind();
        let core = ActionCore::new(payload).with_chain_id(self.chain_id);

        self.transition(CallerState::Resolving);
        let nonce = match self.nonce {
            Some(nonce) => nonce,
            None => {
                let meta = cancellable(cancel, self.api.get_account(self.account.address()))
                    .await
                    .map_err(|e| e.resolving("nonce"))?;
                meta.pending_nonce
            }
        };
        let core = core.with_nonce(nonce);

        let gas_limit = match self.gas_limit {
            Some(gas_limit) => gas_limit,
            None => {
                let draft = self.account.seal(core.draft())?;
                cancellable(cancel, self.api.estimate_action_gas(&draft))
                    .await
                    .map_err(|e| e.resolving("gas limit"))?
            }
        };

        let gas_price = match self.gas_price.take() {
            Some(gas_price) => gas_price,
            None => cancellable(cancel, self.api.suggest_gas_price())
                .await
                .map(BigUint::from)
                .map_err(|e| e.resolving("gas price"))?,
        };
        tracing::debug!(
            "Resolved {}: nonce={}, gas_limit={}, gas_price={}",
            kind,
            nonce,
            gas_limit,
            gas_price
        );

        self.transition(CallerState::Signing);
        let sealed = self
            .account
            .seal(core.with_gas_limit(gas_limit).with_gas_price(gas_price))?;

        self.transition(CallerState::Submitting);
        cancellable(cancel, self.api.send_action(&sealed)).await
    }
}

impl fmt::Debug for SendActionCaller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendActionCaller")
            .field("sender", self.account.address())
            .field("nonce", &self.nonce)
            .field("gas_limit", &self.gas_limit)
            .field("gas_price", &self.gas_price)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Race `fut` against `cancel`; a cancelled token wins ties
async fn cancellable<T>(
    cancel: Option<&CancellationToken>,
    fut: impl Future<Output = Result<T, SdkError>>,
) -> Result<T, SdkError> {
    match cancel {
        Some(token) => {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(SdkError::Cancelled),
                result = fut => result,
            }
        }
        None => fut.await,
    }
}
