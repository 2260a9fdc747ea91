//! Unsigned action bodies.
//!
//! [`ActionCore`] carries the envelope fields (version, nonce, gas limit, gas
//! price, chain id) and exactly one [`ActionPayload`]. Payload constructors
//! validate their inputs and never touch the network.

use antenna_crypto::keccak256;
use antenna_primitives::{Address, H256};
use bytes::Bytes;
use num_bigint::{BigInt, BigUint};
use prost::Message;

use crate::proto::{self, action_core::Action as WireAction};
use crate::TypesError;

/// Protocol version stamped on every action
pub const PROTOCOL_VERSION: u32 = 1;

fn non_negative(amount: BigInt, field: &'static str) -> Result<BigUint, TypesError> {
    amount.to_biguint().ok_or(TypesError::NegativeAmount(field))
}

fn parse_amount(value: &str, field: &'static str) -> Result<BigUint, TypesError> {
    if value.is_empty() {
        return Ok(BigUint::default());
    }
    value.parse().map_err(|_| TypesError::InvalidAmount {
        field,
        value: value.to_string(),
    })
}

fn require_name(name: &str) -> Result<String, TypesError> {
    if name.is_empty() {
        return Err(TypesError::EmptyCandidateName);
    }
    Ok(name.to_string())
}

fn parse_address(value: &str) -> Result<Address, TypesError> {
    Ok(value.parse::<Address>()?)
}

/// Value transfer to another account
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    /// Amount in the smallest unit
    pub amount: BigUint,
    /// Receiving account
    pub recipient: Address,
    /// Opaque payload
    pub payload: Bytes,
}

impl Transfer {
    /// Fails on a negative amount or an empty recipient
    pub fn new(amount: impl Into<BigInt>, recipient: &str) -> Result<Self, TypesError> {
        let amount = non_negative(amount.into(), "amount")?;
        if recipient.is_empty() {
            return Err(TypesError::EmptyRecipient);
        }
        Ok(Self {
            amount,
            recipient: parse_address(recipient)?,
            payload: Bytes::new(),
        })
    }

    /// Attach a payload, copied
    pub fn with_payload(mut self, payload: &[u8]) -> Self {
        self.payload = Bytes::copy_from_slice(payload);
        self
    }
}

/// Contract creation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Value sent along with the deployment
    pub amount: BigUint,
    /// Bytecode, followed by packed constructor arguments if any
    pub data: Bytes,
}

impl Deployment {
    /// Fails on empty bytecode
    pub fn new(data: &[u8]) -> Result<Self, TypesError> {
        if data.is_empty() {
            return Err(TypesError::EmptyBytecode);
        }
        Ok(Self {
            amount: BigUint::default(),
            data: Bytes::copy_from_slice(data),
        })
    }
}

/// Call into an existing contract
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Target contract
    pub contract: Address,
    /// Value sent along with the call
    pub amount: BigUint,
    /// Selector and packed arguments
    pub data: Bytes,
}

impl Invocation {
    /// Invocation with zero value
    pub fn new(contract: Address, data: &[u8]) -> Self {
        Self {
            contract,
            amount: BigUint::default(),
            data: Bytes::copy_from_slice(data),
        }
    }

    /// Set the attached value; fails if negative
    pub fn with_amount(mut self, amount: impl Into<BigInt>) -> Result<Self, TypesError> {
        self.amount = non_negative(amount.into(), "amount")?;
        Ok(self)
    }
}

/// Claim from the rewarding fund
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClaimReward {
    /// Amount to claim
    pub amount: BigUint,
    /// Opaque data
    pub data: Bytes,
}

impl ClaimReward {
    /// Fails on a negative amount
    pub fn new(amount: impl Into<BigInt>) -> Result<Self, TypesError> {
        Ok(Self {
            amount: non_negative(amount.into(), "amount")?,
            data: Bytes::new(),
        })
    }

    /// Attach data, copied
    pub fn with_data(mut self, data: &[u8]) -> Self {
        self.data = Bytes::copy_from_slice(data);
        self
    }
}

/// Open a new staking bucket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeCreate {
    /// Candidate voted for
    pub candidate_name: String,
    /// Staked amount
    pub amount: BigUint,
    /// Lock duration in days
    pub duration: u32,
    /// Whether the lock renews automatically
    pub auto_stake: bool,
    /// Opaque payload
    pub payload: Bytes,
}

impl StakeCreate {
    /// Fails on an empty candidate name or a negative amount
    pub fn new(
        candidate_name: &str,
        amount: impl Into<BigInt>,
        duration: u32,
        auto_stake: bool,
    ) -> Result<Self, TypesError> {
        Ok(Self {
            candidate_name: require_name(candidate_name)?,
            amount: non_negative(amount.into(), "staked amount")?,
            duration,
            auto_stake,
            payload: Bytes::new(),
        })
    }
}

/// Unstake or withdraw a bucket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeReclaim {
    /// Bucket index
    pub bucket_index: u64,
    /// Opaque payload
    pub payload: Bytes,
}

impl StakeReclaim {
    /// Reclaim of the given bucket
    pub fn new(bucket_index: u64) -> Self {
        Self {
            bucket_index,
            payload: Bytes::new(),
        }
    }
}

/// Add funds to an existing bucket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeAddDeposit {
    /// Bucket index
    pub bucket_index: u64,
    /// Deposited amount
    pub amount: BigUint,
    /// Opaque payload
    pub payload: Bytes,
}

impl StakeAddDeposit {
    /// Fails on a negative amount
    pub fn new(bucket_index: u64, amount: impl Into<BigInt>) -> Result<Self, TypesError> {
        Ok(Self {
            bucket_index,
            amount: non_negative(amount.into(), "deposit amount")?,
            payload: Bytes::new(),
        })
    }
}

/// Change the lock terms of a bucket
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeRestake {
    /// Bucket index
    pub bucket_index: u64,
    /// New lock duration in days
    pub duration: u32,
    /// Whether the lock renews automatically
    pub auto_stake: bool,
    /// Opaque payload
    pub payload: Bytes,
}

impl StakeRestake {
    /// Restake of the given bucket
    pub fn new(bucket_index: u64, duration: u32, auto_stake: bool) -> Self {
        Self {
            bucket_index,
            duration,
            auto_stake,
            payload: Bytes::new(),
        }
    }
}

/// Move a bucket's vote to another candidate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeChangeCandidate {
    /// Bucket index
    pub bucket_index: u64,
    /// New candidate
    pub candidate_name: String,
    /// Opaque payload
    pub payload: Bytes,
}

impl StakeChangeCandidate {
    /// Fails on an empty candidate name
    pub fn new(candidate_name: &str, bucket_index: u64) -> Result<Self, TypesError> {
        Ok(Self {
            bucket_index,
            candidate_name: require_name(candidate_name)?,
            payload: Bytes::new(),
        })
    }
}

/// Hand a bucket to another voter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeTransferOwnership {
    /// Bucket index
    pub bucket_index: u64,
    /// New owner
    pub voter: Address,
    /// Opaque payload
    pub payload: Bytes,
}

impl StakeTransferOwnership {
    /// Transfer of the given bucket to `voter`
    pub fn new(voter: Address, bucket_index: u64) -> Self {
        Self {
            bucket_index,
            voter,
            payload: Bytes::new(),
        }
    }
}

/// Register a new delegate candidate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateRegister {
    /// Candidate name
    pub name: String,
    /// Operator account
    pub operator: Address,
    /// Reward account
    pub reward: Address,
    /// Self-stake amount
    pub amount: BigUint,
    /// Self-stake lock duration in days
    pub duration: u32,
    /// Whether the self-stake renews automatically
    pub auto_stake: bool,
    /// Owner account; the sender when absent
    pub owner: Option<Address>,
    /// Opaque payload
    pub payload: Bytes,
}

impl CandidateRegister {
    /// Fails on an empty name or a negative amount
    pub fn new(
        name: &str,
        operator: Address,
        reward: Address,
        amount: impl Into<BigInt>,
        duration: u32,
        auto_stake: bool,
    ) -> Result<Self, TypesError> {
        Ok(Self {
            name: require_name(name)?,
            operator,
            reward,
            amount: non_negative(amount.into(), "staked amount")?,
            duration,
            auto_stake,
            owner: None,
            payload: Bytes::new(),
        })
    }

    /// Register on behalf of another owner
    pub fn with_owner(mut self, owner: Address) -> Self {
        self.owner = Some(owner);
        self
    }
}

/// Update a candidate's operator and reward accounts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateUpdate {
    /// Candidate name
    pub name: String,
    /// Operator account
    pub operator: Address,
    /// Reward account
    pub reward: Address,
}

impl CandidateUpdate {
    /// Fails on an empty name
    pub fn new(name: &str, operator: Address, reward: Address) -> Result<Self, TypesError> {
        Ok(Self {
            name: require_name(name)?,
            operator,
            reward,
        })
    }
}

/// The one-of action payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionPayload {
    /// Value transfer
    Transfer(Transfer),
    /// Contract creation
    Deployment(Deployment),
    /// Contract call
    Invocation(Invocation),
    /// Reward claim
    ClaimReward(ClaimReward),
    /// New bucket
    StakeCreate(StakeCreate),
    /// Start unlocking a bucket
    StakeUnstake(StakeReclaim),
    /// Withdraw an unlocked bucket
    StakeWithdraw(StakeReclaim),
    /// Deposit into a bucket
    StakeAddDeposit(StakeAddDeposit),
    /// Change bucket terms
    StakeRestake(StakeRestake),
    /// Revote a bucket
    StakeChangeCandidate(StakeChangeCandidate),
    /// Give a bucket away
    StakeTransferOwnership(StakeTransferOwnership),
    /// Register a candidate
    CandidateRegister(CandidateRegister),
    /// Update a candidate
    CandidateUpdate(CandidateUpdate),
}

impl ActionPayload {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ActionPayload::Transfer(_) => "transfer",
            ActionPayload::Deployment(_) => "deployment",
            ActionPayload::Invocation(_) => "invocation",
            ActionPayload::ClaimReward(_) => "claim_reward",
            ActionPayload::StakeCreate(_) => "stake_create",
            ActionPayload::StakeUnstake(_) => "stake_unstake",
            ActionPayload::StakeWithdraw(_) => "stake_withdraw",
            ActionPayload::StakeAddDeposit(_) => "stake_add_deposit",
            ActionPayload::StakeRestake(_) => "stake_restake",
            ActionPayload::StakeChangeCandidate(_) => "stake_change_candidate",
            ActionPayload::StakeTransferOwnership(_) => "stake_transfer_ownership",
            ActionPayload::CandidateRegister(_) => "candidate_register",
            ActionPayload::CandidateUpdate(_) => "candidate_update",
        }
    }

    /// Replace the opaque payload blob with a copy of `payload`.
    ///
    /// Reward claims take it as their data field. Deployments, invocations and
    /// candidate updates have no such field and are left unchanged.
    pub fn set_payload(&mut self, payload: &[u8]) {
        let blob = Bytes::copy_from_slice(payload);
        match self {
            ActionPayload::Transfer(a) => a.payload = blob,
            ActionPayload::ClaimReward(a) => a.data = blob,
            ActionPayload::StakeCreate(a) => a.payload = blob,
            ActionPayload::StakeUnstake(a) | ActionPayload::StakeWithdraw(a) => a.payload = blob,
            ActionPayload::StakeAddDeposit(a) => a.payload = blob,
            ActionPayload::StakeRestake(a) => a.payload = blob,
            ActionPayload::StakeChangeCandidate(a) => a.payload = blob,
            ActionPayload::StakeTransferOwnership(a) => a.payload = blob,
            ActionPayload::CandidateRegister(a) => a.payload = blob,
            ActionPayload::Deployment(_)
            | ActionPayload::Invocation(_)
            | ActionPayload::CandidateUpdate(_) => {}
        }
    }

    /// Wire form
    pub fn to_proto(&self) -> WireAction {
        match self {
            ActionPayload::Transfer(t) => WireAction::Transfer(proto::Transfer {
                amount: t.amount.to_string(),
                recipient: t.recipient.to_string(),
                payload: t.payload.to_vec(),
            }),
            ActionPayload::Deployment(d) => WireAction::Execution(proto::Execution {
                amount: d.amount.to_string(),
                contract: String::new(),
                data: d.data.to_vec(),
            }),
            ActionPayload::Invocation(i) => WireAction::Execution(proto::Execution {
                amount: i.amount.to_string(),
                contract: i.contract.to_string(),
                data: i.data.to_vec(),
            }),
            ActionPayload::ClaimReward(c) => {
                WireAction::ClaimFromRewardingFund(proto::ClaimFromRewardingFund {
                    amount: c.amount.to_string(),
                    data: c.data.to_vec(),
                })
            }
            ActionPayload::StakeCreate(s) => WireAction::StakeCreate(proto::StakeCreate {
                candidate_name: s.candidate_name.clone(),
                staked_amount: s.amount.to_string(),
                staked_duration: s.duration,
                auto_stake: s.auto_stake,
                payload: s.payload.to_vec(),
            }),
            ActionPayload::StakeUnstake(r) => WireAction::StakeUnstake(reclaim_to_proto(r)),
            ActionPayload::StakeWithdraw(r) => WireAction::StakeWithdraw(reclaim_to_proto(r)),
            ActionPayload::StakeAddDeposit(s) => {
                WireAction::StakeAddDeposit(proto::StakeAddDeposit {
                    bucket_index: s.bucket_index,
                    amount: s.amount.to_string(),
                    payload: s.payload.to_vec(),
                })
            }
            ActionPayload::StakeRestake(s) => WireAction::StakeRestake(proto::StakeRestake {
                bucket_index: s.bucket_index,
                staked_duration: s.duration,
                auto_stake: s.auto_stake,
                payload: s.payload.to_vec(),
            }),
            ActionPayload::StakeChangeCandidate(s) => {
                WireAction::StakeChangeCandidate(proto::StakeChangeCandidate {
                    bucket_index: s.bucket_index,
                    candidate_name: s.candidate_name.clone(),
                    payload: s.payload.to_vec(),
                })
            }
            ActionPayload::StakeTransferOwnership(s) => {
                WireAction::StakeTransferOwnership(proto::StakeTransferOwnership {
                    bucket_index: s.bucket_index,
                    voter_address: s.voter.to_string(),
                    payload: s.payload.to_vec(),
                })
            }
            ActionPayload::CandidateRegister(c) => {
                WireAction::CandidateRegister(proto::CandidateRegister {
                    candidate: Some(proto::CandidateBasicInfo {
                        name: c.name.clone(),
                        operator_address: c.operator.to_string(),
                        reward_address: c.reward.to_string(),
                    }),
                    staked_amount: c.amount.to_string(),
                    staked_duration: c.duration,
                    auto_stake: c.auto_stake,
                    owner_address: c.owner.map(|o| o.to_string()).unwrap_or_default(),
                    payload: c.payload.to_vec(),
                })
            }
            ActionPayload::CandidateUpdate(c) => {
                WireAction::CandidateUpdate(proto::CandidateBasicInfo {
                    name: c.name.clone(),
                    operator_address: c.operator.to_string(),
                    reward_address: c.reward.to_string(),
                })
            }
        }
    }
}

fn reclaim_to_proto(r: &StakeReclaim) -> proto::StakeReclaim {
    proto::StakeReclaim {
        bucket_index: r.bucket_index,
        payload: r.payload.to_vec(),
    }
}

fn reclaim_from_proto(r: proto::StakeReclaim) -> StakeReclaim {
    StakeReclaim {
        bucket_index: r.bucket_index,
        payload: r.payload.into(),
    }
}

impl TryFrom<WireAction> for ActionPayload {
    type Error = TypesError;

    fn try_from(action: WireAction) -> Result<Self, Self::Error> {
        Ok(match action {
            WireAction::Transfer(t) => ActionPayload::Transfer(Transfer {
                amount: parse_amount(&t.amount, "amount")?,
                recipient: parse_address(&t.recipient)?,
                payload: t.payload.into(),
            }),
            WireAction::Execution(e) if e.contract.is_empty() => {
                ActionPayload::Deployment(Deployment {
                    amount: parse_amount(&e.amount, "amount")?,
                    data: e.data.into(),
                })
            }
            WireAction::Execution(e) => ActionPayload::Invocation(Invocation {
                contract: parse_address(&e.contract)?,
                amount: parse_amount(&e.amount, "amount")?,
                data: e.data.into(),
            }),
            WireAction::ClaimFromRewardingFund(c) => ActionPayload::ClaimReward(ClaimReward {
                amount: parse_amount(&c.amount, "amount")?,
                data: c.data.into(),
            }),
            WireAction::StakeCreate(s) => ActionPayload::StakeCreate(StakeCreate {
                candidate_name: s.candidate_name,
                amount: parse_amount(&s.staked_amount, "staked amount")?,
                duration: s.staked_duration,
                auto_stake: s.auto_stake,
                payload: s.payload.into(),
            }),
            WireAction::StakeUnstake(r) => ActionPayload::StakeUnstake(reclaim_from_proto(r)),
            WireAction::StakeWithdraw(r) => ActionPayload::StakeWithdraw(reclaim_from_proto(r)),
            WireAction::StakeAddDeposit(s) => ActionPayload::StakeAddDeposit(StakeAddDeposit {
                bucket_index: s.bucket_index,
                amount: parse_amount(&s.amount, "deposit amount")?,
                payload: s.payload.into(),
            }),
            WireAction::StakeRestake(s) => ActionPayload::StakeRestake(StakeRestake {
                bucket_index: s.bucket_index,
                duration: s.staked_duration,
                auto_stake: s.auto_stake,
                payload: s.payload.into(),
            }),
            WireAction::StakeChangeCandidate(s) => {
                ActionPayload::StakeChangeCandidate(StakeChangeCandidate {
                    bucket_index: s.bucket_index,
                    candidate_name: s.candidate_name,
                    payload: s.payload.into(),
                })
            }
            WireAction::StakeTransferOwnership(s) => {
                ActionPayload::StakeTransferOwnership(StakeTransferOwnership {
                    bucket_index: s.bucket_index,
                    voter: parse_address(&s.voter_address)?,
                    payload: s.payload.into(),
                })
            }
            WireAction::CandidateRegister(c) => {
                let info = c.candidate.unwrap_or_default();
                let owner = if c.owner_address.is_empty() {
                    None
                } else {
                    Some(parse_address(&c.owner_address)?)
                };
                ActionPayload::CandidateRegister(CandidateRegister {
                    name: info.name,
                    operator: parse_address(&info.operator_address)?,
                    reward: parse_address(&info.reward_address)?,
                    amount: parse_amount(&c.staked_amount, "staked amount")?,
                    duration: c.staked_duration,
                    auto_stake: c.auto_stake,
                    owner,
                    payload: c.payload.into(),
                })
            }
            WireAction::CandidateUpdate(c) => ActionPayload::CandidateUpdate(CandidateUpdate {
                name: c.name,
                operator: parse_address(&c.operator_address)?,
                reward: parse_address(&c.reward_address)?,
            }),
        })
    }
}

/// Unsigned action body
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionCore {
    /// Protocol version
    pub version: u32,
    /// Sender sequence number
    pub nonce: u64,
    /// Gas budget
    pub gas_limit: u64,
    /// Gas unit price; `None` leaves the field empty on the wire
    pub gas_price: Option<BigUint>,
    /// Target chain, 0 when unset
    pub chain_id: u32,
    /// The action itself
    pub payload: ActionPayload,
}

impl ActionCore {
    /// Body at the current protocol version with zero nonce and fee fields
    pub fn new(payload: ActionPayload) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            nonce: 0,
            gas_limit: 0,
            gas_price: None,
            chain_id: 0,
            payload,
        }
    }

    /// Fully specified transfer body.
    ///
    /// Fails on a negative amount, a negative gas price or an empty recipient.
    pub fn transfer(
        nonce: u64,
        gas_limit: u64,
        gas_price: impl Into<BigInt>,
        amount: impl Into<BigInt>,
        recipient: &str,
        payload: &[u8],
    ) -> Result<Self, TypesError> {
        let gas_price = non_negative(gas_price.into(), "gas price")?;
        let transfer = Transfer::new(amount, recipient)?.with_payload(payload);
        Ok(Self::new(ActionPayload::Transfer(transfer))
            .with_nonce(nonce)
            .with_gas_limit(gas_limit)
            .with_gas_price(gas_price))
    }

    /// Set the nonce
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Set the gas limit
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// Set the gas price
    pub fn with_gas_price(mut self, gas_price: BigUint) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    /// Set the chain id
    pub fn with_chain_id(mut self, chain_id: u32) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Copy with both fee fields cleared, as sent for gas estimation
    pub fn draft(&self) -> Self {
        Self {
            gas_limit: 0,
            gas_price: None,
            ..self.clone()
        }
    }

    /// Wire form
    pub fn to_proto(&self) -> proto::ActionCore {
        proto::ActionCore {
            version: self.version,
            nonce: self.nonce,
            gas_limit: self.gas_limit,
            gas_price: self
                .gas_price
                .as_ref()
                .map(|p| p.to_string())
                .unwrap_or_default(),
            chain_id: self.chain_id,
            action: Some(self.payload.to_proto()),
        }
    }

    /// Canonical bytes covered by the signature
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_proto().encode_to_vec()
    }

    /// Keccak-256 of the canonical bytes
    pub fn hash(&self) -> H256 {
        keccak256(&self.to_bytes())
    }

    /// Decode from canonical bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypesError> {
        proto::ActionCore::decode(bytes)?.try_into()
    }
}

impl TryFrom<proto::ActionCore> for ActionCore {
    type Error = TypesError;

    fn try_from(core: proto::ActionCore) -> Result<Self, Self::Error> {
        let gas_price = if core.gas_price.is_empty() {
            None
        } else {
            Some(parse_amount(&core.gas_price, "gas price")?)
        };
        Ok(Self {
            version: core.version,
            nonce: core.nonce,
            gas_limit: core.gas_limit,
            gas_price,
            chain_id: core.chain_id,
            payload: core.action.ok_or(TypesError::MissingPayload)?.try_into()?,
        })
    }
}
