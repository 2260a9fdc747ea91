//! Protobuf wire messages.
//!
//! These mirror the ledger's `iotextypes` schema field for field. The byte
//! output of [`prost::Message::encode_to_vec`] on [`ActionCore`] is the
//! canonical form that gets hashed and signed, so tags here must never change.

#![allow(missing_docs)]

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transfer {
    #[prost(string, tag = "1")]
    pub amount: String,
    #[prost(string, tag = "2")]
    pub recipient: String,
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Execution {
    #[prost(string, tag = "1")]
    pub amount: String,
    #[prost(string, tag = "2")]
    pub contract: String,
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClaimFromRewardingFund {
    #[prost(string, tag = "1")]
    pub amount: String,
    #[prost(bytes = "vec", tag = "2")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StakeCreate {
    #[prost(string, tag = "1")]
    pub candidate_name: String,
    #[prost(string, tag = "2")]
    pub staked_amount: String,
    #[prost(uint32, tag = "3")]
    pub staked_duration: u32,
    #[prost(bool, tag = "4")]
    pub auto_stake: bool,
    #[prost(bytes = "vec", tag = "5")]
    pub payload: Vec<u8>,
}

/// Shared by unstake and withdraw
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StakeReclaim {
    #[prost(uint64, tag = "1")]
    pub bucket_index: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub payload: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StakeAddDeposit {
    #[prost(uint64, tag = "1")]
    pub bucket_index: u64,
    #[prost(string, tag = "2")]
    pub amount: String,
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StakeRestake {
    #[prost(uint64, tag = "1")]
    pub bucket_index: u64,
    #[prost(uint32, tag = "2")]
    pub staked_duration: u32,
    #[prost(bool, tag = "3")]
    pub auto_stake: bool,
    #[prost(bytes = "vec", tag = "4")]
    pub payload: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StakeChangeCandidate {
    #[prost(uint64, tag = "1")]
    pub bucket_index: u64,
    #[prost(string, tag = "2")]
    pub candidate_name: String,
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StakeTransferOwnership {
    #[prost(uint64, tag = "1")]
    pub bucket_index: u64,
    #[prost(string, tag = "2")]
    pub voter_address: String,
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

/// Also used on its own as the candidate update payload
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CandidateBasicInfo {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub operator_address: String,
    #[prost(string, tag = "3")]
    pub reward_address: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CandidateRegister {
    #[prost(message, optional, tag = "1")]
    pub candidate: Option<CandidateBasicInfo>,
    #[prost(string, tag = "2")]
    pub staked_amount: String,
    #[prost(uint32, tag = "3")]
    pub staked_duration: u32,
    #[prost(bool, tag = "4")]
    pub auto_stake: bool,
    #[prost(string, tag = "5")]
    pub owner_address: String,
    #[prost(bytes = "vec", tag = "6")]
    pub payload: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActionCore {
    #[prost(uint32, tag = "1")]
    pub version: u32,
    #[prost(uint64, tag = "2")]
    pub nonce: u64,
    #[prost(uint64, tag = "3")]
    pub gas_limit: u64,
    #[prost(string, tag = "4")]
    pub gas_price: String,
    #[prost(uint32, tag = "5")]
    pub chain_id: u32,
    #[prost(
        oneof = "action_core::Action",
        tags = "10, 12, 31, 40, 41, 42, 43, 44, 45, 46, 47, 48"
    )]
    pub action: Option<action_core::Action>,
}

pub mod action_core {
    #![allow(missing_docs)]

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Action {
        #[prost(message, tag = "10")]
        Transfer(super::Transfer),
        #[prost(message, tag = "12")]
        Execution(super::Execution),
        #[prost(message, tag = "31")]
        ClaimFromRewardingFund(super::ClaimFromRewardingFund),
        #[prost(message, tag = "40")]
        StakeCreate(super::StakeCreate),
        #[prost(message, tag = "41")]
        StakeUnstake(super::StakeReclaim),
        #[prost(message, tag = "42")]
        StakeWithdraw(super::StakeReclaim),
        #[prost(message, tag = "43")]
        StakeAddDeposit(super::StakeAddDeposit),
        #[prost(message, tag = "44")]
        StakeRestake(super::StakeRestake),
        #[prost(message, tag = "45")]
        StakeChangeCandidate(super::StakeChangeCandidate),
        #[prost(message, tag = "46")]
        StakeTransferOwnership(super::StakeTransferOwnership),
        #[prost(message, tag = "47")]
        CandidateRegister(super::CandidateRegister),
        #[prost(message, tag = "48")]
        CandidateUpdate(super::CandidateBasicInfo),
    }
}

/// Sealed action envelope
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Action {
    #[prost(message, optional, tag = "1")]
    pub core: Option<ActionCore>,
    #[prost(bytes = "vec", tag = "2")]
    pub sender_pub_key: Vec<u8>,
    #[prost(bytes = "vec", tag = "3")]
    pub signature: Vec<u8>,
    /// 0 = protobuf; other encodings are not produced by this crate
    #[prost(int32, tag = "4")]
    pub encoding: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_defaults_are_omitted() {
        let core = ActionCore {
            version: 1,
            ..Default::default()
        };
        assert_eq!(core.encode_to_vec(), vec![0x08, 0x01]);
    }

    #[test]
    fn test_field_order_is_ascending() {
        let core = ActionCore {
            version: 1,
            nonce: 2,
            gas_limit: 3,
            gas_price: "4".to_string(),
            chain_id: 5,
            action: Some(action_core::Action::StakeUnstake(StakeReclaim {
                bucket_index: 7,
                payload: vec![],
            })),
        };
        let bytes = core.encode_to_vec();
        assert_eq!(
            bytes,
            vec![
                0x08, 0x01, // version
                0x10, 0x02, // nonce
                0x18, 0x03, // gas limit
                0x22, 0x01, b'4', // gas price
                0x28, 0x05, // chain id
                0xca, 0x02, 0x02, 0x08, 0x07, // field 41, bucket index 7
            ]
        );
        assert_eq!(ActionCore::decode(bytes.as_slice()).unwrap(), core);
    }

    #[test]
    fn test_unstake_and_withdraw_share_message_but_not_tag() {
        let reclaim = StakeReclaim {
            bucket_index: 1,
            payload: vec![],
        };
        let unstake = ActionCore {
            action: Some(action_core::Action::StakeUnstake(reclaim.clone())),
            ..Default::default()
        };
        let withdraw = ActionCore {
            action: Some(action_core::Action::StakeWithdraw(reclaim)),
            ..Default::default()
        };
        assert_ne!(unstake.encode_to_vec(), withdraw.encode_to_vec());
    }
}
