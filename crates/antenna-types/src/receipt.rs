//! Execution receipts

use antenna_primitives::{Address, H256};
use bytes::Bytes;

/// Status code the ledger uses for a successful action
pub const RECEIPT_STATUS_SUCCESS: u64 = 1;

/// Log entry emitted during execution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Log {
    /// Contract that emitted the log
    pub contract_address: Address,
    /// Indexed topics
    pub topics: Vec<H256>,
    /// Non-indexed data
    pub data: Bytes,
    /// Block the log was included in
    pub block_height: u64,
    /// Action that produced the log
    pub action_hash: H256,
    /// Position within the action's logs
    pub index: u32,
}

impl Log {
    /// First topic, usually the event signature
    pub fn topic0(&self) -> Option<&H256> {
        self.topics.first()
    }
}

/// Outcome of an executed action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Status code; [`RECEIPT_STATUS_SUCCESS`] on success
    pub status: u64,
    /// Block height the action was included at
    pub block_height: u64,
    /// Hash of the action
    pub action_hash: H256,
    /// Gas consumed
    pub gas_consumed: u64,
    /// Address of the contract created, for deployments
    pub contract_address: Option<Address>,
    /// Emitted logs
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Whether the action executed successfully
    pub fn is_success(&self) -> bool {
        self.status == RECEIPT_STATUS_SUCCESS
    }

    /// Number of emitted logs
    pub fn log_count(&self) -> usize {
        self.logs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(status: u64) -> Receipt {
        Receipt {
            status,
            block_height: 10,
            action_hash: H256::from_bytes([1; 32]),
            gas_consumed: 10_000,
            contract_address: None,
            logs: vec![Log {
                contract_address: Address::from_bytes([2; 20]),
                topics: vec![H256::from_bytes([3; 32])],
                data: Bytes::from_static(&[4]),
                block_height: 10,
                action_hash: H256::from_bytes([1; 32]),
                index: 0,
            }],
        }
    }

    #[test]
    fn test_status_codes() {
        assert!(receipt(1).is_success());
        assert!(!receipt(0).is_success());
        // execution reverted
        assert!(!receipt(106).is_success());
    }

    #[test]
    fn test_log_accessors() {
        let r = receipt(1);
        assert_eq!(r.log_count(), 1);
        assert_eq!(r.logs[0].topic0(), Some(&H256::from_bytes([3; 32])));
    }
}
