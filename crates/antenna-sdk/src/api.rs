//! Typed access to the ledger service

use std::sync::Arc;

use antenna_primitives::{Address, H256};
use antenna_types::{Log, Receipt, SealedAction};
use bytes::Bytes;
use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::transport::{methods, Transport};
use crate::SdkError;

/// Account state reported by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    /// Account address
    pub address: Address,
    /// Balance in the smallest unit
    pub balance: BigUint,
    /// Nonce of the last confirmed action
    pub nonce: u64,
    /// Nonce the next action should use
    pub pending_nonce: u64,
}

/// Log query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    /// First block, inclusive
    pub from_block: u64,
    /// Number of blocks to scan
    pub count: u64,
    /// Emitting contracts; empty matches all
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
    /// Topic alternatives per position; an empty position matches anything
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub topics: Vec<Vec<String>>,
}

impl LogFilter {
    /// Scan `count` blocks starting at `from_block`
    pub fn new(from_block: u64, count: u64) -> Self {
        Self {
            from_block,
            count,
            ..Default::default()
        }
    }

    /// Only logs emitted by `contract`
    pub fn address(mut self, contract: Address) -> Self {
        self.address.push(contract);
        self
    }

    /// Require one of `alternatives` at the next topic position
    pub fn topic(mut self, alternatives: &[H256]) -> Self {
        self.topics
            .push(alternatives.iter().map(H256::encode_hex).collect());
        self
    }
}

/// Cheaply clonable handle on the remote service.
///
/// Every method is one request. Malformed responses surface as
/// [`SdkError::BadResponse`].
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    /// Wrap a transport
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Wrap an already shared transport
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, SdkError> {
        let value = self.transport.request_json(method, params).await?;
        serde_json::from_value(value)
            .map_err(|e| SdkError::BadResponse(format!("{}: {}", method, e)))
    }

    /// Account state, including the pending nonce
    pub async fn get_account(&self, address: &Address) -> Result<AccountMeta, SdkError> {
        let raw: AccountDto = self
            .request(methods::GET_ACCOUNT, vec![Value::String(address.to_string())])
            .await?;
        Ok(AccountMeta {
            address: parse_address(&raw.address)?,
            balance: parse_decimal(&raw.balance)?,
            nonce: raw.nonce,
            pending_nonce: raw.pending_nonce,
        })
    }

    /// Gas needed to execute a sealed draft action
    pub async fn estimate_action_gas(&self, action: &SealedAction) -> Result<u64, SdkError> {
        let raw: GasDto = self
            .request(methods::ESTIMATE_ACTION_GAS, vec![encode_action(action)])
            .await?;
        Ok(raw.gas)
    }

    /// Suggested gas price
    pub async fn suggest_gas_price(&self) -> Result<u64, SdkError> {
        let raw: GasPriceDto = self.request(methods::SUGGEST_GAS_PRICE, vec![]).await?;
        Ok(raw.gas_price)
    }

    /// Submit a sealed action; returns the action hash
    pub async fn send_action(&self, action: &SealedAction) -> Result<H256, SdkError> {
        let raw: SendActionDto = self
            .request(methods::SEND_ACTION, vec![encode_action(action)])
            .await?;
        parse_hash(&raw.action_hash)
    }

    /// Receipt of an executed action
    pub async fn get_receipt_by_action(&self, hash: &H256) -> Result<Receipt, SdkError> {
        let raw: ReceiptEnvelope = self
            .request(
                methods::GET_RECEIPT_BY_ACTION,
                vec![Value::String(hash.encode_hex())],
            )
            .await?;
        raw.receipt.into_receipt()
    }

    /// Run `data` against `contract` without creating an action
    pub async fn read_contract(
        &self,
        contract: &Address,
        data: &[u8],
        caller: &Address,
    ) -> Result<Vec<u8>, SdkError> {
        let execution = serde_json::json!({
            "amount": "0",
            "contract": contract.to_string(),
            "data": hex::encode(data),
        });
        let raw: ReadContractDto = self
            .request(
                methods::READ_CONTRACT,
                vec![execution, Value::String(caller.to_string())],
            )
            .await?;
        parse_hex(&raw.data)
    }

    /// Logs matching `filter`
    pub async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<Log>, SdkError> {
        let raw: LogsDto = self
            .request(methods::GET_LOGS, vec![serde_json::to_value(filter)?])
            .await?;
        raw.logs.into_iter().map(LogDto::into_log).collect()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

fn encode_action(action: &SealedAction) -> Value {
    Value::String(hex::encode(action.to_bytes()))
}

fn bad_response(what: &str, value: &str) -> SdkError {
    SdkError::BadResponse(format!("invalid {} {:?}", what, value))
}

fn parse_hex(s: &str) -> Result<Vec<u8>, SdkError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(trimmed).map_err(|_| bad_response("hex data", s))
}

fn parse_hash(s: &str) -> Result<H256, SdkError> {
    H256::from_hex(s).map_err(|_| bad_response("action hash", s))
}

fn parse_address(s: &str) -> Result<Address, SdkError> {
    s.parse().map_err(|_| bad_response("address", s))
}

fn parse_decimal(s: &str) -> Result<BigUint, SdkError> {
    if s.is_empty() {
        return Ok(BigUint::default());
    }
    s.parse().map_err(|_| bad_response("amount", s))
}

/// 64-bit integers arrive as JSON numbers or as decimal strings
fn flexible_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountDto {
    address: String,
    #[serde(default)]
    balance: String,
    #[serde(default, deserialize_with = "flexible_u64")]
    nonce: u64,
    #[serde(deserialize_with = "flexible_u64")]
    pending_nonce: u64,
}

#[derive(Deserialize)]
struct GasDto {
    #[serde(deserialize_with = "flexible_u64")]
    gas: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GasPriceDto {
    #[serde(deserialize_with = "flexible_u64")]
    gas_price: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendActionDto {
    action_hash: String,
}

#[derive(Deserialize)]
struct ReadContractDto {
    #[serde(default)]
    data: String,
}

#[derive(Deserialize)]
struct ReceiptEnvelope {
    receipt: ReceiptDto,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptDto {
    #[serde(deserialize_with = "flexible_u64")]
    status: u64,
    #[serde(default, deserialize_with = "flexible_u64")]
    blk_height: u64,
    act_hash: String,
    #[serde(default, deserialize_with = "flexible_u64")]
    gas_consumed: u64,
    #[serde(default)]
    contract_address: String,
    #[serde(default)]
    logs: Vec<LogDto>,
}

impl ReceiptDto {
    fn into_receipt(self) -> Result<Receipt, SdkError> {
        let contract_address = if self.contract_address.is_empty() {
            None
        } else {
            Some(parse_address(&self.contract_address)?)
        };
        Ok(Receipt {
            status: self.status,
            block_height: self.blk_height,
            action_hash: parse_hash(&self.act_hash)?,
            gas_consumed: self.gas_consumed,
            contract_address,
            logs: self
                .logs
                .into_iter()
                .map(LogDto::into_log)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(Deserialize)]
struct LogsDto {
    #[serde(default)]
    logs: Vec<LogDto>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogDto {
    contract_address: String,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    data: String,
    #[serde(default, deserialize_with = "flexible_u64")]
    blk_height: u64,
    act_hash: String,
    #[serde(default)]
    index: u32,
}

impl LogDto {
    fn into_log(self) -> Result<Log, SdkError> {
        Ok(Log {
            contract_address: parse_address(&self.contract_address)?,
            topics: self
                .topics
                .iter()
                .map(|t| parse_hash(t))
                .collect::<Result<_, _>>()?,
            data: Bytes::from(parse_hex(&self.data)?),
            block_height: self.blk_height,
            action_hash: parse_hash(&self.act_hash)?,
            index: self.index,
        })
    }
}
