//! Contract handles and read-only calls

use std::sync::Arc;
use std::time::Duration;

use antenna_primitives::Address;

use crate::abi::Token;
use crate::account::Account;
use crate::api::ApiClient;
use crate::caller::{ExecuteContractCaller, SendActionCaller};
use crate::coerce::ArgValue;
use crate::interface::ContractInterface;
use crate::SdkError;

/// A deployed contract that can only be read
#[derive(Debug, Clone)]
pub struct ReadOnlyContract {
    address: Address,
    interface: Arc<ContractInterface>,
    api: ApiClient,
}

impl ReadOnlyContract {
    pub(crate) fn new(address: Address, interface: Arc<ContractInterface>, api: ApiClient) -> Self {
        Self {
            address,
            interface,
            api,
        }
    }

    /// Contract address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Contract interface
    pub fn interface(&self) -> &Arc<ContractInterface> {
        &self.interface
    }

    /// Prepare a read of `method`
    pub fn read(&self, method: &str, args: Vec<ArgValue>) -> ReadContractCaller {
        ReadContractCaller {
            contract: self.clone(),
            method: method.to_string(),
            args,
            caller: Address::ZERO,
        }
    }
}

/// A deployed contract whose methods can also be executed
#[derive(Debug, Clone)]
pub struct Contract {
    read_only: ReadOnlyContract,
    account: Arc<Account>,
    chain_id: u32,
    receipt_delay: Duration,
}

impl Contract {
    pub(crate) fn new(
        read_only: ReadOnlyContract,
        account: Arc<Account>,
        chain_id: u32,
        receipt_delay: Duration,
    ) -> Self {
        Self {
            read_only,
            account,
            chain_id,
            receipt_delay,
        }
    }

    /// Contract address
    pub fn address(&self) -> &Address {
        self.read_only.address()
    }

    /// Prepare an action calling `method`
    pub fn execute(&self, method: &str, args: Vec<ArgValue>) -> ExecuteContractCaller {
        let core = SendActionCaller::new(
            Arc::clone(&self.account),
            self.read_only.api.clone(),
            self.chain_id,
            self.receipt_delay,
        );
        ExecuteContractCaller::new(
            core,
            self.read_only.address,
            Arc::clone(&self.read_only.interface),
            method,
            args,
        )
    }

    /// Prepare a read of `method`, made from this client's account
    pub fn read(&self, method: &str, args: Vec<ArgValue>) -> ReadContractCaller {
        self.read_only
            .read(method, args)
            .set_caller(*self.account.address())
    }
}

/// Read-only contract call
#[derive(Debug)]
pub struct ReadContractCaller {
    contract: ReadOnlyContract,
    method: String,
    args: Vec<ArgValue>,
    caller: Address,
}

impl ReadContractCaller {
    /// Account the call is made from; the zero address by default
    pub fn set_caller(mut self, caller: Address) -> Self {
        self.caller = caller;
        self
    }

    /// Pack the call, run it and keep the raw result
    pub async fn call(self) -> Result<CallResult, SdkError> {
        let ReadOnlyContract {
            address,
            interface,
            api,
        } = self.contract;
        let data = interface.encode_call(&self.method, self.args)?;
        let raw = api.read_contract(&address, &data, &self.caller).await?;
        tracing::debug!("Read {} on {}: {} bytes", self.method, address, raw.len());
        Ok(CallResult {
            method: self.method,
            interface,
            raw,
        })
    }
}

/// Raw return data of a read, decoded on demand.
///
/// Decoding does not query the service again and can be repeated.
#[derive(Debug, Clone)]
pub struct CallResult {
    method: String,
    interface: Arc<ContractInterface>,
    raw: Vec<u8>,
}

impl CallResult {
    /// Method that was read
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Undecoded return data
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Decode the return data against the method's outputs
    pub fn decode(&self) -> Result<Vec<Token>, SdkError> {
        self.interface.decode_output(&self.method, &self.raw)
    }
}
