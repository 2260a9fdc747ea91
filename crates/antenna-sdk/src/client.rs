//! Ledger clients

use std::sync::Arc;

use antenna_primitives::{Address, H256};
use antenna_types::{Log, Receipt};
use num_bigint::BigInt;

use crate::account::Account;
use crate::api::{AccountMeta, ApiClient, LogFilter};
use crate::caller::{
    CandidateCaller, ClaimRewardCaller, DeployContractCaller, SendActionCaller, StakingCaller,
    TransferCaller,
};
use crate::config::ClientConfig;
use crate::contract::{Contract, ReadOnlyContract};
use crate::interface::ContractInterface;
use crate::transport::{MockTransport, Transport};
use crate::wait::wait_for_receipt;
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client for queries that need no account
#[derive(Debug, Clone)]
pub struct ReadOnlyClient {
    api: ApiClient,
    config: ClientConfig,
}

impl ReadOnlyClient {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn connect(config: ClientConfig) -> Result<Self, SdkError> {
        let transport = HttpTransport::with_timeout(&config.endpoint, config.request_timeout())?;
        tracing::info!("Connecting to {}", config.endpoint);
        Ok(Self::with_transport(transport, config))
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new(), ClientConfig::default())
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static, config: ClientConfig) -> Self {
        Self::with_api(ApiClient::new(transport), config)
    }

    /// Create a client on an existing API handle
    pub fn with_api(api: ApiClient, config: ClientConfig) -> Self {
        Self { api, config }
    }

    /// Underlying API handle
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Configuration in use
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Read-only handle on a deployed contract
    pub fn read_only_contract(
        &self,
        address: Address,
        interface: Arc<ContractInterface>,
    ) -> ReadOnlyContract {
        ReadOnlyContract::new(address, interface, self.api.clone())
    }

    /// Account state
    pub async fn get_account(&self, address: &Address) -> Result<AccountMeta, SdkError> {
        self.api.get_account(address).await
    }

    /// Receipt of an action
    pub async fn get_receipt(&self, hash: &H256) -> Result<Receipt, SdkError> {
        self.api.get_receipt_by_action(hash).await
    }

    /// Logs matching `filter`
    pub async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<Log>, SdkError> {
        self.api.get_logs(filter).await
    }

    /// Wait the configured delay, then check the receipt of `hash` once
    pub async fn wait_for_receipt(&self, hash: H256) -> Result<Receipt, SdkError> {
        wait_for_receipt(&self.api, hash, self.config.receipt_delay()).await
    }
}

/// Client that signs and submits actions for one account
#[derive(Debug, Clone)]
pub struct AuthedClient {
    read_only: ReadOnlyClient,
    account: Arc<Account>,
}

impl AuthedClient {
    /// Sign with `account` on top of `read_only`
    pub fn new(read_only: ReadOnlyClient, account: Arc<Account>) -> Self {
        Self { read_only, account }
    }

    /// The signing account
    pub fn account(&self) -> &Arc<Account> {
        &self.account
    }

    /// Chain id stamped on actions
    pub fn chain_id(&self) -> u32 {
        self.read_only.config.chain_id
    }

    /// Account-less part of this client
    pub fn read_only(&self) -> &ReadOnlyClient {
        &self.read_only
    }

    fn core(&self) -> SendActionCaller {
        SendActionCaller::new(
            Arc::clone(&self.account),
            self.read_only.api.clone(),
            self.chain_id(),
            self.read_only.config.receipt_delay(),
        )
    }

    /// Handle on a deployed contract, able to execute and read
    pub fn contract(&self, address: Address, interface: Arc<ContractInterface>) -> Contract {
        Contract::new(
            self.read_only.read_only_contract(address, interface),
            Arc::clone(&self.account),
            self.chain_id(),
            self.read_only.config.receipt_delay(),
        )
    }

    /// Send `amount` to `recipient` (`io1...` or `0x...`)
    pub fn transfer(&self, recipient: &str, amount: impl Into<BigInt>) -> TransferCaller {
        TransferCaller::new(self.core(), recipient, amount.into())
    }

    /// Claim `amount` from the rewarding fund
    pub fn claim_reward(&self, amount: impl Into<BigInt>) -> ClaimRewardCaller {
        ClaimRewardCaller::new(self.core(), amount.into())
    }

    /// Deploy `bytecode`
    pub fn deploy_contract(&self, bytecode: &[u8]) -> DeployContractCaller {
        DeployContractCaller::new(self.core(), bytecode)
    }

    /// Staking actions
    pub fn staking(&self) -> StakingCaller {
        StakingCaller::new(self.core())
    }

    /// Candidate actions
    pub fn candidate(&self) -> CandidateCaller {
        CandidateCaller::new(self.core())
    }
}
