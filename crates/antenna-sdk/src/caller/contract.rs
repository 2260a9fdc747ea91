use std::sync::Arc;

use antenna_primitives::Address;
use antenna_types::{ActionPayload, Deployment, Invocation};
use num_bigint::BigInt;

use super::SendActionCaller;
use crate::coerce::ArgValue;
use crate::interface::ContractInterface;
use crate::SdkError;

/// Contract deployment caller
#[derive(Debug)]
pub struct DeployContractCaller {
    core: SendActionCaller,
    bytecode: Vec<u8>,
    constructor: Option<(Arc<ContractInterface>, Vec<ArgValue>)>,
}

impl DeployContractCaller {
    pub(crate) fn new(core: SendActionCaller, bytecode: &[u8]) -> Self {
        Self {
            core,
            bytecode: bytecode.to_vec(),
            constructor: None,
        }
    }

    /// Constructor arguments, packed against `interface` and appended to the
    /// bytecode. An empty list deploys the bytecode as is.
    pub fn set_args(mut self, interface: Arc<ContractInterface>, args: Vec<ArgValue>) -> Self {
        self.constructor = Some((interface, args));
        self
    }

    fn deployment(
        bytecode: Vec<u8>,
        constructor: Option<(Arc<ContractInterface>, Vec<ArgValue>)>,
    ) -> Result<ActionPayload, SdkError> {
        if bytecode.is_empty() {
            return Err(SdkError::InvalidParam(
                "contract data can not be empty".to_string(),
            ));
        }
        let mut data = bytecode;
        if let Some((interface, args)) = constructor.filter(|(_, args)| !args.is_empty()) {
            data.extend(interface.encode_constructor(args)?);
        }
        Ok(ActionPayload::Deployment(Deployment::new(&data)?))
    }

    fn into_action(self) -> (SendActionCaller, Result<ActionPayload, SdkError>) {
        (self.core, Self::deployment(self.bytecode, self.constructor))
    }
}

action_caller!(DeployContractCaller);

/// Contract method call caller
#[derive(Debug)]
pub struct ExecuteContractCaller {
    core: SendActionCaller,
    contract: Address,
    interface: Arc<ContractInterface>,
    method: String,
    args: Vec<ArgValue>,
    amount: BigInt,
}

impl ExecuteContractCaller {
    pub(crate) fn new(
        core: SendActionCaller,
        contract: Address,
        interface: Arc<ContractInterface>,
        method: &str,
        args: Vec<ArgValue>,
    ) -> Self {
        Self {
            core,
            contract,
            interface,
            method: method.to_string(),
            args,
            amount: BigInt::default(),
        }
    }

    /// Value sent along with the call; zero by default
    pub fn set_amount(mut self, amount: impl Into<BigInt>) -> Self {
        self.amount = amount.into();
        self
    }

    fn invocation(&self, args: Vec<ArgValue>) -> Result<ActionPayload, SdkError> {
        let data = self.interface.encode_call(&self.method, args)?;
        let invocation = Invocation::new(self.contract, &data).with_amount(self.amount.clone())?;
        Ok(ActionPayload::Invocation(invocation))
    }

    fn into_action(mut self) -> (SendActionCaller, Result<ActionPayload, SdkError>) {
        let args = std::mem::take(&mut self.args);
        let payload = self.invocation(args);
        (self.core, payload)
    }
}

action_caller!(ExecuteContractCaller);
