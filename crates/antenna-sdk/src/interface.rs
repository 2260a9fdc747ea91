//! Contract interfaces (ABI method tables)

use std::collections::HashMap;

use serde::Deserialize;

use crate::abi::{decode, encode_function_call, encode_params, function_selector, parse_type, ParamType, Token};
use crate::coerce::{coerce_arguments, ArgValue};
use crate::SdkError;

/// Named, typed parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name, may be empty
    pub name: String,
    /// Declared type
    pub kind: ParamType,
}

impl Param {
    /// Unnamed parameter
    pub fn unnamed(kind: ParamType) -> Self {
        Self {
            name: String::new(),
            kind,
        }
    }
}

/// Contract method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    /// Method name as written in the contract
    pub name: String,
    /// Inputs in declared order
    pub inputs: Vec<Param>,
    /// Outputs in declared order
    pub outputs: Vec<Param>,
    /// Whether the method is `view` or `pure`
    pub read_only: bool,
}

impl Function {
    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(|p| p.kind.to_string()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// First four bytes of the signature hash
    pub fn selector(&self) -> [u8; 4] {
        function_selector(&self.signature())
    }

    /// Input types
    pub fn input_types(&self) -> Vec<ParamType> {
        self.inputs.iter().map(|p| p.kind.clone()).collect()
    }

    /// Output types
    pub fn output_types(&self) -> Vec<ParamType> {
        self.outputs.iter().map(|p| p.kind.clone()).collect()
    }
}

/// Method table of a contract, keyed by method name.
///
/// Overloaded methods keep the first declaration under its own name; later
/// ones are stored as `name0`, `name1`, ...
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractInterface {
    methods: HashMap<String, Function>,
    constructor: Vec<Param>,
}

impl ContractInterface {
    /// Start building an interface by hand
    pub fn builder() -> InterfaceBuilder {
        InterfaceBuilder::default()
    }

    /// Parse a standard JSON ABI document
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        let entries: Vec<AbiEntry> = serde_json::from_str(json)
            .map_err(|e| SdkError::InvalidParam(format!("invalid ABI JSON: {}", e)))?;

        let mut interface = Self::default();
        for entry in entries {
            match entry.kind.as_str() {
                "function" => {
                    let read_only = entry.constant
                        || matches!(entry.state_mutability.as_deref(), Some("view" | "pure"));
                    let function = Function {
                        name: entry.name,
                        inputs: params(&entry.inputs)?,
                        outputs: params(&entry.outputs)?,
                        read_only,
                    };
                    interface.insert(function);
                }
                "constructor" => interface.constructor = params(&entry.inputs)?,
                // events, errors, fallback and receive carry no callable inputs
                _ => {}
            }
        }
        Ok(interface)
    }

    fn insert(&mut self, function: Function) {
        let mut key = function.name.clone();
        let mut n = 0;
        while self.methods.contains_key(&key) {
            key = format!("{}{}", function.name, n);
            n += 1;
        }
        self.methods.insert(key, function);
    }

    /// Look up a method
    pub fn method(&self, name: &str) -> Option<&Function> {
        self.methods.get(name)
    }

    /// All methods
    pub fn methods(&self) -> impl Iterator<Item = (&str, &Function)> {
        self.methods.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Constructor inputs, empty if none are declared
    pub fn constructor_inputs(&self) -> &[Param] {
        &self.constructor
    }

    fn require_method(&self, name: &str) -> Result<&Function, SdkError> {
        if name.is_empty() {
            return Err(SdkError::InvalidParam("method name must not be empty".to_string()));
        }
        self.method(name)
            .ok_or_else(|| SdkError::InvalidParam(format!("method is not found: {}", name)))
    }

    /// Selector plus coerced, packed arguments for `method`
    pub fn encode_call(&self, method: &str, args: Vec<ArgValue>) -> Result<Vec<u8>, SdkError> {
        let function = self.require_method(method)?;
        let types = function.input_types();
        let tokens = coerce_arguments(&types, args)?;
        encode_function_call(function.selector(), &types, &tokens).map_err(as_invalid_param)
    }

    /// Packed constructor arguments, appended after bytecode on deployment
    pub fn encode_constructor(&self, args: Vec<ArgValue>) -> Result<Vec<u8>, SdkError> {
        let types: Vec<ParamType> = self.constructor.iter().map(|p| p.kind.clone()).collect();
        let tokens = coerce_arguments(&types, args)?;
        encode_params(&types, &tokens).map_err(as_invalid_param)
    }

    /// Decode return data of `method`
    pub fn decode_output(&self, method: &str, data: &[u8]) -> Result<Vec<Token>, SdkError> {
        let function = self.require_method(method)?;
        decode(&function.output_types(), data)
    }
}

fn as_invalid_param(e: SdkError) -> SdkError {
    match e {
        SdkError::AbiEncode(msg) => SdkError::InvalidParam(format!("failed to pack args: {}", msg)),
        other => other,
    }
}

#[derive(Deserialize)]
struct AbiEntry {
    #[serde(rename = "type", default = "default_entry_kind")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<AbiParam>,
    #[serde(default)]
    outputs: Vec<AbiParam>,
    #[serde(rename = "stateMutability", default)]
    state_mutability: Option<String>,
    #[serde(default)]
    constant: bool,
}

fn default_entry_kind() -> String {
    "function".to_string()
}

#[derive(Deserialize)]
struct AbiParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    components: Vec<AbiParam>,
}

fn params(raw: &[AbiParam]) -> Result<Vec<Param>, SdkError> {
    raw.iter()
        .map(|p| {
            Ok(Param {
                name: p.name.clone(),
                kind: param_type(p)?,
            })
        })
        .collect()
}

/// `tuple` types spell their members out in `components`
fn param_type(p: &AbiParam) -> Result<ParamType, SdkError> {
    let kind = match p.kind.strip_prefix("tuple") {
        Some(suffix) => {
            let members = p
                .components
                .iter()
                .map(param_type)
                .collect::<Result<Vec<_>, _>>()?;
            format!("{}{}", ParamType::Tuple(members), suffix)
        }
        None => p.kind.clone(),
    };
    parse_type(&kind).map_err(as_invalid_param)
}

/// Programmatic [`ContractInterface`] construction
#[derive(Debug, Default)]
pub struct InterfaceBuilder {
    interface: ContractInterface,
}

impl InterfaceBuilder {
    /// Add a state-changing method
    pub fn function(self, name: &str, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        self.add(name, inputs, outputs, false)
    }

    /// Add a `view` method
    pub fn view(self, name: &str, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        self.add(name, inputs, outputs, true)
    }

    fn add(
        mut self,
        name: &str,
        inputs: Vec<ParamType>,
        outputs: Vec<ParamType>,
        read_only: bool,
    ) -> Self {
        self.interface.insert(Function {
            name: name.to_string(),
            inputs: inputs.into_iter().map(Param::unnamed).collect(),
            outputs: outputs.into_iter().map(Param::unnamed).collect(),
            read_only,
        });
        self
    }

    /// Declare constructor inputs
    pub fn constructor(mut self, inputs: Vec<ParamType>) -> Self {
        self.interface.constructor = inputs.into_iter().map(Param::unnamed).collect();
        self
    }

    /// Finish
    pub fn build(self) -> ContractInterface {
        self.interface
    }
}

/// Standard fungible token (XRC20) interface
pub fn xrc20() -> ContractInterface {
    use ParamType::{Address, Bool, String, Uint};

    ContractInterface::builder()
        .view("name", vec![], vec![String])
        .view("symbol", vec![], vec![String])
        .view("decimals", vec![], vec![Uint(8)])
        .view("totalSupply", vec![], vec![Uint(256)])
        .view("balanceOf", vec![Address], vec![Uint(256)])
        .view("allowance", vec![Address, Address], vec![Uint(256)])
        .function("transfer", vec![Address, Uint(256)], vec![Bool])
        .function("approve", vec![Address, Uint(256)], vec![Bool])
        .function("transferFrom", vec![Address, Address, Uint(256)], vec![Bool])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use antenna_primitives::{Address, U256};

    const HOLDER: &str = "io187wzp08vnhjjpkydnr97qlh8kh0dpkkytfam8j";

    const ABI_JSON: &str = r#"[
        {"type":"constructor","inputs":[{"name":"supply","type":"uint256"}],"stateMutability":"nonpayable"},
        {"type":"function","name":"balanceOf","inputs":[{"name":"who","type":"address"}],
         "outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"},
        {"type":"function","name":"multiSend","inputs":[{"name":"to","type":"address[]"},{"name":"amount","type":"uint256"}],
         "outputs":[],"stateMutability":"nonpayable"},
        {"type":"function","name":"submit","inputs":[{"name":"order","type":"tuple[]","components":[
            {"name":"maker","type":"address"},{"name":"size","type":"uint64"}]}],"outputs":[]},
        {"type":"event","name":"Transfer","inputs":[{"name":"from","type":"address","indexed":true}],"anonymous":false},
        {"name":"legacy","constant":true,"inputs":[],"outputs":[{"name":"","type":"bool"}]}
    ]"#;

    #[test]
    fn test_from_json() {
        let abi = ContractInterface::from_json(ABI_JSON).unwrap();
        assert_eq!(abi.methods().count(), 4);
        assert!(abi.method("Transfer").is_none());

        let balance_of = abi.method("balanceOf").unwrap();
        assert!(balance_of.read_only);
        assert_eq!(balance_of.signature(), "balanceOf(address)");
        assert_eq!(balance_of.selector(), [0x70, 0xa0, 0x82, 0x31]);

        assert_eq!(
            abi.method("submit").unwrap().signature(),
            "submit((address,uint64)[])"
        );
        assert!(abi.method("legacy").unwrap().read_only);
        assert!(!abi.method("multiSend").unwrap().read_only);
        assert_eq!(abi.constructor_inputs()[0].kind, ParamType::Uint(256));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            ContractInterface::from_json("{not json"),
            Err(SdkError::InvalidParam(_))
        ));
        let bad_type = r#"[{"type":"function","name":"f","inputs":[{"type":"uint7"}]}]"#;
        assert!(matches!(
            ContractInterface::from_json(bad_type),
            Err(SdkError::InvalidParam(_))
        ));
    }

    #[test]
    fn test_overloads_are_suffixed() {
        let abi = ContractInterface::builder()
            .function("f", vec![ParamType::Uint(256)], vec![])
            .function("f", vec![ParamType::Bool], vec![])
            .function("f", vec![], vec![])
            .build();
        assert_eq!(abi.method("f").unwrap().signature(), "f(uint256)");
        assert_eq!(abi.method("f0").unwrap().signature(), "f(bool)");
        assert_eq!(abi.method("f1").unwrap().signature(), "f()");
    }

    #[test]
    fn test_encode_call_coerces_addresses() {
        let abi = xrc20();
        let data = abi
            .encode_call("transfer", vec![HOLDER.into(), U256::from(1000).into()])
            .unwrap();
        assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(data.len(), 68);
        let holder: Address = HOLDER.parse().unwrap();
        assert_eq!(&data[16..36], holder.as_bytes());
    }

    #[test]
    fn test_encode_call_errors() {
        let abi = xrc20();
        assert!(matches!(abi.encode_call("", vec![]), Err(SdkError::InvalidParam(_))));
        assert!(matches!(abi.encode_call("mint", vec![]), Err(SdkError::InvalidParam(_))));
        assert!(matches!(
            abi.encode_call("transfer", vec![HOLDER.into()]),
            Err(SdkError::InvalidParam(_))
        ));
        // right arity, wrong value type for uint256
        assert!(matches!(
            abi.encode_call("transfer", vec![HOLDER.into(), true.into()]),
            Err(SdkError::InvalidParam(_))
        ));
    }

    #[test]
    fn test_encode_constructor() {
        let abi = ContractInterface::from_json(ABI_JSON).unwrap();
        let packed = abi.encode_constructor(vec![U256::from(5).into()]).unwrap();
        assert_eq!(packed.len(), 32);
        assert_eq!(packed[31], 5);
        assert!(abi.encode_constructor(vec![]).is_err());
    }

    #[test]
    fn test_decode_output() {
        let abi = xrc20();
        let mut data = [0u8; 32];
        data[31] = 100;
        let tokens = abi.decode_output("balanceOf", &data).unwrap();
        assert_eq!(tokens, vec![Token::Uint(U256::from(100))]);
        assert!(abi.decode_output("nope", &data).is_err());
    }
}
