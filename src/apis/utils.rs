use std::path::Path;

use alloy_json_abi::ContractObject;
use alloy_primitives::{Address, Bytes, TxKind, U256};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;

use crate::types::{MethodParameters, SeederError};

pub(crate) fn call_request<IC: SolCall>(contract: Address, call: IC) -> TransactionRequest {
    TransactionRequest {
        to: Some(TxKind::Call(contract)),
        input: TransactionInput::both(call.abi_encode().into()),
        ..Default::default()
    }
}

/// Request carrying calldata that was encoded outside the local bindings.
pub(crate) fn encoded_call_request(contract: Address, params: MethodParameters) -> TransactionRequest {
    TransactionRequest {
        to: Some(TxKind::Call(contract)),
        input: TransactionInput::both(params.calldata),
        value: Some(params.value),
        ..Default::default()
    }
}

/// Contract creation request, `init_code` is creation bytecode followed by the
/// abi encoded constructor arguments.
pub(crate) fn deploy_request(init_code: Bytes) -> TransactionRequest {
    TransactionRequest {
        to: Some(TxKind::Create),
        input: TransactionInput::both(init_code),
        value: Some(U256::ZERO),
        ..Default::default()
    }
}

/// Reads the creation bytecode from a Foundry or Hardhat artifact.
pub fn load_creation_code(path: impl AsRef<Path>) -> Result<Bytes, SeederError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;

    let artifact: ContractObject = serde_json::from_str(&raw)
        .map_err(|e| SeederError::Artifact(format!("{}: {e}", path.display())))?;

    artifact
        .bytecode
        .filter(|code| !code.is_empty())
        .ok_or_else(|| SeederError::Artifact(format!("{} has no creation bytecode", path.display())))
}
