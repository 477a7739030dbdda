use alloy::transports::TransportErrorKind;
use alloy_json_rpc::RpcError;
use alloy_network::{Ethereum, TransactionBuilderError};
use alloy_primitives::{Address, TxHash};
use alloy_provider::PendingTransactionError;

#[derive(Debug, thiserror::Error)]
pub enum SeederError {
    #[error("config error: {0}")]
    Config(String),
    #[error("insufficient funds - signer {0:?} has a zero balance")]
    InsufficientFunds(Address),
    #[error("deployment error - receipt of {0:?} has no contract address")]
    Deployment(TxHash),
    #[error("pool resolution error: {0}")]
    PoolResolution(String),
    #[error("quote error: {0}")]
    Quote(String),
    #[error("swap error: {0}")]
    Swap(String),
    #[error("chain rpc error: {0:?}")]
    ChainRpc(#[from] RpcError<TransportErrorKind>),
    #[error("chain rpc error - transaction {0:?} reverted")]
    Reverted(TxHash),
    #[error("pending transaction error: {0:?}")]
    PendingTransaction(#[from] PendingTransactionError),
    #[error("transaction build error: {0:?}")]
    TransactionBuild(#[from] TransactionBuilderError<Ethereum>),
    #[error("signer error: {0:?}")]
    Signer(#[from] alloy_signer::Error),
    #[error("abi decoding error: {0:?}")]
    AbiDecode(#[from] alloy_sol_types::Error),
    #[error("pool math error: {0}")]
    Math(String),
    #[error("artifact error: {0}")]
    Artifact(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Deser(#[from] serde_json::Error),
}

impl SeederError {
    /// Every gateway failure, including a reverted receipt.
    pub fn is_chain_rpc(&self) -> bool {
        matches!(
            self,
            Self::ChainRpc(_)
                | Self::Reverted(_)
                | Self::PendingTransaction(_)
                | Self::TransactionBuild(_)
        )
    }
}
