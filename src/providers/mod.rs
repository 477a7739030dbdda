mod backend;
pub use backend::*;

mod session;
pub use session::*;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_rpc_types::TransactionRequest;
use alloy_sol_types::SolCall;

use crate::types::{SeederError, TxOutcome};

/// Chain access used by the workflow: submission, reads and receipts.
///
/// A create-kind request passed to [`ChainGateway::send_transaction`] is a
/// contract deployment, a call-kind request is a contract write.
pub trait ChainGateway {
    fn signer_address(&self) -> Address;

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, SeederError>;

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, SeederError>;

    async fn read_contract<IC>(&self, contract: Address, call: IC) -> Result<IC::Return, SeederError>
    where
        IC: SolCall + Send,
    {
        let data = self.call(contract, call.abi_encode().into()).await?;
        Ok(IC::abi_decode_returns(&data)?)
    }

    /// Blocks until the transaction is mined.
    async fn wait_for_transaction_receipt(&self, hash: TxHash) -> Result<TxOutcome, SeederError>;

    async fn get_balance(&self, address: Address) -> Result<U256, SeederError>;

    async fn get_transaction_count(&self, address: Address) -> Result<u64, SeederError>;

    /// Fills chain id, gas and fee fields left empty on `tx`.
    async fn prepare_transaction_request(
        &self,
        tx: TransactionRequest,
    ) -> Result<TransactionRequest, SeederError>;

    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes, SeederError>;

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash, SeederError>;
}
