use alloy_eips::eip2718::Encodable2718;
use alloy_network::{Ethereum, EthereumWallet, NetworkWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash, TxKind, U256};
use alloy_provider::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy_rpc_types::{TransactionInput, TransactionRequest};
use alloy_signer_local::PrivateKeySigner;
use tracing::debug;

use super::ChainGateway;
use crate::types::{SeederError, TxOutcome};

/// [`ChainGateway`] over an alloy provider that signs with a local wallet.
#[derive(Clone)]
pub struct AlloyGateway<P = DynProvider>
where
    P: Provider,
{
    eth_provider: P,
    wallet: EthereumWallet,
    signer: Address,
}

impl AlloyGateway<DynProvider> {
    /// Connects to `url` (http, ws or ipc, picked from the scheme) with a
    /// wallet that signs every request as `signer`.
    pub async fn connect(url: &str, signer: PrivateKeySigner) -> Result<Self, SeederError> {
        let address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let eth_provider = ProviderBuilder::new()
            .wallet(wallet.clone())
            .connect(url)
            .await?
            .erased();

        Ok(Self { eth_provider, wallet, signer: address })
    }
}

impl<P: Provider> AlloyGateway<P> {
    /// `eth_provider` must be able to sign for `wallet`'s default signer when
    /// sending through [`ChainGateway::send_transaction`].
    pub fn new_with_provider(eth_provider: P, wallet: EthereumWallet) -> Self {
        let signer = NetworkWallet::<Ethereum>::default_signer_address(&wallet);
        Self { eth_provider, wallet, signer }
    }

    pub fn eth_provider(&self) -> &P {
        &self.eth_provider
    }
}

impl<P: Provider> ChainGateway for AlloyGateway<P> {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<TxHash, SeederError> {
        let pending = self.eth_provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, SeederError> {
        let tx = TransactionRequest {
            to: Some(TxKind::Call(to)),
            input: TransactionInput::both(data),
            ..Default::default()
        };

        Ok(self.eth_provider.call(tx).await?)
    }

    async fn wait_for_transaction_receipt(&self, hash: TxHash) -> Result<TxOutcome, SeederError> {
        let receipt = PendingTransactionBuilder::new(self.eth_provider.root().clone(), hash)
            .get_receipt()
            .await?;

        Ok(TxOutcome {
            tx_hash: receipt.transaction_hash,
            success: receipt.status(),
            contract_address: receipt.contract_address,
            logs: receipt
                .inner
                .logs()
                .iter()
                .map(|log| log.inner.clone())
                .collect(),
        })
    }

    async fn get_balance(&self, address: Address) -> Result<U256, SeederError> {
        Ok(self.eth_provider.get_balance(address).await?)
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64, SeederError> {
        Ok(self.eth_provider.get_transaction_count(address).await?)
    }

    async fn prepare_transaction_request(
        &self,
        mut tx: TransactionRequest,
    ) -> Result<TransactionRequest, SeederError> {
        let from = tx.from.unwrap_or(self.signer);
        tx.from = Some(from);

        if tx.chain_id.is_none() {
            tx.chain_id = Some(self.eth_provider.get_chain_id().await?);
        }
        if tx.nonce.is_none() {
            tx.nonce = Some(self.eth_provider.get_transaction_count(from).await?);
        }
        if tx.gas.is_none() {
            tx.gas = Some(self.eth_provider.estimate_gas(tx.clone()).await?);
        }
        if tx.max_fee_per_gas.is_none() || tx.max_priority_fee_per_gas.is_none() {
            let fees = self.eth_provider.estimate_eip1559_fees().await?;
            tx.max_fee_per_gas = Some(fees.max_fee_per_gas);
            tx.max_priority_fee_per_gas = Some(fees.max_priority_fee_per_gas);
        }

        debug!(
            target: "pool_seeder::gateway",
            nonce = ?tx.nonce,
            gas = ?tx.gas,
            max_fee_per_gas = ?tx.max_fee_per_gas,
            "prepared transaction request"
        );
        Ok(tx)
    }

    async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes, SeederError> {
        let envelope = tx.build(&self.wallet).await?;
        Ok(envelope.encoded_2718().into())
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<TxHash, SeederError> {
        let pending = self.eth_provider.send_raw_transaction(&raw).await?;
        Ok(*pending.tx_hash())
    }
}
