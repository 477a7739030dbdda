use alloy_primitives::{Address, TxHash};
use alloy_rpc_types::TransactionRequest;
use tracing::{debug, info};

use super::ChainGateway;
use crate::types::{
    SeederError, TxOutcome,
    fillers::{FillStack, FillWrapper, NonceLeaseFiller, SenderFiller, TxFiller},
};

/// Transaction submission for one signer. Every request is filled (sender,
/// nonce lease) before it reaches the gateway.
pub trait SignerApi {
    type Gateway: ChainGateway;

    fn gateway(&self) -> &Self::Gateway;

    fn signer_address(&self) -> Address {
        self.gateway().signer_address()
    }

    async fn fill(&self, tx: &mut TransactionRequest) -> Result<(), SeederError>;

    /// Submits through the gateway's generic write path.
    async fn submit(&self, mut tx: TransactionRequest) -> Result<TxHash, SeederError> {
        self.fill(&mut tx).await?;
        let nonce = tx.nonce;

        let hash = self.gateway().send_transaction(tx).await?;
        info!(target: "pool_seeder::tx", ?hash, ?nonce, "submitted transaction");
        Ok(hash)
    }

    /// Prepares, signs locally and submits the raw bytes. Used for calldata
    /// encoded outside the local bindings.
    async fn submit_raw(&self, mut tx: TransactionRequest) -> Result<TxHash, SeederError> {
        self.fill(&mut tx).await?;

        let prepared = self.gateway().prepare_transaction_request(tx).await?;
        let nonce = prepared.nonce;
        let signed = self.gateway().sign_transaction(prepared).await?;
        debug!(target: "pool_seeder::tx", bytes = signed.len(), "signed raw transaction");

        let hash = self.gateway().send_raw_transaction(signed).await?;
        info!(target: "pool_seeder::tx", ?hash, ?nonce, "submitted raw transaction");
        Ok(hash)
    }

    /// Waits for the receipt, a reverted transaction is an error.
    async fn confirm(&self, hash: TxHash) -> Result<TxOutcome, SeederError> {
        let outcome = self.gateway().wait_for_transaction_receipt(hash).await?;
        if !outcome.success {
            return Err(SeederError::Reverted(hash));
        }

        debug!(target: "pool_seeder::tx", ?hash, logs = outcome.logs.len(), "confirmed transaction");
        Ok(outcome)
    }
}

pub struct SignerSession<G, F = ()> {
    gateway: G,
    filler: F,
}

impl<G: ChainGateway> SignerSession<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway, filler: () }
    }
}

impl<G, F> SignerSession<G, F>
where
    G: ChainGateway,
    F: FillWrapper,
{
    pub fn with_filler<F1: TxFiller>(self, filler: F1) -> SignerSession<G, FillStack<F, F1>> {
        SignerSession { gateway: self.gateway, filler: self.filler.wrap_with_filler(filler) }
    }

    pub fn with_sender_filler(self) -> SignerSession<G, FillStack<F, SenderFiller>> {
        self.with_filler(SenderFiller)
    }

    pub fn with_nonce_lease_filler(self) -> SignerSession<G, FillStack<F, NonceLeaseFiller>> {
        self.with_filler(NonceLeaseFiller::new())
    }

    pub fn with_all_fillers(
        self,
    ) -> SignerSession<G, FillStack<FillStack<F, SenderFiller>, NonceLeaseFiller>> {
        SignerSession {
            gateway: self.gateway,
            filler: self
                .filler
                .wrap_with_filler(SenderFiller)
                .wrap_with_filler(NonceLeaseFiller::new()),
        }
    }
}

impl<G, F> SignerApi for SignerSession<G, F>
where
    G: ChainGateway,
    F: TxFiller,
{
    type Gateway = G;

    fn gateway(&self) -> &G {
        &self.gateway
    }

    async fn fill(&self, tx: &mut TransactionRequest) -> Result<(), SeederError> {
        self.filler.fill(&self.gateway, tx).await
    }
}
