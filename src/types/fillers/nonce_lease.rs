use alloy_rpc_types::TransactionRequest;
use parking_lot::Mutex;
use tracing::debug;

use super::{FillFrom, TxFiller};
use crate::{providers::ChainGateway, types::SeederError};

/// Owns the signer's nonce cursor for one session.
///
/// Each lease reads the signer's current transaction count and hands out the
/// larger of that count and the next locally issued nonce.
#[derive(Debug, Default)]
pub struct NonceLeaseFiller {
    next: Mutex<Option<u64>>,
}

impl NonceLeaseFiller {
    pub fn new() -> Self {
        Self::default()
    }

    async fn lease<G: ChainGateway>(
        &self,
        gateway: &G,
        tx: &TransactionRequest,
    ) -> Result<u64, SeederError> {
        let sender = tx.from.unwrap_or_else(|| gateway.signer_address());
        let on_chain = gateway.get_transaction_count(sender).await?;

        let mut next = self.next.lock();
        let nonce = next.map_or(on_chain, |local| local.max(on_chain));
        *next = Some(nonce + 1);

        debug!(target: "pool_seeder::nonce", %sender, on_chain, nonce, "leased nonce");
        Ok(nonce)
    }
}

impl TxFiller for NonceLeaseFiller {
    type FillOutput = Option<u64>;

    async fn prepare<G: ChainGateway>(
        &self,
        gateway: &G,
        tx: &TransactionRequest,
    ) -> Result<Self::FillOutput, SeederError> {
        if tx.nonce.is_some() {
            return Ok(None);
        }

        Ok(Some(self.lease(gateway, tx).await?))
    }
}

impl FillFrom<NonceLeaseFiller> for Option<u64> {
    fn prepare_with(self, tx: &mut TransactionRequest) -> Result<(), SeederError> {
        if let Some(nonce) = self {
            tx.nonce = Some(nonce);
        }

        Ok(())
    }
}
