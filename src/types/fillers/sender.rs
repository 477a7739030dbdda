use alloy_primitives::Address;
use alloy_rpc_types::TransactionRequest;

use super::{FillFrom, TxFiller};
use crate::{providers::ChainGateway, types::SeederError};

/// Sets `from` to the gateway's signer when the request has none.
#[derive(Clone, Copy, Debug, Default)]
pub struct SenderFiller;

impl TxFiller for SenderFiller {
    type FillOutput = Option<Address>;

    async fn prepare<G: ChainGateway>(
        &self,
        gateway: &G,
        tx: &TransactionRequest,
    ) -> Result<Self::FillOutput, SeederError> {
        Ok(tx.from.is_none().then(|| gateway.signer_address()))
    }
}

impl FillFrom<SenderFiller> for Option<Address> {
    fn prepare_with(self, tx: &mut TransactionRequest) -> Result<(), SeederError> {
        if let Some(from) = self {
            tx.from = Some(from);
        }

        Ok(())
    }
}
