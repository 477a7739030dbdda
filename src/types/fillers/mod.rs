mod nonce_lease;
pub use nonce_lease::*;

mod sender;
pub use sender::*;

use alloy_rpc_types::TransactionRequest;

use crate::{providers::ChainGateway, types::SeederError};

/// Completes a transaction request right before it is submitted.
pub trait TxFiller: Sized {
    type FillOutput: FillFrom<Self>;

    async fn fill<G: ChainGateway>(
        &self,
        gateway: &G,
        tx: &mut TransactionRequest,
    ) -> Result<(), SeederError> {
        let input = self.prepare(gateway, tx).await?;
        input.prepare_with(tx)?;
        Ok(())
    }

    async fn prepare<G: ChainGateway>(
        &self,
        gateway: &G,
        tx: &TransactionRequest,
    ) -> Result<Self::FillOutput, SeederError>;
}

impl TxFiller for () {
    type FillOutput = ();

    async fn prepare<G: ChainGateway>(
        &self,
        _: &G,
        _: &TransactionRequest,
    ) -> Result<(), SeederError> {
        Ok(())
    }
}

pub trait FillFrom<F> {
    fn prepare_with(self, tx: &mut TransactionRequest) -> Result<(), SeederError>;
}

impl<F> FillFrom<F> for () {
    fn prepare_with(self, _: &mut TransactionRequest) -> Result<(), SeederError> {
        Ok(())
    }
}

pub trait FillWrapper: TxFiller {
    fn wrap_with_filler<F: TxFiller>(self, filler: F) -> FillStack<Self, F>;
}

impl FillWrapper for () {
    fn wrap_with_filler<F: TxFiller>(self, filler: F) -> FillStack<Self, F> {
        FillStack::new(self, filler)
    }
}

/// Runs `left` then `right` over the same request.
#[derive(Debug, Clone)]
pub struct FillStack<L, R> {
    left: L,
    right: R,
}

impl<L, R> FillStack<L, R> {
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }
}

impl<L, R> TxFiller for FillStack<L, R>
where
    L: TxFiller,
    R: TxFiller,
{
    type FillOutput = ();

    async fn fill<G: ChainGateway>(
        &self,
        gateway: &G,
        tx: &mut TransactionRequest,
    ) -> Result<(), SeederError> {
        self.left.fill(gateway, tx).await?;
        self.right.fill(gateway, tx).await?;

        Ok(())
    }

    async fn prepare<G: ChainGateway>(
        &self,
        _: &G,
        _: &TransactionRequest,
    ) -> Result<(), SeederError> {
        Ok(())
    }
}

impl<L, R> FillWrapper for FillStack<L, R>
where
    L: TxFiller,
    R: TxFiller,
{
    fn wrap_with_filler<F: TxFiller>(self, filler: F) -> FillStack<Self, F> {
        FillStack::new(self, filler)
    }
}
