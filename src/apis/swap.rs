use alloy_primitives::{Address, TxHash, U256, aliases::U24};
use tracing::{debug, info};

use super::utils::call_request;
use crate::{
    builders::PoolMath,
    providers::{ChainGateway, SignerApi},
    types::{SeederError, SwapRoute, SwapSafety, contract_bindings::ISwapRouter02},
};

pub trait SwapApi: SignerApi {
    /// Simulated quote through the quoter. Reads the first return word as the
    /// quoted amount.
    async fn quote_exact_input<M: PoolMath>(
        &self,
        math: &M,
        quoter: Address,
        route: &SwapRoute,
        amount_in: U256,
    ) -> Result<U256, SeederError> {
        let data = self
            .gateway()
            .call(quoter, math.encode_quote_call(route, amount_in))
            .await?;

        let word = data.get(..32).ok_or_else(|| {
            SeederError::Quote(format!("quoter returned {} bytes for {:?}", data.len(), route.pool))
        })?;
        let quoted = U256::from_be_slice(word);

        debug!(target: "pool_seeder::swap", %amount_in, %quoted, "quoted swap");
        Ok(quoted)
    }

    /// Exact-input single-pool swap paid to the signer. A failed submission
    /// or a reverted receipt is a swap error.
    async fn execute_swap(
        &self,
        router: Address,
        route: &SwapRoute,
        amount_in: U256,
        safety: SwapSafety,
    ) -> Result<TxHash, SeederError> {
        let call = ISwapRouter02::exactInputSingleCall {
            params: ISwapRouter02::ExactInputSingleParams {
                tokenIn: route.token_in,
                tokenOut: route.token_out,
                fee: U24::from(route.fee),
                recipient: self.signer_address(),
                amountIn: amount_in,
                amountOutMinimum: safety.amount_out_minimum,
                sqrtPriceLimitX96: safety.sqrt_price_limit_x96,
            },
        };

        let swap = async {
            let hash = self.submit_raw(call_request(router, call)).await?;
            self.confirm(hash).await
        };
        let outcome = swap.await.map_err(|e| SeederError::Swap(e.to_string()))?;

        info!(target: "pool_seeder::swap", hash = ?outcome.tx_hash, %amount_in, "executed swap");
        Ok(outcome.tx_hash)
    }
}

impl<T: SignerApi> SwapApi for T {}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, address, aliases::U160};

    use super::*;
    use crate::{
        builders::UniswapV3Math,
        providers::SignerSession,
        test_utils::{MOCK_POOL, MockGateway},
    };

    const QUOTER: Address = address!("00000000000000000000000000000000000000f3");
    const ROUTER: Address = address!("00000000000000000000000000000000000000f1");

    fn route() -> SwapRoute {
        SwapRoute {
            pool: MOCK_POOL,
            token_in: address!("00000000000000000000000000000000000000a2"),
            token_out: address!("00000000000000000000000000000000000000a1"),
            fee: 500,
        }
    }

    #[tokio::test]
    async fn test_quote_decodes_first_word() {
        let gateway = MockGateway::new();
        gateway.set_quote(U256::from(987_654_321u64));
        let session = SignerSession::new(gateway);

        let quoted = session
            .quote_exact_input(&UniswapV3Math, QUOTER, &route(), U256::from(1u8))
            .await
            .unwrap();
        assert_eq!(quoted, U256::from(987_654_321u64));
    }

    #[tokio::test]
    async fn test_quote_without_data() {
        let gateway = MockGateway::new();
        gateway.set_quote_data(Bytes::new());
        let session = SignerSession::new(gateway);

        let err = session
            .quote_exact_input(&UniswapV3Math, QUOTER, &route(), U256::from(1u8))
            .await
            .unwrap_err();
        assert!(matches!(err, SeederError::Quote(_)));
    }

    #[tokio::test]
    async fn test_swap_carries_safety_bounds() {
        let session = SignerSession::new(MockGateway::new()).with_all_fillers();
        let safety = SwapSafety {
            amount_out_minimum: U256::from(5u8),
            sqrt_price_limit_x96: U160::from(9u8),
        };

        session.execute_swap(ROUTER, &route(), U256::from(100u8), safety).await.unwrap();

        let swaps = session.gateway().sent_calls::<ISwapRouter02::exactInputSingleCall>();
        assert_eq!(swaps.len(), 1);
        let params = &swaps[0].params;
        assert_eq!(params.tokenIn, route().token_in);
        assert_eq!(params.tokenOut, route().token_out);
        assert_eq!(params.recipient, session.signer_address());
        assert_eq!(params.amountIn, U256::from(100u8));
        assert_eq!(params.amountOutMinimum, U256::from(5u8));
        assert_eq!(params.sqrtPriceLimitX96, U160::from(9u8));
    }

    #[tokio::test]
    async fn test_reverted_swap_is_swap_error() {
        let gateway = MockGateway::new();
        gateway.revert_raw_transactions();
        let session = SignerSession::new(gateway).with_all_fillers();

        let err = session
            .execute_swap(ROUTER, &route(), U256::from(100u8), SwapSafety::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SeederError::Swap(_)));
    }
}
