use alloy_primitives::{Address, TxHash, U256, aliases::U24};
use tracing::{debug, info};

use super::utils::call_request;
use crate::{
    builders::PoolMath,
    providers::{ChainGateway, SignerApi},
    types::{
        PoolState, PriceRatio, SeederError, TxOutcome,
        contract_bindings::{IUniswapV3Factory, IUniswapV3Pool},
        sort_tokens,
    },
};

pub trait PoolApi: SignerApi {
    /// Creates the fee-tier pool for the pair. Tokens are sorted before the
    /// call, so argument order does not matter.
    async fn create_pool(
        &self,
        factory: Address,
        token_a: Address,
        token_b: Address,
        fee: u32,
    ) -> Result<Address, SeederError> {
        let (token0, token1) = sort_tokens(token_a, token_b);

        let call = IUniswapV3Factory::createPoolCall { tokenA: token0, tokenB: token1, fee: U24::from(fee) };
        let hash = self.submit(call_request(factory, call)).await?;
        let outcome = self.confirm(hash).await?;

        let pool = resolve_pool_address(&outcome)?;
        info!(target: "pool_seeder::pool", ?pool, ?token0, ?token1, fee, "created pool");

        Ok(pool)
    }

    /// Sets the starting price, `ratio` is `amount1 / amount0` in canonical
    /// order.
    async fn initialize_pool<M: PoolMath>(
        &self,
        math: &M,
        pool: Address,
        token_a: Address,
        token_b: Address,
        ratio: PriceRatio,
    ) -> Result<TxHash, SeederError> {
        let (token0, token1) = sort_tokens(token_a, token_b);
        let sqrt_price_x96 = math.encode_sqrt_ratio_x96(ratio)?;
        debug!(target: "pool_seeder::pool", ?token0, ?token1, %sqrt_price_x96, "initializing pool");

        let call = IUniswapV3Pool::initializeCall { sqrtPriceX96: sqrt_price_x96.to() };
        let hash = self.submit(call_request(pool, call)).await?;
        self.confirm(hash).await?;

        info!(target: "pool_seeder::pool", ?pool, ?hash, "initialized pool");
        Ok(hash)
    }

    /// Live pool state, read from the chain on every call.
    async fn read_pool_state(&self, pool: Address) -> Result<PoolState, SeederError> {
        let gateway = self.gateway();

        let slot0 = gateway.read_contract(pool, IUniswapV3Pool::slot0Call {}).await?;
        let liquidity = gateway.read_contract(pool, IUniswapV3Pool::liquidityCall {}).await?;
        let tick_spacing = gateway.read_contract(pool, IUniswapV3Pool::tickSpacingCall {}).await?;
        let fee = gateway.read_contract(pool, IUniswapV3Pool::feeCall {}).await?;
        let token0 = gateway.read_contract(pool, IUniswapV3Pool::token0Call {}).await?;
        let token1 = gateway.read_contract(pool, IUniswapV3Pool::token1Call {}).await?;

        let state = PoolState {
            address: pool,
            token0,
            token1,
            fee: fee.to(),
            tick_spacing: tick_spacing.as_i32(),
            tick: slot0.tick.as_i32(),
            sqrt_price_x96: U256::from(slot0.sqrtPriceX96),
            liquidity,
        };
        debug!(target: "pool_seeder::pool", ?state, "read pool state");

        Ok(state)
    }
}

impl<T: SignerApi> PoolApi for T {}

/// Pool address from a `createPool` receipt: the receipt's contract address
/// if set, otherwise the last 20 bytes of the first log's data.
pub fn resolve_pool_address(outcome: &TxOutcome) -> Result<Address, SeederError> {
    if let Some(address) = outcome.contract_address {
        return Ok(address);
    }

    let log = outcome.logs.first().ok_or_else(|| {
        SeederError::PoolResolution(format!("receipt of {:?} has no contract address or logs", outcome.tx_hash))
    })?;

    let data = log.data.data.as_ref();
    if data.len() < 20 {
        return Err(SeederError::PoolResolution(format!(
            "first log of {:?} carries {} bytes of data",
            outcome.tx_hash,
            data.len()
        )));
    }

    Ok(Address::from_slice(&data[data.len() - 20..]))
}
