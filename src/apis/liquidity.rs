use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, TxHash, U256};
use tracing::{debug, info};

use super::utils::encoded_call_request;
use crate::{
    builders::PoolMath,
    providers::SignerApi,
    types::{PoolState, Position, SeederError, SlippageTolerance},
};

pub trait LiquidityApi: SignerApi {
    /// Symmetric position `width` tick spacings either side of the usable
    /// tick nearest the pool's live tick.
    fn build_position<M: PoolMath>(
        &self,
        math: &M,
        pool: PoolState,
        liquidity: u128,
        width: i32,
    ) -> Result<Position, SeederError> {
        let (tick_lower, tick_upper) = math.compute_tick_range(pool.tick, pool.tick_spacing, width)?;
        debug!(target: "pool_seeder::liquidity", tick = pool.tick, tick_lower, tick_upper, "built position");

        Ok(Position { pool, liquidity, tick_lower, tick_upper })
    }

    /// Mints `position` to `recipient`. The calldata comes from the pool math
    /// encoder, so it goes out as a locally signed raw transaction.
    async fn mint_liquidity<M: PoolMath>(
        &self,
        math: &M,
        position_manager: Address,
        position: &Position,
        recipient: Address,
        deadline_window: Duration,
        slippage: &SlippageTolerance,
    ) -> Result<TxHash, SeederError> {
        let deadline = deadline_from_now(deadline_window)?;
        let params = math.encode_mint_call(position, recipient, deadline, slippage)?;

        let hash = self
            .submit_raw(encoded_call_request(position_manager, params))
            .await?;
        self.confirm(hash).await?;

        info!(
            target: "pool_seeder::liquidity",
            pool = ?position.pool.address,
            liquidity = position.liquidity,
            ?hash,
            "minted position"
        );
        Ok(hash)
    }
}

impl<T: SignerApi> LiquidityApi for T {}

/// Unix timestamp `window` from now.
pub(crate) fn deadline_from_now(window: Duration) -> Result<U256, SeederError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| SeederError::Config(format!("system clock is before the unix epoch: {e}")))?;

    Ok(U256::from((now + window).as_secs()))
}
