//! Pool math capability
//!
//! The workflow only talks to [`PoolMath`]; the tick, price and amount math
//! plus call encoding live behind it. [`UniswapV3Math`] implements it with
//! `uniswap_v3_math` and the local periphery bindings.

use alloy_primitives::{
    Address, Bytes, U256, U512,
    aliases::{I24, U24, U160},
};
use alloy_sol_types::SolCall;
use uniswap_v3_math::{
    full_math::mul_div,
    tick_math::{MAX_TICK, MIN_TICK, get_sqrt_ratio_at_tick},
};

use crate::types::{
    MethodParameters, Position, PriceRatio, SeederError, SlippageTolerance, SwapRoute,
    contract_bindings::{INonfungiblePositionManager, IQuoter},
};

pub trait PoolMath {
    /// Rounds `tick` to the nearest multiple of `tick_spacing`, halves round
    /// up, staying inside the valid tick range.
    fn nearest_usable_tick(&self, tick: i32, tick_spacing: i32) -> Result<i32, SeederError>;

    /// `nearest_usable_tick(tick) ± width * tick_spacing`.
    fn compute_tick_range(
        &self,
        tick: i32,
        tick_spacing: i32,
        width: i32,
    ) -> Result<(i32, i32), SeederError> {
        let center = self.nearest_usable_tick(tick, tick_spacing)?;
        let offset = width
            .checked_mul(tick_spacing)
            .ok_or_else(|| SeederError::Math(format!("range width {width} overflows")))?;

        let (lower, upper) = center
            .checked_sub(offset)
            .zip(center.checked_add(offset))
            .ok_or_else(|| SeederError::Math(format!("range width {width} overflows")))?;
        if lower < MIN_TICK || upper > MAX_TICK {
            return Err(SeederError::Math(format!(
                "tick range [{lower}, {upper}] is outside [{MIN_TICK}, {MAX_TICK}]"
            )));
        }

        Ok((lower, upper))
    }

    /// `floor(sqrt(amount1 / amount0) * 2^96)`.
    fn encode_sqrt_ratio_x96(&self, ratio: PriceRatio) -> Result<U256, SeederError>;

    fn encode_mint_call(
        &self,
        position: &Position,
        recipient: Address,
        deadline: U256,
        slippage: &SlippageTolerance,
    ) -> Result<MethodParameters, SeederError>;

    fn encode_quote_call(&self, route: &SwapRoute, amount_in: U256) -> Bytes;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UniswapV3Math;

impl UniswapV3Math {
    /// Token amounts `position` needs at the pool's live price, rounded up.
    pub fn mint_amounts(&self, position: &Position) -> Result<(U256, U256), SeederError> {
        let sqrt_lower = get_sqrt_ratio_at_tick(position.tick_lower).map_err(math_err)?;
        let sqrt_upper = get_sqrt_ratio_at_tick(position.tick_upper).map_err(math_err)?;
        let liquidity = position.liquidity;
        let pool = &position.pool;

        let amounts = if pool.tick < position.tick_lower {
            (amount0_delta(sqrt_lower, sqrt_upper, liquidity)?, U256::ZERO)
        } else if pool.tick < position.tick_upper {
            (
                amount0_delta(pool.sqrt_price_x96, sqrt_upper, liquidity)?,
                amount1_delta(sqrt_lower, pool.sqrt_price_x96, liquidity)?,
            )
        } else {
            (U256::ZERO, amount1_delta(sqrt_lower, sqrt_upper, liquidity)?)
        };

        Ok(amounts)
    }
}

impl PoolMath for UniswapV3Math {
    fn nearest_usable_tick(&self, tick: i32, tick_spacing: i32) -> Result<i32, SeederError> {
        if tick_spacing <= 0 {
            return Err(SeederError::Math(format!("invalid tick spacing {tick_spacing}")));
        }
        if !(MIN_TICK..=MAX_TICK).contains(&tick) {
            return Err(SeederError::Math(format!("tick {tick} out of bounds")));
        }

        // round(tick / spacing) with halves toward +inf, in i64 to keep 2 * tick exact
        let (tick, spacing) = (tick as i64, tick_spacing as i64);
        let rounded = (2 * tick + spacing).div_euclid(2 * spacing) * spacing;

        let rounded = if rounded < MIN_TICK as i64 {
            rounded + spacing
        } else if rounded > MAX_TICK as i64 {
            rounded - spacing
        } else {
            rounded
        };

        Ok(rounded as i32)
    }

    fn encode_sqrt_ratio_x96(&self, ratio: PriceRatio) -> Result<U256, SeederError> {
        if ratio.amount0.is_zero() {
            return Err(SeederError::Math("starting ratio has a zero denominator".to_string()));
        }

        let ratio_x192 = mul_div(ratio.amount1, U256::from(1u8) << 192, ratio.amount0).map_err(math_err)?;
        Ok(integer_sqrt(ratio_x192))
    }

    fn encode_mint_call(
        &self,
        position: &Position,
        recipient: Address,
        deadline: U256,
        slippage: &SlippageTolerance,
    ) -> Result<MethodParameters, SeederError> {
        let (amount0_desired, amount1_desired) = self.mint_amounts(position)?;
        let pool = &position.pool;

        let call = INonfungiblePositionManager::mintCall {
            params: INonfungiblePositionManager::MintParams {
                token0: pool.token0,
                token1: pool.token1,
                fee: U24::from(pool.fee),
                tickLower: I24::unchecked_from(position.tick_lower),
                tickUpper: I24::unchecked_from(position.tick_upper),
                amount0Desired: amount0_desired,
                amount1Desired: amount1_desired,
                amount0Min: slippage.apply_min(amount0_desired),
                amount1Min: slippage.apply_min(amount1_desired),
                recipient,
                deadline,
            },
        };

        // both sides are ERC20, no native value
        Ok(MethodParameters { calldata: call.abi_encode().into(), value: U256::ZERO })
    }

    fn encode_quote_call(&self, route: &SwapRoute, amount_in: U256) -> Bytes {
        IQuoter::quoteExactInputSingleCall {
            tokenIn: route.token_in,
            tokenOut: route.token_out,
            fee: U24::from(route.fee),
            amountIn: amount_in,
            sqrtPriceLimitX96: U160::ZERO,
        }
        .abi_encode()
        .into()
    }
}

fn math_err(e: impl std::fmt::Debug) -> SeederError {
    SeederError::Math(format!("{e:?}"))
}

/// `liquidity * (1/sqrt_a - 1/sqrt_b)`, rounded up. Requires `sqrt_a <= sqrt_b`.
fn amount0_delta(sqrt_a: U256, sqrt_b: U256, liquidity: u128) -> Result<U256, SeederError> {
    if sqrt_a.is_zero() {
        return Err(SeederError::Math("zero sqrt price".to_string()));
    }
    let numerator = U256::from(liquidity) << 96;
    let step = mul_div_rounding_up(numerator, sqrt_b - sqrt_a, sqrt_b)?;
    Ok(step.div_ceil(sqrt_a))
}

/// `liquidity * (sqrt_b - sqrt_a) / 2^96`, rounded up. Requires `sqrt_a <= sqrt_b`.
fn amount1_delta(sqrt_a: U256, sqrt_b: U256, liquidity: u128) -> Result<U256, SeederError> {
    mul_div_rounding_up(U256::from(liquidity), sqrt_b - sqrt_a, U256::from(1u8) << 96)
}

fn mul_div_rounding_up(a: U256, b: U256, denominator: U256) -> Result<U256, SeederError> {
    if denominator.is_zero() {
        return Err(SeederError::Math("division by zero".to_string()));
    }

    let product = U512::from(a) * U512::from(b);
    let denominator = U512::from(denominator);
    let mut quotient = product / denominator;
    if !(product % denominator).is_zero() {
        quotient += U512::from(1u8);
    }

    if quotient > U512::from(U256::MAX) {
        return Err(SeederError::Math("amount overflows uint256".to_string()));
    }
    Ok(U256::from(quotient))
}

/// floor(sqrt(value)) by Newton iteration.
fn integer_sqrt(value: U256) -> U256 {
    if value < U256::from(2u8) {
        return value;
    }

    let mut x = value;
    let mut y = (x >> 1) + U256::from(1u8);
    while y < x {
        x = y;
        y = (x + value / x) >> 1;
    }
    x
}
