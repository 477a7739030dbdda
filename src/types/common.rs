use alloy_primitives::{Address, Bytes, Log, TxHash, U256};

/// An ERC20 token deployed by the workflow. Supply is 18-decimal fixed point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub total_supply: U256,
}

/// Parameters for a token that has not been deployed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpec {
    pub name: String,
    pub symbol: String,
    pub supply: U256,
}

impl TokenSpec {
    pub fn new(name: impl ToString, symbol: impl ToString, supply: U256) -> Self {
        Self { name: name.to_string(), symbol: symbol.to_string(), supply }
    }
}

/// Two tokens held in canonical order: `token0` has the lower address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    token0: Token,
    token1: Token,
}

impl TokenPair {
    pub fn new(a: Token, b: Token) -> Self {
        if a.address < b.address { Self { token0: a, token1: b } } else { Self { token0: b, token1: a } }
    }

    pub fn token0(&self) -> &Token {
        &self.token0
    }

    pub fn token1(&self) -> &Token {
        &self.token1
    }

    pub fn addresses(&self) -> (Address, Address) {
        (self.token0.address, self.token1.address)
    }
}

/// Orders two addresses the way a fee-tier pool keys them. Byte order of the
/// address equals case-insensitive lexical order of its hex form.
pub fn sort_tokens(token0: Address, token1: Address) -> (Address, Address) {
    if token0 < token1 { (token0, token1) } else { (token1, token0) }
}

/// Live pool state. Always read fresh from the chain, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolState {
    pub address: Address,
    pub token0: Address,
    pub token1: Address,
    pub fee: u32,
    pub tick_spacing: i32,
    pub tick: i32,
    pub sqrt_price_x96: U256,
    pub liquidity: u128,
}

/// A liquidity position to mint. Recomputed on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub pool: PoolState,
    pub liquidity: u128,
    pub tick_lower: i32,
    pub tick_upper: i32,
}

/// Single-hop route over one pool, in swap direction (not canonical order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapRoute {
    pub pool: Address,
    pub token_in: Address,
    pub token_out: Address,
    pub fee: u32,
}

/// Encoded call plus the native value to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodParameters {
    pub calldata: Bytes,
    pub value: U256,
}

/// Starting price of a new pool expressed as `amount1 / amount0` in canonical
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRatio {
    pub amount1: U256,
    pub amount0: U256,
}

impl PriceRatio {
    pub fn new(amount1: U256, amount0: U256) -> Self {
        Self { amount1, amount0 }
    }
}

impl Default for PriceRatio {
    fn default() -> Self {
        Self { amount1: U256::from(1u8), amount0: U256::from(1u8) }
    }
}

/// Acceptable deviation as a fraction, e.g. 5 / 10_000.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlippageTolerance {
    pub numerator: U256,
    pub denominator: U256,
}

impl SlippageTolerance {
    pub fn from_bps(bps: u32) -> Self {
        Self { numerator: U256::from(bps), denominator: U256::from(10_000u32) }
    }

    /// `amount` reduced by the tolerance, rounded down.
    pub fn apply_min(&self, amount: U256) -> U256 {
        if self.denominator.is_zero() || self.numerator >= self.denominator {
            return U256::ZERO;
        }
        amount * (self.denominator - self.numerator) / self.denominator
    }
}

/// The part of a transaction receipt the workflow reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub success: bool,
    pub contract_address: Option<Address>,
    pub logs: Vec<Log>,
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    fn token(address: Address, symbol: &str) -> Token {
        Token {
            address,
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            total_supply: U256::from(1u8),
        }
    }

    #[test]
    fn test_sort_tokens_is_symmetric() {
        let a = address!("00000000000000000000000000000000000000ff");
        let b = address!("0a00000000000000000000000000000000000000");

        assert_eq!(sort_tokens(a, b), sort_tokens(b, a));
        assert_eq!(sort_tokens(a, b), (a, b));
    }

    #[test]
    fn test_sort_tokens_ignores_hex_case() {
        let lower: Address = "0xabcdef0000000000000000000000000000000001".parse().unwrap();
        let upper: Address = "0xABCDEF0000000000000000000000000000000000".parse().unwrap();

        assert_eq!(sort_tokens(lower, upper), (upper, lower));
    }

    #[test]
    fn test_token_pair_orders_by_address() {
        let high = token(address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"), "HIGH");
        let low = token(address!("2260fac5e5542a773aa44fbcfedf7c193bc2c599"), "LOW");

        let pair = TokenPair::new(high.clone(), low.clone());
        let flipped = TokenPair::new(low.clone(), high.clone());

        assert_eq!(pair, flipped);
        assert_eq!(pair.token0(), &low);
        assert_eq!(pair.token1(), &high);
    }

    #[test]
    fn test_slippage_min_amount() {
        let slippage = SlippageTolerance::from_bps(5);
        assert_eq!(slippage.apply_min(U256::from(10_000u32)), U256::from(9_995u32));
        assert_eq!(SlippageTolerance::from_bps(10_000).apply_min(U256::from(7u8)), U256::ZERO);
    }
}
