mod common;
pub use common::*;

mod config;
pub use config::*;

mod errors;
pub use errors::*;

pub mod contract_bindings;
pub mod fillers;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, U256, address};

pub const DEFAULT_FEE_TIER: u32 = 500;
pub const DEFAULT_POSITION_WIDTH: i32 = 2;
pub const DEFAULT_DEADLINE_SECS: u64 = 20 * 60;
pub const DEFAULT_SLIPPAGE_BPS: u32 = 5;
pub const DEFAULT_CACHE_PATH: &str = "pool-cache.json";
pub const DEFAULT_TOKEN_ARTIFACT: &str = "contracts/SeedToken.json";

/// 10^18, one whole unit of an 18-decimal token.
pub const ONE_TOKEN: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

pub fn default_token_supply() -> U256 {
    ONE_TOKEN * U256::from(1_000_000u64)
}

/// Uniswap V3 periphery and core contracts the workflow talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniswapDeployments {
    pub factory: Address,
    pub position_manager: Address,
    pub swap_router: Address,
    pub quoter: Address,
}

/// Partial deployment set, filled from known chains and then from the
/// environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnownDeployments {
    pub factory: Option<Address>,
    pub position_manager: Option<Address>,
    pub swap_router: Option<Address>,
    pub quoter: Option<Address>,
}

impl KnownDeployments {
    pub fn for_chain(chain: NamedChain) -> Self {
        match chain {
            NamedChain::Mainnet => Self {
                factory: Some(address!("1F98431c8aD98523631AE4a59f267346ea31F984")),
                position_manager: Some(address!("C36442b4a4522E871399CD717aBDD847Ab11FE88")),
                swap_router: Some(address!("68b3465833fb72A70ecDF485E0e4C7bD8665Fc45")),
                quoter: Some(address!("b27308f9F90D607463bb33eA1BeBb41C27CE5AB6")),
            },
            // sepolia only ships the V2 quoter, so QUOTER_ADDRESS must be supplied
            NamedChain::Sepolia => Self {
                factory: Some(address!("0227628f3F023bb0B980b67D528571c95c6DaC1c")),
                position_manager: Some(address!("1238536071E1c677A632429e3655c799b22cDA52")),
                swap_router: Some(address!("3bFA4769FB09eefC5a80d6E87c3B9C650f7Ae48E")),
                quoter: None,
            },
            _ => Self::default(),
        }
    }

    pub fn resolve(self) -> Result<UniswapDeployments, SeederError> {
        let missing = |name: &str| SeederError::Config(format!("no {name} address configured"));
        Ok(UniswapDeployments {
            factory: self.factory.ok_or_else(|| missing("FACTORY_ADDRESS"))?,
            position_manager: self
                .position_manager
                .ok_or_else(|| missing("POSITION_MANAGER_ADDRESS"))?,
            swap_router: self.swap_router.ok_or_else(|| missing("SWAP_ROUTER_ADDRESS"))?,
            quoter: self.quoter.ok_or_else(|| missing("QUOTER_ADDRESS"))?,
        })
    }
}
