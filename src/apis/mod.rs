pub mod allowance;
pub mod liquidity;
pub mod pool;
pub mod swap;
pub mod tokens;
pub mod utils;

pub use allowance::AllowanceApi;
pub use liquidity::LiquidityApi;
pub use pool::{PoolApi, resolve_pool_address};
pub use swap::SwapApi;
pub use tokens::TokenApi;
