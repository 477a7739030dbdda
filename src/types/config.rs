use std::{path::PathBuf, str::FromStr, time::Duration};

use alloy_chains::NamedChain;
use alloy_primitives::{Address, U256, aliases::U160};
use alloy_signer_local::PrivateKeySigner;

use super::*;

/// Safety bounds attached to the swap call. Both default to zero, which
/// disables the on-chain checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwapSafety {
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U160,
}

/// When an existing allowance counts as sufficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AllowancePolicy {
    /// Any nonzero allowance is left alone.
    #[default]
    NonZero,
    /// The allowance must cover the token's full supply.
    CoversSupply,
}

impl AllowancePolicy {
    pub fn is_sufficient(&self, current: U256, supply: U256) -> bool {
        match self {
            Self::NonZero => !current.is_zero(),
            Self::CoversSupply => current >= supply,
        }
    }
}

impl FromStr for AllowancePolicy {
    type Err = SeederError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nonzero" => Ok(Self::NonZero),
            "supply" => Ok(Self::CoversSupply),
            other => Err(SeederError::Config(format!("unknown allowance policy {other:?}"))),
        }
    }
}

/// Fixed parameters of one workflow instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowParams {
    pub token_one: TokenSpec,
    pub token_two: TokenSpec,
    pub fee_tier: u32,
    pub starting_ratio: PriceRatio,
    pub liquidity: u128,
    pub position_width: i32,
    pub deadline: Duration,
    pub slippage: SlippageTolerance,
    pub quote_amount_in: U256,
    pub swap_safety: SwapSafety,
    pub allowance_policy: AllowancePolicy,
}

impl Default for WorkflowParams {
    fn default() -> Self {
        Self {
            token_one: TokenSpec::new("Seed Token One", "SEED1", default_token_supply()),
            token_two: TokenSpec::new("Seed Token Two", "SEED2", default_token_supply()),
            fee_tier: DEFAULT_FEE_TIER,
            starting_ratio: PriceRatio::default(),
            liquidity: ONE_TOKEN.to::<u128>(),
            position_width: DEFAULT_POSITION_WIDTH,
            deadline: Duration::from_secs(DEFAULT_DEADLINE_SECS),
            slippage: SlippageTolerance::from_bps(DEFAULT_SLIPPAGE_BPS),
            quote_amount_in: ONE_TOKEN,
            swap_safety: SwapSafety::default(),
            allowance_policy: AllowancePolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SeederConfig {
    pub rpc_url: String,
    pub chain: NamedChain,
    pub signer: PrivateKeySigner,
    pub deployments: UniswapDeployments,
    pub token_artifact: PathBuf,
    pub cache_path: PathBuf,
    pub params: WorkflowParams,
}

impl SeederConfig {
    pub fn new(
        rpc_url: impl ToString,
        chain: NamedChain,
        signer: PrivateKeySigner,
        deployments: UniswapDeployments,
    ) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            chain,
            signer,
            deployments,
            token_artifact: PathBuf::from(DEFAULT_TOKEN_ARTIFACT),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            params: WorkflowParams::default(),
        }
    }

    /// Reads `PRIVATE_KEY` and `RPC_URL` plus optional overrides. `NETWORK`
    /// defaults to sepolia, which has no known V1 quoter, so `QUOTER_ADDRESS`
    /// is required there and on any other chain without one.
    pub fn from_env() -> Result<Self, SeederError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SeederError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let signer = var("PRIVATE_KEY")
            .ok_or_else(|| SeederError::Config("PRIVATE_KEY is not set".to_string()))?
            .trim()
            .parse::<PrivateKeySigner>()
            .map_err(|e| SeederError::Config(format!("invalid PRIVATE_KEY: {e}")))?;

        let rpc_url =
            var("RPC_URL").ok_or_else(|| SeederError::Config("RPC_URL is not set".to_string()))?;

        let chain = match var("NETWORK") {
            Some(network) => NamedChain::from_str(network.trim())
                .map_err(|_| SeederError::Config(format!("unknown NETWORK {network:?}")))?,
            None => NamedChain::Sepolia,
        };

        let address = |key: &str| -> Result<Option<Address>, SeederError> {
            var(key)
                .map(|v| {
                    v.trim()
                        .parse::<Address>()
                        .map_err(|e| SeederError::Config(format!("invalid {key}: {e}")))
                })
                .transpose()
        };

        let known = KnownDeployments::for_chain(chain);
        let deployments = KnownDeployments {
            factory: address("FACTORY_ADDRESS")?.or(known.factory),
            position_manager: address("POSITION_MANAGER_ADDRESS")?.or(known.position_manager),
            swap_router: address("SWAP_ROUTER_ADDRESS")?.or(known.swap_router),
            quoter: address("QUOTER_ADDRESS")?.or(known.quoter),
        }
        .resolve()?;

        let mut config = Self::new(rpc_url, chain, signer, deployments);

        if let Some(path) = var("TOKEN_ARTIFACT") {
            config = config.with_token_artifact(path);
        }
        if let Some(path) = var("CACHE_PATH") {
            config = config.with_cache_path(path);
        }
        if let Some(min) = var("SWAP_AMOUNT_OUT_MINIMUM") {
            config.params.swap_safety.amount_out_minimum = U256::from_str(min.trim())
                .map_err(|e| SeederError::Config(format!("invalid SWAP_AMOUNT_OUT_MINIMUM: {e}")))?;
        }
        if let Some(limit) = var("SWAP_SQRT_PRICE_LIMIT_X96") {
            config.params.swap_safety.sqrt_price_limit_x96 =
                U160::from_str(limit.trim()).map_err(|e| {
                    SeederError::Config(format!("invalid SWAP_SQRT_PRICE_LIMIT_X96: {e}"))
                })?;
        }
        if let Some(policy) = var("ALLOWANCE_POLICY") {
            config.params.allowance_policy = policy.trim().parse()?;
        }

        Ok(config)
    }

    pub fn with_token_artifact(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_artifact = path.into();
        self
    }

    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = path.into();
        self
    }

    pub fn with_params(mut self, params: WorkflowParams) -> Self {
        self.params = params;
        self
    }
}
