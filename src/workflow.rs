use std::path::PathBuf;

use alloy_primitives::{Bytes, TxHash, U256};
use tracing::{info, warn};

use crate::{
    apis::{AllowanceApi, LiquidityApi, PoolApi, SwapApi, TokenApi, utils::load_creation_code},
    builders::{PoolMath, UniswapV3Math},
    providers::{ChainGateway, SignerApi},
    storage::{CacheStore, WorkflowCacheRecord},
    types::{
        PoolState, SeederConfig, SeederError, SwapRoute, TokenPair, UniswapDeployments,
        WorkflowParams,
    },
};

/// What one run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowReport {
    pub record: WorkflowCacheRecord,
    /// Whether tokens and pool were created in this run.
    pub bootstrapped: bool,
    pub approvals: Vec<TxHash>,
    pub mint_tx: TxHash,
    pub quoted_amount: U256,
    pub swap_tx: TxHash,
}

/// Sequences bootstrap, allowances, mint and swap for one pool.
///
/// The bootstrap phase (deploy both tokens, create and initialize the pool)
/// runs only when the cache holds no usable record or a fresh pool is forced.
/// Its outcome is saved before anything else is attempted, so a later failure
/// resumes from the saved pool instead of deploying again.
pub struct Workflow<S, M = UniswapV3Math> {
    session: S,
    math: M,
    deployments: UniswapDeployments,
    params: WorkflowParams,
    cache: CacheStore,
    token_artifact: PathBuf,
    creation_code: Option<Bytes>,
}

impl<S: SignerApi> Workflow<S> {
    pub fn new(
        session: S,
        deployments: UniswapDeployments,
        params: WorkflowParams,
        cache: CacheStore,
        token_artifact: impl Into<PathBuf>,
    ) -> Self {
        Self {
            session,
            math: UniswapV3Math,
            deployments,
            params,
            cache,
            token_artifact: token_artifact.into(),
            creation_code: None,
        }
    }

    pub fn from_config(session: S, config: &SeederConfig) -> Self {
        Self::new(
            session,
            config.deployments,
            config.params.clone(),
            CacheStore::new(&config.cache_path),
            &config.token_artifact,
        )
    }
}

impl<S, M> Workflow<S, M>
where
    S: SignerApi,
    M: PoolMath,
{
    pub fn with_math<M1: PoolMath>(self, math: M1) -> Workflow<S, M1> {
        Workflow {
            session: self.session,
            math,
            deployments: self.deployments,
            params: self.params,
            cache: self.cache,
            token_artifact: self.token_artifact,
            creation_code: self.creation_code,
        }
    }

    /// Uses `code` as the token creation bytecode instead of reading the
    /// artifact file.
    pub fn with_creation_code(mut self, code: Bytes) -> Self {
        self.creation_code = Some(code);
        self
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub async fn run(&self, force_create: bool) -> Result<WorkflowReport, SeederError> {
        let (record, bootstrapped) = match self.cache.load()? {
            Some(record) if !force_create => {
                info!(target: "pool_seeder::workflow", pool = ?record.pool_address, "resuming from cache");
                (record, false)
            }
            cached => {
                if let Some(abandoned) = cached {
                    warn!(target: "pool_seeder::workflow", pool = ?abandoned.pool_address, "forced bootstrap, abandoning cached pool");
                }
                (self.bootstrap().await?, true)
            }
        };

        let approvals = self
            .session
            .ensure_allowances(
                &[record.token_one.clone(), record.token_two.clone()],
                &[self.deployments.position_manager, self.deployments.swap_router],
                self.params.allowance_policy,
            )
            .await?;

        let pool = self.canonical_pool_state(&record).await?;
        let position = self.session.build_position(
            &self.math,
            pool.clone(),
            self.params.liquidity,
            self.params.position_width,
        )?;
        let mint_tx = self
            .session
            .mint_liquidity(
                &self.math,
                self.deployments.position_manager,
                &position,
                self.session.signer_address(),
                self.params.deadline,
                &self.params.slippage,
            )
            .await?;

        // swap direction follows the declared token order, not the canonical one
        let route = SwapRoute {
            pool: record.pool_address,
            token_in: record.token_one.address,
            token_out: record.token_two.address,
            fee: pool.fee,
        };
        let quoted_amount = self
            .session
            .quote_exact_input(&self.math, self.deployments.quoter, &route, self.params.quote_amount_in)
            .await?;
        let swap_tx = self
            .session
            .execute_swap(self.deployments.swap_router, &route, quoted_amount, self.params.swap_safety)
            .await?;

        info!(target: "pool_seeder::workflow", pool = ?record.pool_address, bootstrapped, ?mint_tx, ?swap_tx, "workflow complete");

        Ok(WorkflowReport { record, bootstrapped, approvals, mint_tx, quoted_amount, swap_tx })
    }

    /// Deploys both tokens, creates and initializes their pool and saves the
    /// result to the cache.
    pub async fn bootstrap(&self) -> Result<WorkflowCacheRecord, SeederError> {
        let signer = self.session.signer_address();
        let balance = self.session.gateway().get_balance(signer).await?;
        if balance.is_zero() {
            return Err(SeederError::InsufficientFunds(signer));
        }

        let creation_code = match &self.creation_code {
            Some(code) => code.clone(),
            None => load_creation_code(&self.token_artifact)?,
        };

        let token_one = self.session.deploy_token(&creation_code, &self.params.token_one).await?;
        let token_two = self.session.deploy_token(&creation_code, &self.params.token_two).await?;

        let pair = TokenPair::new(token_one.clone(), token_two.clone());
        let (token0, token1) = pair.addresses();

        let pool = self
            .session
            .create_pool(self.deployments.factory, token0, token1, self.params.fee_tier)
            .await?;
        self.session
            .initialize_pool(&self.math, pool, token0, token1, self.params.starting_ratio)
            .await?;

        let record = WorkflowCacheRecord::new(token_one, token_two, pool);
        self.cache.save(&record)?;

        Ok(record)
    }

    /// Live pool state, rejected unless the pool is keyed by this record's
    /// pair in canonical order.
    async fn canonical_pool_state(&self, record: &WorkflowCacheRecord) -> Result<PoolState, SeederError> {
        let pool = self.session.read_pool_state(record.pool_address).await?;
        let expected = record.pair().addresses();

        if (pool.token0, pool.token1) != expected {
            return Err(SeederError::PoolResolution(format!(
                "pool {:?} holds ({:?}, {:?}), expected ({:?}, {:?})",
                pool.address, pool.token0, pool.token1, expected.0, expected.1
            )));
        }

        Ok(pool)
    }
}
