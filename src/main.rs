use std::path::PathBuf;

use clap::Parser;
use pool_seeder::{
    providers::{AlloyGateway, SignerSession},
    types::SeederConfig,
    workflow::Workflow,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Deploys two tokens, bootstraps their Uniswap V3 pool, adds liquidity and
/// runs a test swap. Bootstrap results are cached between runs.
#[derive(Parser, Debug)]
#[command(name = "pool-seeder")]
struct Args {
    /// Deploy fresh tokens and a fresh pool even if the cache holds a pool
    #[arg(long)]
    create: bool,

    /// Cache file, overrides CACHE_PATH
    #[arg(long, value_name = "PATH")]
    cache: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = SeederConfig::from_env()?;
    if let Some(cache) = args.cache {
        config = config.with_cache_path(cache);
    }
    info!(chain = %config.chain, cache = %config.cache_path.display(), create = args.create, "starting");

    let gateway = AlloyGateway::connect(&config.rpc_url, config.signer.clone()).await?;
    let session = SignerSession::new(gateway).with_all_fillers();

    let report = Workflow::from_config(session, &config).run(args.create).await?;
    info!(
        pool = ?report.record.pool_address,
        token_one = ?report.record.token_one.address,
        token_two = ?report.record.token_two.address,
        swap_tx = ?report.swap_tx,
        "done"
    );

    Ok(())
}
