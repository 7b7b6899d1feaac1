use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use album_server::bootstrap::{self, Seed};
use album_server::config::{AppArgs, AppConfig};
use album_server::http::ApiContext;
use album_server::{db, http, logging};

#[tokio::main]
async fn main() {
    let args = AppArgs::parse();
    logging::init(args.log_level);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: AppArgs) -> anyhow::Result<()> {
    let workdir = args.workdir();
    let paths = bootstrap::bootstrap(&workdir, &Seed::bundled())
        .context("failed to bootstrap storage")?;
    let config = AppConfig::new(&args, paths);
    info!("{:?}", &config);

    let db = db::open(&config.db_path).await?;
    db::migrate(&db).await.context("failed to migrate database")?;

    let ctx = ApiContext::new(config, db);
    http::serve(ctx).await
}
