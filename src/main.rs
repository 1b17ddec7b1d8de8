use std::io;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eksi_reader::app::AppContext;
use eksi_reader::cli::{commands, Cli};
use eksi_reader::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with the menus on stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let options = cli.options(config.menu.page_size);
    let ctx = AppContext::new(config, cli.theme.as_deref())?;

    commands::read(&ctx, options).await?;

    Ok(())
}
