//! Command-line poker session recording winners in the league document.

use std::{io, sync::Arc};

use anyhow::Context;
use tokio::{runtime::Handle, task};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use player_league::{
    config::AppConfig,
    dao::player_store::FileSystemPlayerStore,
    game::{Cli, StdOutAlerter, TexasHoldem},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = FileSystemPlayerStore::from_path(&config.database_path).with_context(|| {
        format!(
            "problem creating file system player store at {}",
            config.database_path.display()
        )
    })?;

    let alerter = Arc::new(StdOutAlerter::new(Handle::current()));
    let game = TexasHoldem::new(alerter, Arc::new(store));

    println!("Let's play poker");
    println!("Type {{Name}} wins to record a win");

    task::spawn_blocking(move || {
        let mut cli = Cli::new(io::stdin().lock(), io::stdout(), game);
        cli.play_poker()
    })
    .await
    .context("poker session aborted")??;

    Ok(())
}

/// Log to stderr so diagnostics never interleave with the game prompts.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
