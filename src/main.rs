use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

use config::Settings;
use storage::Sqlite;

mod app;
mod config;
mod error;
mod models;
mod storage;

/// Populates the trains store and runs a create/read/update/delete pass over it.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Opt {
    /// Logging level
    #[clap(long, default_value = "info")]
    level: LevelFilter,

    /// Log file path
    #[clap(long, default_value = "trains.log")]
    log_file: String,

    /// Settings file with the `DefaultConnection` connection string
    #[clap(long, default_value = "appsettings.json")]
    config: PathBuf,

    /// Connection string to use instead of the settings file
    #[clap(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opt = Opt::parse();

    let log_file = fs::File::create(&opt.log_file).context("can't open log file")?;

    simplelog::WriteLogger::init(opt.level, simplelog::Config::default(), log_file)
        .context("init logger")?;

    let settings = match opt.database_url {
        Some(ref url) => Settings::with_connection(url),
        None => Settings::load(&opt.config).context("load settings")?,
    };

    let seed = match settings.seed_file {
        Some(ref path) => models::seed::load(path)?,
        None => models::seed::builtin()?,
    };

    let storage = Sqlite::new(&settings)?;

    app::App::new(storage, seed).run().await
}
