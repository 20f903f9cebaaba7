use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;
use wakatotal::{cli::Cli, update_readme};

fn init_logger(multi: &MultiProgress, verbose: bool) -> Result<()> {
    let default_filter = match verbose {
        true => "warn,wakatotal=debug",
        false => "warn",
    };
    let logger = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .build();
    let level = logger.filter();

    LogWrapper::new(multi.clone(), logger)
        .try_init()
        .context("Failed to initialize logger")?;
    log::set_max_level(level);
    Ok(())
}

async fn run(args: Cli) -> Result<()> {
    let multi = MultiProgress::new();
    init_logger(&multi, args.verbose)?;

    let update = update_readme(&multi, &args)
        .await
        .with_context(|| format!("Failed to update {}", args.readme.display()))?;

    match update.document {
        Some(document) => print!("{document}"),
        None if !args.quiet => {
            println!("Updated {} with WakaTime total: {}", args.readme.display(), update.line)
        }
        None => {}
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();
    if let Err(err) = run(args).await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
