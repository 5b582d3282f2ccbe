//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via
//! bootstrap. Command dispatch routes to handlers.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use voxcache_cli::handlers::{generate::GenerateArgs, verify::VerifyArgs};
use voxcache_cli::{Cli, CliConfig, Commands, bootstrap, exit_code_for, handlers};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before parsing so clap's env fallbacks see them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(u8::try_from(exit_code_for(&e)).unwrap_or(1))
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli)?;
    let ctx = bootstrap(config)?;

    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Lookup { phrase } => handlers::lookup::execute(&ctx, &phrase)?,
        Commands::Ensure { phrase, json } => handlers::ensure::execute(&ctx, &phrase, json).await?,
        Commands::Verify {
            corpus,
            report,
            gender,
            show_missing,
        } => {
            let args = VerifyArgs {
                corpus: &corpus,
                report: report.as_deref(),
                gender,
                show_missing,
            };
            handlers::verify::execute(&ctx, &args)?;
        }
        Commands::Generate {
            corpus,
            concurrency,
            gender,
            voice,
            dry_run,
        } => {
            let args = GenerateArgs {
                corpus: &corpus,
                concurrency,
                gender,
                voice,
                dry_run,
            };
            handlers::generate::execute(&ctx, args).await?;
        }
        Commands::Voices { language, gender } => handlers::voices::execute(&ctx, language, gender)?,
        Commands::Config => handlers::config::execute(&ctx)?,
    }

    Ok(())
}
