use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::{CacheAction, Command};

#[derive(Debug, Parser)]
#[command(name = "assembly", version, about = "National Assembly open API client")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Search {
            keyword,
            output,
            client,
        } => cmd::search::search_cmd(&keyword, output, client),
        Command::Resolve {
            service,
            output,
            client,
        } => cmd::resolve::resolve_cmd(&service, output, client).await,
        Command::Spec {
            service,
            output,
            client,
        } => cmd::spec::spec_cmd(&service, output, client).await,
        Command::Get {
            service,
            xml,
            page,
            size,
            params,
            output,
            client,
        } => cmd::get::get_cmd(&service, xml, page, size, params, output, client).await,
        Command::Cache {
            action:
                CacheAction::Clear {
                    service,
                    output,
                    client,
                },
        } => cmd::cache::cache_clear_cmd(&service, output, client).await,
        Command::Fixtures {
            dir,
            concurrency,
            delay_ms,
            params,
            output,
            client,
        } => {
            cmd::fixtures::fixtures_cmd(&dir, concurrency, delay_ms, params, output, client).await
        }
    }
}
