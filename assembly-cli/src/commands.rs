use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List services whose id or name contains KEYWORD.
    Search {
        keyword: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Resolve a service id or name to its id and live endpoint.
    Resolve {
        service: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Show the parsed specification of a service.
    Spec {
        service: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Fetch one page of data.
    Get {
        service: String,
        #[arg(long)]
        xml: bool,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        #[command(flatten)]
        params: ParamsArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Remove cached specifications.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Save one sample response per known service.
    Fixtures {
        #[arg(long, default_value = "tests/fixtures")]
        dir: PathBuf,
        #[arg(long, default_value_t = 5)]
        concurrency: usize,
        /// Pause after each call, in milliseconds.
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,
        #[command(flatten)]
        params: ParamsArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    Clear {
        service: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        client: ClientArgs,
    },
}
