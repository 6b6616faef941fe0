use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ClientArgs {
    /// Overrides ASSEMBLY_API_KEY.
    #[arg(long)]
    pub api_key: Option<String>,
    /// Overrides ASSEMBLY_CACHE_DIR and the per-user default.
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,
    /// JSON object of service id to name, merged over the built-in registry.
    #[arg(long)]
    pub registry: Option<PathBuf>,
    #[arg(long)]
    pub revision: Option<u32>,
    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
    /// Deadline in seconds for a whole call, retries included.
    #[arg(long)]
    pub call_timeout: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct ParamsArgs {
    #[arg(long = "param", short = 'p', value_name = "KEY=VALUE")]
    pub params: Vec<String>,
    /// JSON or YAML object of query parameters.
    #[arg(long)]
    pub params_file: Option<PathBuf>,
}
