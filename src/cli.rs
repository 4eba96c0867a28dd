use clap::{Parser, Subcommand};

pub use cachegate::config::OutputFormat;

/// Cachegate - task output cacheability checks
///
/// Cachegate decides, for each task of a build, whether its outputs may be
/// stored into and restored from the build cache, and explains why not.
#[derive(Parser, Debug)]
#[command(name = "cachegate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Task output cacheability checks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve cacheability for the tasks in a manifest
    Check(CheckArgs),

    /// Configuration management utilities
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Task manifest (defaults to check.manifest from config, then tasks.kdl)
    pub manifest: Option<String>,

    /// Config file path
    #[arg(short = 'c', long, env = "CACHEGATE_CONFIG")]
    pub config: Option<String>,

    /// Only check the named task (repeatable)
    #[arg(short = 't', long = "task")]
    pub tasks: Vec<String>,

    /// Result format
    #[arg(long, value_enum, env = "CACHEGATE_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Worker threads (0 = number of CPUs)
    #[arg(short = 'j', long, env = "CACHEGATE_JOBS")]
    pub jobs: Option<usize>,

    /// Directory overlap paths are displayed relative to
    #[arg(long, env = "CACHEGATE_ROOT")]
    pub root: Option<String>,

    /// Exit with status 1 if any task is not cacheable
    #[arg(long)]
    pub fail_on_disabled: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print an example configuration file
    Example,

    /// Validate a configuration file
    Validate {
        /// Config file path (discovered if omitted)
        path: Option<String>,
    },
}
