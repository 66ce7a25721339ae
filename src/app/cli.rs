use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Archive simulation results and scenario rebases into baseline directories"
)]
pub struct Cli {
    /// Prepended to every input PATH (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    pub root: Option<PathBuf>,

    /// Where the baseline tree is written (defaults to --root)
    #[arg(long, value_name = "PATH")]
    pub outdir: Option<PathBuf>,

    /// Use a predefined set of options from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Adjust the log verbosity (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct Target {
    /// Descend into directories
    #[arg(short, long)]
    pub recursive: bool,

    /// Delete the output directory before archiving
    #[arg(short = 'c', long)]
    pub cleanup: bool,

    /// Results file or directory, relative to --root
    pub path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct Rebase {
    #[command(flatten)]
    pub target: Target,

    /// Program run on every scenario before it is archived
    #[arg(long, value_name = "PROGRAM")]
    pub driver: Option<PathBuf>,

    /// Extra argument passed to the driver ahead of the scenario path
    #[arg(long = "driver-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub driver_args: Vec<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Archive existing result files (*.txt, *.csv) into a baselines directory
    Archive(Target),

    /// Run scenarios (*.xml) through the driver and archive them
    Rebase(Rebase),
}
