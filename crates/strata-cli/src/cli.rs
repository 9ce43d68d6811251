use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Strata — content-addressed snapshot version control",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a new repository
    Init(InitArgs),
    /// Compare the working tree to the head commit
    Status(StatusArgs),
    /// Snapshot the working tree as a new commit
    Commit(CommitArgs),
    /// Restore a past commit into the working tree
    Checkout(CheckoutArgs),
    /// List commits, oldest first
    Log(LogArgs),
    /// Print the current working tree snapshot
    Tree(TreeArgs),
    /// Show changes between two commits
    Diff(DiffArgs),
}

#[derive(Args)]
pub struct InitArgs {
    pub path: Option<String>,
}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
pub struct CommitArgs {}

#[derive(Args)]
pub struct CheckoutArgs {
    /// Hex digest of the target commit (a unique prefix works too)
    pub commit: String,
}

#[derive(Args)]
pub struct LogArgs {
    /// One line per commit
    #[arg(long)]
    pub short: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Include paths matched by .strataignore rules
    #[arg(long)]
    pub no_ignore: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: String,
    pub new: String,
}
