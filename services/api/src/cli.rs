use crate::report::{run_assign, run_suggest, AssignArgs, SuggestArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mentor_match::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Mentor Match",
    about = "Score and pair mentors with mentees over HTTP or from roster exports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank mentors for one mentee from roster CSV exports
    Suggest(SuggestArgs),
    /// Run a batch assignment over roster CSV exports
    Assign(AssignArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Mentor roster CSV loaded into the candidate pool at startup
    #[arg(long)]
    pub(crate) mentors: Option<PathBuf>,
    /// Mentee roster CSV loaded into the candidate pool at startup
    #[arg(long)]
    pub(crate) mentees: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Suggest(args) => run_suggest(args),
        Command::Assign(args) => run_assign(args),
    }
}
