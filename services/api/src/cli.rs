use crate::demo::{run_demo, run_rate, DemoArgs, RateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use ipcr::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "IPCR Appraisals",
    about = "Run and demonstrate the IPCR appraisal service from the command line",
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
    /// Print the rating breakdown of an appraisal JSON file
    Rate(RateArgs),
    /// Walk the template appraisal from draft to approval in memory
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rate(args) => run_rate(args),
        Command::Demo(args) => run_demo(args),
    }
}
