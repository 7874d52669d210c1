use clap::{Parser, Subcommand};

mod args;
mod watch;

use args::SearchArgs;

#[derive(Debug, Parser)]
#[command(name = "clwatch")]
#[command(about = "Watch a craigslist search feed and email new listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the search feed URL and print it
    Url(SearchArgs),
    /// Poll the feed once: fetch, diff against the seen state, log and notify
    Watch {
        #[command(flatten)]
        search: SearchArgs,

        /// Print what would be notified without logging or sending mail
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Url(args) => {
            println!("{}", args.build_url()?);
        }
        Commands::Watch { search, dry_run } => {
            let config = clwatch_core::load_app_config_from_env()?;
            watch::run_watch(&config, &search, dry_run).await?;
        }
    }

    Ok(())
}
