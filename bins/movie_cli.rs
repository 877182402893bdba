//! Command line client for the movie API.
//!
//! ```text
//! $ API_URL=http://127.0.0.1:8080/api/movies movie-cli search Avengers End Game
//! $ movie-cli add Avengers End Game '|' https://t.me/link
//! ```

use clap::{Parser, Subcommand};
use common::client::{parse_add_command, MovieApiClient};
use tracing::{error, info};

const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api/movies";

#[derive(Debug, Parser)]
#[command(name = "movie-cli")]
#[command(about = "Look up and register movie links", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Movie API endpoint
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find the link stored for a title
    #[command(arg_required_else_help = true)]
    Search {
        #[arg(value_name = "TITLE", num_args = 1..)]
        title: Vec<String>,
    },
    /// Add or replace a link: `<title> | <link>`
    #[command(arg_required_else_help = true)]
    Add {
        #[arg(value_name = "TITLE | LINK", num_args = 1..)]
        args: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_default();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "movie-cli failed");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let api = MovieApiClient::new(&cli.api_url)?;
    match cli.command {
        Commands::Search { title } => {
            let title = title.join(" ");
            match api.search(&title).await? {
                Some(link) => println!("{link}"),
                None => info!(%title, "no link found"),
            }
        }
        Commands::Add { args } => {
            let (movie, link) = parse_add_command(&args.join(" "))?;
            api.add(&movie, &link).await?;
            println!("added {movie} -> {link}");
        }
    }
    Ok(())
}
