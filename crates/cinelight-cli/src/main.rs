use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod helper;
mod input;
mod render;

#[derive(Parser)]
#[command(name = "cinelight")]
#[command(about = "Cinelight - look up movies on OMDb from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// OMDb API key (overrides OMDB_API_KEY and the config file)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// OMDb endpoint
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Repl,
    /// Search titles and print one page of results
    Search {
        /// Title to search for
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Result page to show
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Print JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Show the details of one title by IMDb id
    Show {
        /// IMDb id, e.g. tt0110912
        imdb_id: String,

        /// Print JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::run(&cli.global).await?,
        Commands::Search { title, page, json } => {
            commands::search::run(&cli.global, &title.join(" "), page, json).await?
        }
        Commands::Show { imdb_id, json } => {
            commands::show::run(&cli.global, &imdb_id, json).await?
        }
    }

    Ok(())
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "cinelight=debug"
    } else {
        "cinelight=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
