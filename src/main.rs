//! CLI entry point for starlog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "starlog")]
#[command(version)]
#[command(about = "A static blog generator backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Start a local server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Clean the public folder
    Clean,

    /// List posts from the content source
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "starlog=debug,info"
    } else {
        "starlog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = cli.cwd.unwrap_or_else(|| std::env::current_dir().unwrap());

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            starlog::commands::init::init_site(&target_dir)?;
            println!("Initialized empty Starlog site in {:?}", target_dir);
        }

        Commands::Generate => {
            let app = starlog::Starlog::new(&base_dir)?;
            tracing::info!("Generating static files...");
            app.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, open } => {
            let app = starlog::Starlog::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            app.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            starlog::server::start(&app, &ip, port, open).await?;
        }

        Commands::Clean => {
            let app = starlog::Starlog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List => {
            let app = starlog::Starlog::new(&base_dir)?;
            starlog::commands::list::run(&app).await?;
        }

        Commands::Version => {
            println!("starlog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
