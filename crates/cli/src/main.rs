mod commands;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use inkpress_client::ArticleQuery;
use inkpress_core::ArticleStatus;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version, about = "Content site for an InkPilots workspace", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize new site directory
    Init {
        /// Path to create site directory
        path: PathBuf,

        /// InkPilots workspace id
        #[arg(long)]
        workspace_id: Option<String>,

        /// Public site URL used for sitemap entries
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Validate site configuration
    Validate {
        /// Path to site directory
        path: PathBuf,

        /// Also validate a workspace JSON snapshot
        #[arg(long)]
        from_json: Option<PathBuf>,
    },

    /// Serve the site locally, fetching the workspace on every request
    Serve {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Read the workspace from a JSON snapshot (enables hot reload)
        #[arg(long)]
        from_json: Option<PathBuf>,
    },

    /// Build static site
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,

        /// Read the workspace from a JSON snapshot instead of the API
        #[arg(long)]
        from_json: Option<PathBuf>,
    },

    /// Print every route the site serves as JSON
    Paths {
        /// Path to site directory
        path: PathBuf,

        #[arg(long)]
        from_json: Option<PathBuf>,
    },

    /// Print the sitemap
    Sitemap {
        /// Path to site directory
        path: PathBuf,

        #[arg(long)]
        from_json: Option<PathBuf>,

        /// Emit sitemap XML instead of JSON
        #[arg(long)]
        xml: bool,
    },

    /// List one agent's articles from the API
    Articles {
        /// Path to site directory
        path: PathBuf,

        /// Agent id
        agent: String,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        skip: Option<usize>,

        #[arg(long, value_enum)]
        status: Option<StatusFilter>,

        /// Only the article with this slug
        #[arg(long)]
        slug: Option<String>,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatusFilter {
    Draft,
    Published,
    Archived,
}

impl From<StatusFilter> for ArticleStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Draft => ArticleStatus::Draft,
            StatusFilter::Published => ArticleStatus::Published,
            StatusFilter::Archived => ArticleStatus::Archived,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init {
            path,
            workspace_id,
            site_url,
        } => commands::init::run(path, workspace_id, site_url).await,
        Command::Validate { path, from_json } => commands::validate::run(path, from_json).await,
        Command::Serve {
            path,
            port,
            from_json,
        } => commands::serve::run(path, port, from_json).await,
        Command::Build {
            path,
            output,
            from_json,
        } => commands::build::run(path, output, from_json).await,
        Command::Paths { path, from_json } => commands::paths::run(path, from_json).await,
        Command::Sitemap {
            path,
            from_json,
            xml,
        } => commands::sitemap::run(path, from_json, xml).await,
        Command::Articles {
            path,
            agent,
            limit,
            skip,
            status,
            slug,
            json,
        } => {
            let query = ArticleQuery {
                limit,
                skip,
                status: status.map(ArticleStatus::from),
                slug,
            };
            commands::articles::run(path, agent, query, json).await
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "inkpress", &mut io::stdout());
            Ok(())
        }
    }
}
