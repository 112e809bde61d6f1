mod commands;

use brand_site_generator::ContentKind;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brand-site")]
#[command(version, about = "Content pipeline for a personal brand website", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate frontend JSON from content sources
    Generate {
        /// Which pipeline to run
        #[arg(value_enum, default_value = "all")]
        target: Target,

        /// Project directory containing site.toml
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },

    /// Dry-run every local pipeline and report problems
    Validate {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Serve public/ with the live feed endpoint and regenerate on change
    Serve {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Scaffold a new site project
    Init {
        /// Directory to create the project in
        path: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Target {
    About,
    Testimonials,
    Press,
    Logos,
    Seo,
    Stats,
    Feed,
    All,
}

impl Target {
    fn kinds(self) -> Vec<ContentKind> {
        match self {
            Target::About => vec![ContentKind::About],
            Target::Testimonials => vec![ContentKind::Testimonials],
            Target::Press => vec![ContentKind::Press],
            Target::Logos => vec![ContentKind::Logos],
            Target::Seo => vec![ContentKind::Seo],
            Target::Stats => vec![ContentKind::Stats],
            Target::Feed => vec![ContentKind::Feed],
            Target::All => ContentKind::ALL.to_vec(),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate { target, project } => {
            commands::generate::run(project, &target.kinds()).await
        }
        Command::Validate { path } => commands::validate::run(path),
        Command::Serve { path, port } => commands::serve::run(path, port).await,
        Command::Init { path } => commands::init::run(path),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "brand-site", &mut io::stdout());
            Ok(())
        }
    }
}
