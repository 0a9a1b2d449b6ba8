mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use pkg_core::types::LifecycleCommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "pkg",
    about = "Run init, build, test, install, run, clean and uplift through one hook pipeline",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: nearest ancestor with pkg.toml or pyproject.toml)
    #[arg(long, global = true, env = "PKG_ROOT")]
    root: Option<PathBuf>,

    /// Log progress at info level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Output as JSON (config commands)
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project with the given build tool
    Init {
        /// Project name
        name: String,

        /// Initialize a git repository (default)
        #[arg(long, overrides_with = "no_git")]
        git: bool,

        /// Skip git repository initialization
        #[arg(long = "no-git", overrides_with = "git")]
        no_git: bool,

        /// Build tool to use: uv, bun, go, or bash
        #[arg(long)]
        tool: String,
    },

    /// Run tests, then build
    Build,

    /// Run tests
    Test,

    /// Install dependencies
    Install,

    /// Remove build artifacts
    Clean,

    /// Run a script through the build tool
    Run {
        /// Script or target to run
        script: String,

        /// Arguments forwarded to the script unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Bring an existing project up to date with current scaffolding
    Uplift,

    /// Inspect the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init {
            name, no_git, tool, ..
        } => cmd::init::run(&root, &name, &tool, !no_git),
        Commands::Build => cmd::lifecycle::run(&root, LifecycleCommand::Build, |b| b.build()),
        Commands::Test => cmd::lifecycle::run(&root, LifecycleCommand::Test, |b| b.test()),
        Commands::Install => cmd::lifecycle::run(&root, LifecycleCommand::Install, |b| b.install()),
        Commands::Clean => cmd::lifecycle::run(&root, LifecycleCommand::Clean, |b| b.clean()),
        Commands::Run { script, args } => {
            cmd::lifecycle::run(&root, LifecycleCommand::Run, |b| b.run(&script, &args))
        }
        Commands::Uplift => cmd::uplift::run(&root),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // Print the full error chain (anyhow's alternate Display)
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
