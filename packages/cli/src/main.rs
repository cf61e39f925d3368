mod commands;
mod host;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    clear, export, init, link, menu, open, validate, ClearArgs, Context, ExportArgs, InitArgs,
    LinkArgs, MenuArgs, OpenArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Isoflow CLI - open, check and export isometric diagrams
#[derive(Parser, Debug)]
#[command(name = "isoflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Editor config file (defaults to ./isoflow.config.json if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default editor config
    Init(InitArgs),

    /// Open a scene file and print a summary
    Open(OpenArgs),

    /// Check a scene file without loading it into the editor
    Validate(ValidateArgs),

    /// Open a scene file and download it again in the current format
    Export(ExportArgs),

    /// Open a scene file, clear the canvas and download the result
    Clear(ClearArgs),

    /// Show the main menu as configured
    Menu(MenuArgs),

    /// Open one of the menu's external links
    Link(LinkArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(cli).await;

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let ctx = Context::load(cwd, cli.config.as_deref())?;

    match cli.command {
        Command::Init(args) => init(args, &ctx),
        Command::Open(args) => open(args, &ctx).await,
        Command::Validate(args) => validate(args, &ctx),
        Command::Export(args) => export(args, &ctx).await,
        Command::Clear(args) => clear(args, &ctx).await,
        Command::Menu(args) => menu(args, &ctx),
        Command::Link(args) => link(args, &ctx),
    }
}
