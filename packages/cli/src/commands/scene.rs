use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use isoflow_editor::OpenOutcome;
use isoflow_model::{codec, Scene};

use super::{Context, NativeController};

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Scene file to open
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Scene file to check
    pub file: PathBuf,

    /// Treat connectors pointing at missing nodes as errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Scene file to load
    pub file: PathBuf,

    /// Directory to write the exported file to (defaults to current directory)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Scene file whose icon set is kept
    pub file: PathBuf,

    /// Directory to write the cleared scene to (defaults to current directory)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

pub async fn open(args: OpenArgs, ctx: &Context) -> Result<()> {
    let controller = ctx.controller(Some(args.file), None)?;
    load(&controller).await?;
    print_summary(&controller.scene_store().scene());
    Ok(())
}

pub fn validate(args: ValidateArgs, _ctx: &Context) -> Result<()> {
    println!("🔍 {} {}", "Validating".green().bold(), args.file.display());

    let text = std::fs::read_to_string(&args.file)?;
    let scene = codec::decode_str(&text)?;
    println!("  {} Scene format is valid", "✓".green());

    let dangling = scene.dangling_node_refs();
    for (connector_id, node_id) in &dangling {
        println!(
            "  {} connector {} points at missing node {}",
            "⚠️".yellow(),
            connector_id.as_str().bright_white(),
            node_id.as_str().bright_white()
        );
    }

    if args.strict && !dangling.is_empty() {
        return Err(anyhow!("{} dangling connector reference(s)", dangling.len()));
    }

    Ok(())
}

pub async fn export(args: ExportArgs, ctx: &Context) -> Result<()> {
    let controller = ctx.controller(Some(args.file), args.out_dir)?;
    load(&controller).await?;

    controller.save_as()?;
    print_written(&controller);
    Ok(())
}

pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let controller = ctx.controller(Some(args.file), args.out_dir)?;
    load(&controller).await?;

    controller.clear_canvas()?;
    let icons = controller.scene_store().scene().icons.len();
    println!("  {} Cleared canvas, kept {} icon(s)", "✓".green(), icons);

    controller.save_as()?;
    print_written(&controller);
    Ok(())
}

async fn load(controller: &NativeController) -> Result<()> {
    match controller.open_scene().await? {
        OpenOutcome::Loaded { file_name } => {
            println!("  {} Opened {}", "✓".green(), file_name.bright_white());
            Ok(())
        }
        OpenOutcome::Cancelled => Err(anyhow!("No file selected")),
        OpenOutcome::Superseded { file_name } => {
            Err(anyhow!("Opening {file_name} was superseded by another change"))
        }
    }
}

fn print_written(controller: &NativeController) {
    for path in controller.save_prompt().written() {
        println!("  {} Wrote {}", "✓".green(), path.display());
    }
}

fn print_summary(scene: &Scene) {
    let title = if scene.title.is_empty() {
        "(untitled)".dimmed().to_string()
    } else {
        scene.title.bright_white().bold().to_string()
    };

    println!();
    println!("  Title:       {title}");
    println!("  Icons:       {}", scene.icons.len());
    println!("  Nodes:       {}", scene.nodes.len());
    println!("  Connectors:  {}", scene.connectors.len());
    println!("  Text boxes:  {}", scene.text_boxes.len());
    println!("  Rectangles:  {}", scene.rectangles.len());

    let dangling = scene.dangling_node_refs();
    if !dangling.is_empty() {
        println!();
        println!(
            "  {} {} connector anchor(s) point at missing nodes",
            "⚠️".yellow(),
            dangling.len()
        );
        println!("  Run `isoflow validate` for details");
    }
}
