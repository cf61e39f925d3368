use std::fs;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use isoflow_editor::{EditorConfig, DEFAULT_CONFIG_NAME};

use super::Context;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Title of the initial scene
    #[arg(short, long, default_value = "Untitled")]
    pub title: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Isoflow editor config...".bright_blue().bold());

    let mut config = EditorConfig::default();
    config.initial_scene.title = args.title;

    // Fail before writing anything the editor couldn't start from
    config.initial_scene()?;

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("Next steps:");
    println!("  1. Edit mainMenuOptions to choose which actions the menu offers");
    println!("  2. Run: isoflow menu");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context {
            cwd: dir.path().to_path_buf(),
            config: EditorConfig::default(),
        };

        init(InitArgs { title: "Office".to_string(), force: false }, &ctx).unwrap();

        let loaded = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.initial_scene().unwrap().title, "Office");
        assert_eq!(loaded.main_menu_options, EditorConfig::default().main_menu_options);
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_NAME);
        fs::write(&path, r#"{ "mainMenuOptions": [] }"#).unwrap();
        let ctx = Context {
            cwd: dir.path().to_path_buf(),
            config: EditorConfig::default(),
        };

        init(InitArgs { title: "Office".to_string(), force: false }, &ctx).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{ "mainMenuOptions": [] }"#);

        init(InitArgs { title: "Office".to_string(), force: true }, &ctx).unwrap();
        assert!(!EditorConfig::load(dir.path()).unwrap().main_menu_options.is_empty());
    }
}
