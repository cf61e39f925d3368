use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use isoflow_editor::{ExternalLink, MenuAnchor, MenuEntry};

use super::Context;

#[derive(Debug, Args)]
pub struct MenuArgs {}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LinkTarget {
    Github,
    Discord,
}

impl From<LinkTarget> for ExternalLink {
    fn from(target: LinkTarget) -> Self {
        match target {
            LinkTarget::Github => ExternalLink::GitHub,
            LinkTarget::Discord => ExternalLink::Discord,
        }
    }
}

#[derive(Debug, Args)]
pub struct LinkArgs {
    pub target: LinkTarget,
}

/// Render the main menu as configured
pub fn menu(_args: MenuArgs, ctx: &Context) -> Result<()> {
    let controller = ctx.controller(None, None)?;
    controller.open_menu(MenuAnchor::default());

    let Some(view) = controller.menu_view() else {
        println!("{}", "Main menu is hidden (no options configured)".dimmed());
        return Ok(());
    };

    for entry in view.entries() {
        match entry {
            MenuEntry::Action(action) => println!("  {}", action.label()),
            MenuEntry::Link(link) => println!("  {} {}", link.label(), "↗".dimmed()),
            MenuEntry::Label(text) => println!("  {}", text.dimmed()),
            MenuEntry::Divider => println!("  {}", "────────────────".dimmed()),
        }
    }

    controller.close_menu();
    Ok(())
}

pub fn link(args: LinkArgs, ctx: &Context) -> Result<()> {
    let controller = ctx.controller(None, None)?;
    controller.open_link(args.target.into())?;
    Ok(())
}
