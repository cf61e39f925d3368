//! Main menu layout derived from the configured capability tags.
//!
//! Three sections, always in this order, each present only when at least one
//! of its entries is enabled:
//!
//! ```text
//! actions   Open / Download diagram / Clear the canvas
//! ─────────
//! links     GitHub / Discord
//! ─────────
//! version   Isoflow v<version>
//! ```
//!
//! Dividers separate sections that are actually present. With no tags at all
//! there is no menu.

use crate::config::MenuOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Open,
    SaveJson,
    Clear,
}

impl MenuAction {
    pub fn option(&self) -> MenuOption {
        match self {
            MenuAction::Open => MenuOption::Open,
            MenuAction::SaveJson => MenuOption::SaveJson,
            MenuAction::Clear => MenuOption::Clear,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Open => "Open",
            MenuAction::SaveJson => "Download diagram",
            MenuAction::Clear => "Clear the canvas",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalLink {
    GitHub,
    Discord,
}

impl ExternalLink {
    pub fn option(&self) -> MenuOption {
        match self {
            ExternalLink::GitHub => MenuOption::Github,
            ExternalLink::Discord => MenuOption::Discord,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExternalLink::GitHub => "GitHub",
            ExternalLink::Discord => "Discord",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Actions,
    Links,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Action(MenuAction),
    Link(ExternalLink),
    Label(String),
    Divider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub kind: SectionKind,
    pub entries: Vec<MenuEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainMenuView {
    pub sections: Vec<MenuSection>,
}

const ACTIONS: [MenuAction; 3] = [MenuAction::Open, MenuAction::SaveJson, MenuAction::Clear];
const LINKS: [ExternalLink; 2] = [ExternalLink::GitHub, ExternalLink::Discord];

impl MainMenuView {
    /// `None` when `options` is empty: the whole control is hidden
    pub fn build(options: &[MenuOption], version: &str) -> Option<Self> {
        if options.is_empty() {
            return None;
        }

        let actions: Vec<MenuEntry> = ACTIONS
            .into_iter()
            .filter(|action| options.contains(&action.option()))
            .map(MenuEntry::Action)
            .collect();

        let links: Vec<MenuEntry> = LINKS
            .into_iter()
            .filter(|link| options.contains(&link.option()))
            .map(MenuEntry::Link)
            .collect();

        let version: Vec<MenuEntry> = if options.contains(&MenuOption::Version) {
            vec![MenuEntry::Label(format!("Isoflow v{version}"))]
        } else {
            Vec::new()
        };

        let sections = [
            (SectionKind::Actions, actions),
            (SectionKind::Links, links),
            (SectionKind::Version, version),
        ]
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(kind, entries)| MenuSection { kind, entries })
        .collect();

        Some(Self { sections })
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.sections.iter().any(|section| section.kind == kind)
    }

    /// Flattened entries with dividers between sections
    pub fn entries(&self) -> Vec<MenuEntry> {
        let mut entries = Vec::new();
        for (index, section) in self.sections.iter().enumerate() {
            if index > 0 {
                entries.push(MenuEntry::Divider);
            }
            entries.extend(section.entries.iter().cloned());
        }
        entries
    }
}
