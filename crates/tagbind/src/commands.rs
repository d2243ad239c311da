mod bind;
mod check;
mod merge;

use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use tagbind_conf::Settings;
use tagbind_descriptors::builtin_tag_helpers;
use tagbind_descriptors::catalog;
use tagbind_descriptors::TagHelperCollection;

use crate::args::Args;
use crate::exit::Exit;

pub trait Command {
    fn execute(&self, args: &Args, project: &Project) -> Result<Exit>;
}

/// The working directory and the settings loaded for it.
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub settings: Settings,
}

impl Project {
    pub fn load() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to get current directory")?;
        let settings = Settings::new(&root).context("Failed to load settings")?;
        Ok(Self { root, settings })
    }

    fn load_collection(&self, catalogs: &CatalogArgs) -> Result<TagHelperCollection> {
        catalogs.load(&self.settings, &self.root)
    }
}

#[derive(Debug, Subcommand)]
pub enum TagbindCommand {
    /// Show which tag helpers bind to an element
    Bind(self::bind::Bind),
    /// Report diagnostics found while building catalog descriptors
    Check(self::check::Check),
    /// Merge catalogs and print the resulting collection checksum
    Merge(self::merge::Merge),
}

impl Command for TagbindCommand {
    fn execute(&self, args: &Args, project: &Project) -> Result<Exit> {
        match self {
            TagbindCommand::Bind(command) => command.execute(args, project),
            TagbindCommand::Check(command) => command.execute(args, project),
            TagbindCommand::Merge(command) => command.execute(args, project),
        }
    }
}

#[derive(Debug, Parser)]
pub struct CatalogArgs {
    /// Catalog file (.toml or .json) to load. Repeatable; later catalogs
    /// append after earlier ones. Defaults to the configured catalogs, or
    /// the builtin catalog when none are configured.
    #[arg(long = "catalog", value_name = "FILE")]
    catalogs: Vec<PathBuf>,
}

impl CatalogArgs {
    fn load(&self, settings: &Settings, project_root: &Path) -> Result<TagHelperCollection> {
        let paths = if self.catalogs.is_empty() {
            settings.catalog_paths(project_root)
        } else {
            self.catalogs
                .iter()
                .map(|path| project_root.join(path))
                .collect()
        };

        if paths.is_empty() {
            tracing::debug!("no catalogs given, using builtin tag helpers");
            return Ok(builtin_tag_helpers());
        }

        let collection = catalog::load_all(&paths).context("Failed to load catalogs")?;
        tracing::info!(
            catalogs = paths.len(),
            tag_helpers = collection.len(),
            "loaded catalogs"
        );
        Ok(collection)
    }
}

fn plural<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
