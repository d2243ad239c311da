use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::plural;
use crate::commands::CatalogArgs;
use crate::commands::Command;
use crate::commands::Project;
use crate::exit::Exit;

#[derive(Debug, Parser)]
pub struct Merge {
    #[command(flatten)]
    catalogs: CatalogArgs,

    /// Also list the merged tag helpers in order.
    #[arg(long)]
    list: bool,
}

impl Command for Merge {
    fn execute(&self, _args: &Args, project: &Project) -> Result<Exit> {
        let collection = project.load_collection(&self.catalogs)?;

        if self.list {
            for descriptor in &collection {
                println!("{}", descriptor.display_name());
            }
        }

        let count = collection.len();
        println!("{count} {}", plural(count, "tag helper", "tag helpers"));
        println!("checksum {}", collection.checksum().to_hex());
        Ok(Exit::success())
    }
}
