use std::path::PathBuf;

use clap::Parser;

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod framework;

#[derive(Parser)]
pub struct Args {
    #[clap(short, long, default_value = "help.json")]
    /// Path to the render configuration file
    pub config: PathBuf,
    /// Path to the declarative command catalog
    #[clap(long, default_value = "commands.json")]
    pub catalog: PathBuf,
    /// Print the rendered catalog as JSON instead of a console box
    #[clap(long)]
    pub json: bool,
    /// Disable ANSI colours
    #[clap(long)]
    pub plain: bool,
}
