use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "paytui")]
#[command(version, about = "Payment details in the terminal with one-key copy", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Payment page TOML to use instead of the built-in one
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the payment page
    Show {
        /// Emit the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// Copy a field to the clipboard by label, "Section / Label" or value
    Copy { query: String },
}
