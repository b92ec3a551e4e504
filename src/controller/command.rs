use std::path::PathBuf;

use clap::Subcommand;
use uuid::Uuid;

/// What the binary should do once configured. Defaults to `serve`.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the web interface
    Serve,
    /// Print the gallery, newest first
    List {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Print the distinct years, newest first
    Years,
    /// Print the special memories
    Special,
    /// Upload an image and save it as a new memory
    Add {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        description: String,
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        special: bool,
    },
    /// Change some fields of a memory
    Update {
        id: Uuid,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, action = clap::ArgAction::Set)]
        special: Option<bool>,
    },
    /// Flip the special flag of a memory
    Toggle { id: Uuid },
    /// Remove a memory
    Delete { id: Uuid },
    /// Write a backup file
    Export {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Replace the collection with a backup file
    Import { file: PathBuf },
}
