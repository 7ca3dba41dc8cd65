//! Command-line argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nexus-registry")]
#[command(about = "Inspect and prune a Docker repository hosted on Nexus")]
#[command(version)]
pub struct Args {
    /// Credentials file
    #[arg(
        long = "credentials",
        short = 'c',
        help = "Path to the TOML credentials file (default: ./.credentials, then NEXUS_* environment variables)"
    )]
    pub credentials: Option<PathBuf>,

    /// Verbose output
    #[arg(
        long = "verbose",
        short = 'v',
        conflicts_with = "quiet",
        help = "Log every request with its status and latency"
    )]
    pub verbose: bool,

    /// Quiet output
    #[arg(
        long = "quiet",
        short = 'q',
        help = "Print only results and errors"
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List repositories in the catalog
    Images,

    /// List tags of an image
    Tags {
        image: String,
    },

    /// Print the v2 manifest of image:tag as JSON
    Manifest {
        image: String,
        tag: String,
    },

    /// Print creation metadata of image:tag
    Info {
        image: String,
        tag: String,
    },

    /// Print the content digest of image:tag
    Digest {
        image: String,
        tag: String,
    },

    /// Delete image:tag from the registry
    Delete {
        image: String,
        tag: String,

        #[arg(long = "yes", short = 'y', help = "Confirm the deletion; it cannot be undone")]
        yes: bool,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate arguments
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.credentials {
            if !path.exists() {
                return Err(format!("Credentials file does not exist: {}", path.display()));
            }
        }

        match &self.command {
            Command::Images => {}
            Command::Tags { image } => require_value(image, "image")?,
            Command::Manifest { image, tag }
            | Command::Info { image, tag }
            | Command::Digest { image, tag } => {
                require_value(image, "image")?;
                require_value(tag, "tag")?;
            }
            Command::Delete { image, tag, yes } => {
                require_value(image, "image")?;
                require_value(tag, "tag")?;
                if !yes {
                    return Err(format!(
                        "Refusing to delete {}:{} without --yes",
                        image, tag
                    ));
                }
            }
        }

        Ok(())
    }
}

fn require_value(value: &str, name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", name));
    }
    Ok(())
}
