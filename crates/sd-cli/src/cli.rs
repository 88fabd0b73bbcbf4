use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "safe-disclosure")]
#[command(about = "Redact sensitive entities with reversible tokens and role policies", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact a document for a target role
    Redact {
        /// Document to redact
        input: PathBuf,

        /// Where to write the redacted document
        output: PathBuf,

        /// Target role for the redacted document
        #[arg(long)]
        role: String,

        /// Configuration file (JSON, or TOML by extension)
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON file of custom entities: {"type": ["value", ...]}
        #[arg(long)]
        entities: Option<PathBuf>,

        /// Save the token map to this JSON file
        #[arg(long)]
        save_tokens: Option<PathBuf>,
    },

    /// Restore redacted content the requester role may see
    Restore {
        /// Redacted document
        input: PathBuf,

        /// Token map saved by `redact --save-tokens`
        tokens: PathBuf,

        /// Where to write the restored document
        output: PathBuf,

        /// Requester role
        #[arg(long)]
        role: String,

        /// Configuration file (JSON, or TOML by extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available roles and their permissions
    ListRoles {
        /// Configuration file (JSON, or TOML by extension)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a sample configuration file
    GenerateConfig {
        /// Output path; a .toml extension selects TOML, anything else JSON
        output: PathBuf,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
