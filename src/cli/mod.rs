//! CLI module - Command-line interface for mikrogen
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::export::ExportFormat;

/// mikrogen - hotspot user batch generator
/// Generates RouterOS hotspot credentials and keeps an audit trail of every batch
#[derive(Parser)]
#[command(name = "mikrogen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "web")]
    Serve,

    /// Generate a batch and print the router commands
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Work with the generation activity log
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Username prefix; the index is appended
    #[arg(long)]
    pub base_name: String,

    /// First three octets (`10.0.0`) or a full start address (`10.0.0.5`)
    #[arg(long)]
    pub base_ip: String,

    #[arg(long, default_value = "")]
    pub comment: String,

    #[arg(long, default_value_t = 1)]
    pub start: i32,

    #[arg(long)]
    pub end: i32,

    /// Password length
    #[arg(long, default_value_t = 8)]
    pub length: usize,

    /// Comma-separated character classes: upper, lower, numbers, special
    #[arg(long, default_value = "upper,lower,numbers")]
    pub chars: String,

    /// Record the batch in the activity log as this user
    #[arg(long = "as", value_name = "USERNAME")]
    pub as_user: Option<String>,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user account
    Create {
        username: String,
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        admin: bool,
    },
    /// List user accounts
    #[command(alias = "ls")]
    List,
    /// Delete a user account and its activity history
    #[command(alias = "rm")]
    Delete { username: String },
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Export every activity record
    Export {
        #[arg(long, default_value = "csv", value_parser = parse_format)]
        format: ExportFormat,
        /// Output file; defaults to the generated export filename
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn parse_format(raw: &str) -> Result<ExportFormat, String> {
    raw.parse()
}

pub use commands::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "mikrogen",
            "generate",
            "--base-name",
            "guest",
            "--base-ip",
            "10.0.0",
            "--end",
            "5",
            "--chars",
            "upper,numbers",
        ])
        .unwrap();

        let Some(Commands::Generate(args)) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.start, 1);
        assert_eq!(args.end, 5);
        assert_eq!(args.length, 8);
        assert!(args.as_user.is_none());
    }

    #[test]
    fn test_parse_activity_export() {
        let cli = Cli::try_parse_from(["mikrogen", "activity", "export", "--format", "xlsx"])
            .unwrap();
        let Some(Commands::Activity {
            command: ActivityCommands::Export { format, output },
        }) = cli.command
        else {
            panic!("expected activity export");
        };
        assert_eq!(format, ExportFormat::Xlsx);
        assert!(output.is_none());

        assert!(Cli::try_parse_from(["mikrogen", "activity", "export", "--format", "pdf"]).is_err());
    }
}
