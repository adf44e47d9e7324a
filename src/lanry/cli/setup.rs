use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use lanry::upload::AgeRating;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lanry", bin_name = "lanry", version)]
#[command(about = "Write light-novel chapters as plain files and publish them to Lanry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding Chapters/, lanry.json and .env (default: $LANRY_HOME or cwd)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List chapters
    #[command(alias = "ls", display_order = 1)]
    List,

    /// Add a new, empty chapter
    #[command(alias = "n", display_order = 2)]
    Add {
        /// Chapter number (1 and up)
        id: u32,

        /// Title words (joined with spaces)
        #[arg(trailing_var_arg = true)]
        title: Vec<String>,
    },

    /// Print one or more chapters
    #[command(alias = "v", display_order = 3)]
    View {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u32>,
    },

    /// Replace a chapter body with a file or stdin
    #[command(alias = "w", display_order = 4)]
    Write {
        id: u32,

        /// Read the body from this file instead of stdin
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,
    },

    /// Edit a chapter in $EDITOR
    #[command(alias = "e", display_order = 5)]
    Edit { id: u32 },

    /// Print the file path of one or more chapters
    #[command(display_order = 6)]
    Path {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u32>,
    },

    /// Export chapters to a tar.gz archive (or one chapter as text with --plain)
    #[command(display_order = 7)]
    Export {
        /// Chapters to export; all when omitted
        #[arg(num_args = 0..)]
        ids: Vec<u32>,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Write a single chapter body as plain text
        #[arg(long)]
        plain: bool,
    },

    /// Log in and publish a chapter to a novel on Lanry
    #[command(display_order = 8)]
    Upload {
        id: u32,

        /// Novel id on Lanry
        #[arg(long, value_name = "ID")]
        novel: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account password (default: $LANRY_PASSWORD)
        #[arg(long, env = "LANRY_PASSWORD", hide_env_values = true)]
        password: String,

        /// EVERYONE, TEEN, MATURE or ADULT (default from config)
        #[arg(long, value_parser = parse_age_rating)]
        age_rating: Option<AgeRating>,

        /// Scheduled publication, RFC 3339 or YYYY-MM-DD
        #[arg(long, value_parser = parse_publish_at)]
        publish_at: Option<DateTime<Utc>>,

        /// Note from the author shown with the chapter
        #[arg(long)]
        author_thoughts: Option<String>,

        /// Volume id on Lanry
        #[arg(long)]
        volume: Option<String>,
    },

    /// Create the chapters directory and a lanry.json
    #[command(display_order = 20)]
    Init,

    /// Show the effective configuration
    #[command(display_order = 21)]
    Config,
}

fn parse_age_rating(s: &str) -> Result<AgeRating, String> {
    s.parse().map_err(|e: lanry::error::LanryError| e.to_string())
}

fn parse_publish_at(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date '{}': use RFC 3339 or YYYY-MM-DD", s))
}
