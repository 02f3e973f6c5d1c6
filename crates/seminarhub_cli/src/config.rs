//! Command-line configuration.
//!
//! Every global option can also be supplied through a `SEMINARHUB_*`
//! environment variable.

use clap::{Args, Parser, Subcommand};
use seminarhub_core::{Requester, SeminarForm};

#[derive(Parser, Debug)]
#[command(name = "seminarhub")]
#[command(version, about = "Create, browse and join seminars")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Path to the SQLite database
    #[arg(long, env = "SEMINARHUB_DB", global = true, default_value = "seminarhub.sqlite3")]
    pub db: String,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, env = "SEMINARHUB_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SEMINARHUB_LOG", global = true)]
    pub log_level: Option<String>,

    /// Stable id of the acting user, as issued by the identity provider
    #[arg(long, env = "SEMINARHUB_USER_ID", global = true, default_value = "")]
    pub user_id: String,

    /// Display name of the acting user
    #[arg(long, env = "SEMINARHUB_USER_NAME", global = true, default_value = "")]
    pub user_name: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    pub fn requester(&self) -> Requester {
        let user_name = if self.user_name.is_empty() {
            self.user_id.clone()
        } else {
            self.user_name.clone()
        };
        Requester::new(self.user_id.clone(), user_name)
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List seminar categories
    Categories,
    /// List every seminar
    List,
    /// List seminars the acting user joined
    Joined,
    /// Show one seminar
    Details { id: i64 },
    /// Create a seminar organized by the acting user
    Create(FormArgs),
    /// Re-apply every field of a seminar the acting user organizes
    Edit {
        id: i64,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a seminar the acting user organizes
    Delete { id: i64 },
    /// Join a seminar
    Join { id: i64 },
    /// Leave a seminar
    Leave { id: i64 },
    /// List participants of a seminar
    Roster { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    #[arg(long)]
    pub topic: String,
    #[arg(long)]
    pub lecturer: String,
    #[arg(long)]
    pub details: String,
    /// Start time as dd/MM/yyyy HH:mm
    #[arg(long = "date-time")]
    pub date_and_time: String,
    /// Length in minutes (30-180)
    #[arg(long, allow_negative_numbers = true)]
    pub duration: i32,
    #[arg(long)]
    pub category: i64,
}

impl From<FormArgs> for SeminarForm {
    fn from(value: FormArgs) -> Self {
        Self {
            topic: value.topic,
            lecturer: value.lecturer,
            details: value.details,
            date_and_time: value.date_and_time,
            duration: value.duration,
            category_id: value.category,
        }
    }
}
