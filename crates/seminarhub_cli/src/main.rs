//! Command-line front end for `seminarhub_core`.
//!
//! # Responsibility
//! - Resolve configuration and the acting user identity.
//! - Map each subcommand onto one core operation and print its result.

mod config;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{Cli, Command};
use seminarhub_core::db::open_db;
use seminarhub_core::{
    default_log_level, init_logging, CategoryService, ParticipationService, SeminarService,
    SeminarServiceError, SeminarSummary, SqliteCategoryRepository, SqliteParticipationRepository,
    SqliteSeminarRepository,
};
use serde::Serialize;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global = &cli.global;

    if let Some(log_dir) = global.log_dir.as_deref() {
        let level = global.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let conn = open_db(&global.db).with_context(|| format!("failed to open `{}`", global.db))?;
    let categories = SqliteCategoryRepository::try_new(&conn)?;
    let registry = SeminarService::new(SqliteSeminarRepository::try_new(&conn)?, categories);
    let ledger = ParticipationService::new(SqliteParticipationRepository::try_new(&conn)?);
    let requester = global.requester();

    match cli.command {
        Command::Categories => {
            let catalog = CategoryService::new(categories).list()?;
            if global.json {
                print_json(&catalog)?;
            } else {
                for category in catalog {
                    println!("{:>4}  {}", category.id, category.name);
                }
            }
        }
        Command::List => print_summaries(&registry.list_all()?, global.json)?,
        Command::Joined => print_summaries(&ledger.list_joined(&requester.user_id)?, global.json)?,
        Command::Details { id } => {
            let detail = registry.get_details(id).map_err(report)?;
            if global.json {
                print_json(&detail)?;
            } else {
                println!("#{} {}", detail.id, detail.topic);
                println!("  lecturer:  {}", detail.lecturer);
                println!("  when:      {} ({} min)", detail.date_and_time, detail.duration);
                println!("  category:  {}", detail.category);
                println!("  organizer: {}", detail.organizer);
                println!("  {}", detail.details);
            }
        }
        Command::Create(form) => {
            let seminar = registry.create(&form.into(), &requester).map_err(report)?;
            println!("created seminar {}", seminar.id);
        }
        Command::Edit { id, form } => {
            registry
                .update(id, &form.into(), &requester.user_id)
                .map_err(report)?;
            println!("updated seminar {id}");
        }
        Command::Delete { id } => {
            registry.delete(id, &requester.user_id).map_err(report)?;
            println!("deleted seminar {id}");
        }
        Command::Join { id } => {
            ledger.join(id, &requester)?;
            println!("joined seminar {id}");
        }
        Command::Leave { id } => {
            ledger.leave(id, &requester)?;
            println!("left seminar {id}");
        }
        Command::Roster { id } => {
            let roster = ledger.roster(id)?;
            if global.json {
                print_json(&roster)?;
            } else {
                for user in roster {
                    println!("{}  {}", user.user_id, user.user_name);
                }
            }
        }
    }

    Ok(())
}

/// Expands validation failures into one line per field.
fn report(err: SeminarServiceError) -> anyhow::Error {
    match err {
        SeminarServiceError::Validation(errors) => {
            let lines: Vec<String> = errors
                .errors()
                .iter()
                .map(|error| format!("  {error}"))
                .collect();
            anyhow!("seminar form rejected:\n{}", lines.join("\n"))
        }
        other => other.into(),
    }
}

fn print_summaries(summaries: &[SeminarSummary], json: bool) -> Result<()> {
    if json {
        return print_json(&summaries);
    }
    for summary in summaries {
        println!(
            "{:>4}  {}  {}  [{}]  by {}  lecturer {}",
            summary.id,
            summary.date_and_time,
            summary.topic,
            summary.category,
            summary.organizer,
            summary.lecturer
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
