mod commands;
mod render;
mod session;

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use homecal_core::{HomecalConfig, YearMonth};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::commands::edit::EventArgs;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "homecal", version)]
#[command(about = "A shared calendar and link board for your household")]
struct Cli {
    /// Use this data file instead of the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// IANA time zone to show times in (e.g. "Europe/Berlin")
    #[arg(long, global = true)]
    zone: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid and the month's events
    Month {
        /// Month to show (YYYY-MM); defaults to the current month
        #[arg(short, long)]
        month: Option<YearMonth>,
    },
    /// Show one day hour by hour
    Day {
        /// Date (YYYY-MM-DD); defaults to today
        date: Option<NaiveDate>,
    },
    /// List events that have not ended yet
    Upcoming {
        /// Show at most this many events
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Search events, or links with --links
    Search {
        query: String,

        #[arg(long)]
        links: bool,
    },
    /// Add an event
    Add {
        title: String,

        #[command(flatten)]
        event: EventArgs,
    },
    /// Change an existing event
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[command(flatten)]
        event: EventArgs,
    },
    /// Delete an event
    Delete { id: String },
    /// List shared links
    Links {
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Share a link with the household
    Share {
        url: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },
    /// Comment on a shared link
    Comment { link_id: String, message: String },
    /// Move a shared link to another category
    Categorize { link_id: String, category: String },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = HomecalConfig::load()?;
    if let Some(data) = cli.data {
        config.data_file = data;
    }
    if let Some(zone) = cli.zone {
        config.time_zone = Some(zone);
    }

    let session = Session::open(&config)?;
    let now = Utc::now();
    let today = now.with_timezone(&session.zone).date_naive();

    match cli.command {
        Commands::Month { month } => commands::month::run(&session, month, now),
        Commands::Day { date } => commands::day::run(&session, date, now),
        Commands::Upcoming { limit } => commands::upcoming::run(&session, limit, now),
        Commands::Search { query, links } => commands::search::run(&session, &query, links),
        Commands::Add { title, event } => commands::edit::add(&session, title, &event, today),
        Commands::Edit { id, title, event } => commands::edit::edit(&session, &id, title, &event),
        Commands::Delete { id } => commands::delete::run(&session, &id),
        Commands::Links { category } => commands::links::list(&session, category.as_deref()),
        Commands::Share {
            url,
            title,
            category,
        } => commands::links::share(&session, &url, title, category, now),
        Commands::Comment { link_id, message } => {
            commands::links::comment(&session, &link_id, &message, now)
        }
        Commands::Categorize { link_id, category } => {
            commands::links::categorize(&session, &link_id, &category)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HOMECAL_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "homecal=debug,info"
        } else {
            "homecal=info,warn"
        })
    });

    let format = env::var("HOMECAL_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_writer(std::io::stderr).with_ansi(false))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}
