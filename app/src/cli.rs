//! FILENAME: app/src/cli.rs
// PURPOSE: Command-line front end: load the table, replay the requested
//          filter events through a session, print the result as JSON.

use std::path::PathBuf;

use clap::Parser;
use crossfilter_engine::FilterEvent;
use dataset::CategoricalColumn;
use log::LevelFilter;
use serde::Serialize;
use smallvec::SmallVec;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::logging;
use crate::session::{AppState, Session};
use crate::log_info;

#[derive(Debug, Clone, Parser)]
#[command(name = "windscope", version, about = "Explore the UK onshore wind farm table")]
pub struct Cli {
    /// CSV export of the wind farm table
    #[arg(long)]
    pub data: PathBuf,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Grouping column (country, operator, developer, ...)
    #[arg(long)]
    pub group_by: Option<String>,

    /// Selected value of the grouping column; repeat for a multi-select
    #[arg(long = "select")]
    pub select: Vec<String>,

    /// First commissioning year, inclusive
    #[arg(long)]
    pub from_year: Option<i32>,

    /// Last commissioning year, inclusive
    #[arg(long)]
    pub to_year: Option<i32>,

    /// Print the dropdown options for the grouping column instead of a snapshot
    #[arg(long)]
    pub options: bool,

    /// Also write log lines to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionsOutput<'a> {
    grouping_column: CategoricalColumn,
    options: Vec<String>,
    selected: Vec<&'a str>,
}

impl Cli {
    /// Filter events implied by the arguments, in the order the UI would
    /// raise them: grouping column first, then selection, then years.
    pub fn events(&self) -> Result<Vec<FilterEvent>, AppError> {
        let mut events = Vec::new();

        if let Some(column) = &self.group_by {
            events.push(FilterEvent::GroupingColumnChanged(column.parse::<CategoricalColumn>()?));
        }
        if !self.select.is_empty() {
            let values: SmallVec<[String; 4]> = self.select.iter().cloned().collect();
            events.push(FilterEvent::SelectionChanged(values));
        }
        match (self.from_year, self.to_year) {
            (None, None) => {}
            (Some(min), Some(max)) => events.push(FilterEvent::YearRangeChanged { min, max }),
            (Some(min), None) => events.push(FilterEvent::YearRangeChanged { min, max: i32::MAX }),
            (None, Some(max)) => events.push(FilterEvent::YearRangeChanged { min: i32::MIN, max }),
        }

        Ok(events)
    }
}

/// Loads everything and returns the JSON document to print.
pub fn run(cli: &Cli) -> Result<String, AppError> {
    let level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    logging::init(level, cli.log_file.as_deref())?;

    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let events = cli.events()?;
    let dataset = persistence::load_csv(&cli.data, &config.column_map())?;
    log_info!("APP", "dataset ready: {} wind farms", dataset.len());

    let app = AppState::new(dataset, config);
    let mut session = app.open_session();
    replay(&mut session, &events);

    if cli.options {
        let output = OptionsOutput {
            grouping_column: session.state().grouping_column,
            options: session.options(),
            selected: session.state().selection.values(),
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    let snapshot = session.refresh();
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

/// Feeds events through the session without rendering intermediate states.
pub fn replay(session: &mut Session, events: &[FilterEvent]) {
    for event in events {
        session.begin(event);
    }
}
