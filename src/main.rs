use std::{
    fmt::Display,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err::File;
use log::info;
use nfl_pickem_scraping::{fs_json_util::write_json, parser};
use serde::Serialize;

/// Extracts games from a saved NFL schedule page and prints them as JSON.
#[derive(Parser)]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scheduled games with their kickoff times.
    Schedule {
        /// NFL season year.  January games are reported in this year too.
        #[arg(long, short)]
        year: i32,
        #[command(flatten)]
        args: IoArgs,
    },
    /// Final scores of the games that have been played.
    Results {
        #[command(flatten)]
        args: IoArgs,
    },
}

#[derive(clap::Args)]
struct IoArgs {
    /// HTML page to read, or `-` for standard input.
    input: PathBuf,
    /// Write the JSON here instead of standard output.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let opts = Opts::parse();
    match opts.command {
        Command::Schedule { year, args } => {
            let matchups = parser::schedule::parse(year, open(&args.input)?)
                .with_context(|| format!("While parsing the schedule in {:?}", args.input))?;
            emit(&args, &matchups)
        }
        Command::Results { args } => {
            let results = parser::results::parse(open(&args.input)?)
                .with_context(|| format!("While parsing the results in {:?}", args.input))?;
            emit(&args, &results)
        }
    }
}

fn open(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    Ok(if path == Path::new("-") {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(path)?))
    })
}

fn emit<T: Display + Serialize>(args: &IoArgs, records: &[T]) -> anyhow::Result<()> {
    for record in records {
        info!("{record}");
    }
    info!("Found {} games.", records.len());
    match &args.output {
        Some(path) => {
            write_json(path, &records)?;
            info!("Successfully saved data to {path:?}.");
        }
        None => println!("{}", serde_json::to_string_pretty(&records)?),
    }
    Ok(())
}
