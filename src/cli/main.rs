#![warn(clippy::all, clippy::pedantic)]
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use csv::Writer;
use linkgraph_mcf::{LinkFlow, LinkGraph, LinkGraphSettings, Station, StationId};
use log::LevelFilter;
use serde::Deserialize;
use simplelog::{ColorChoice, Config, TerminalMode, TermLogger};

#[derive(Debug, Parser)]
#[command(author, version, about = "Distribute cargo demand over a link graph")]
struct Cli {
    /// CSV file with `station,x,y,supply,acceptance` rows
    #[arg(long)]
    stations: PathBuf,

    /// CSV file with `from,to,capacity` rows
    #[arg(long)]
    links: PathBuf,

    /// Where to write the resulting flows, stdout if omitted
    #[arg(long)]
    output: Option<PathBuf>,

    /// Divisor applied to demand when pushing flow
    #[arg(long, default_value_t = LinkGraphSettings::DEFAULT_ACCURACY)]
    accuracy: u32,

    /// Percentage of link capacity the shortest path pass may fill
    #[arg(long, default_value_t = LinkGraphSettings::DEFAULT_SATURATION)]
    saturation: u32,

    /// Ceiling on iterations of the second pass
    #[arg(long, default_value_t = LinkGraphSettings::DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
struct StationRecord {
    station: StationId,
    x: u32,
    y: u32,
    supply: u32,
    acceptance: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct LinkRecord {
    from: StationId,
    to: StationId,
    capacity: u32,
}

fn read_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = csv::Reader::from_reader(file);
    let rows: Result<Vec<T>, _> = rdr.deserialize().collect();
    Ok(rows?)
}

fn write_csv<W: io::Write>(flows: &[LinkFlow], writer: W) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(writer);
    for flow in flows {
        wtr.serialize(flow)?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level: LevelFilter = cli.log_level.parse().map_err(|e| format!("{e}"))?;
    TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)
        .map_err(|e| e.to_string())?;

    let settings = LinkGraphSettings::default()
        .with_accuracy(cli.accuracy)
        .with_saturation(cli.saturation)
        .with_max_iterations(cli.max_iterations);
    settings.validate().map_err(|e| e.to_string())?;

    let mut graph = LinkGraph::new(settings);
    for s in read_csv::<StationRecord>(&cli.stations)? {
        graph.add_station(
            s.station,
            Station {
                supply: s.supply,
                acceptance: s.acceptance,
                xy: (s.x, s.y),
            },
        );
    }
    for l in read_csv::<LinkRecord>(&cli.links)? {
        graph
            .add_link(l.from, l.to, l.capacity)
            .map_err(|e| e.to_string())?;
    }

    let flows = graph.solve().map_err(|e| e.to_string())?;

    match cli.output {
        Some(path) => write_csv(&flows, File::create(path)?),
        None => write_csv(&flows, io::stdout().lock()),
    }
}
