use std::io::{stdout, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::{debug, info, warn};
use tracing_subscriber::filter::LevelFilter;

mod error;
mod map;
mod orbit;

use error::Result;
use map::OrbitMap;

const YOU: &str = "YOU";
const SANTA: &str = "SAN";

/// Printed in place of a transfer count when the two bodies share no ancestor.
const NO_TRANSFER: i64 = -2;

#[derive(Debug, StructOpt)]
struct Opts {
    /// File containing one CENTRE)OBJECT orbit per line
    #[structopt(parse(from_os_str), default_value = "data.txt")]
    input: PathBuf,

    /// Increase logging, up to -ddd
    #[structopt(short, long, parse(from_occurrences))]
    debug: u8,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(filter)
        .with_target(false)
        .init();
}

/// Write the total orbit count, then the transfers between `from` and `to`.
///
/// Each line is written as soon as it is known, so a failed transfer query
/// still leaves the total on `output`.
fn report(map: &OrbitMap, from: &str, to: &str, output: &mut impl Write) -> Result<()> {
    info!(
        "Map has {} bodies in {} trees",
        map.len(),
        map.roots().count()
    );

    writeln!(output, "{}", map.total_orbits())?;

    for name in &[from, to] {
        if let Some(body) = map.find(name) {
            debug!("{}", map.describe_path(body));
        }
    }

    match map.orbit_transfers(from, to)? {
        Some(transfers) => writeln!(output, "{}", transfers)?,
        None => {
            warn!("{} and {} orbit bodies in separate trees", from, to);
            writeln!(output, "{}", NO_TRANSFER)?;
        }
    }

    Ok(())
}

fn run(opts: &Opts, output: &mut impl Write) -> Result<()> {
    let map = OrbitMap::load(&opts.input)?;
    report(&map, YOU, SANTA, output)
}

fn main() {
    let opts = Opts::from_args();
    setup_logging(opts.debug);

    if let Err(error) = run(&opts, &mut stdout().lock()) {
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}
