use clap::{Arg, ArgAction, Command};
use geo::Geometry;
use geojson::{Geometry as GeoJsonGeometry, Value as GeoJsonValue};
use std::error::Error;
use std::fs;
use std::path::Path;
use tracing::info;

use geomop::logging::init_logging;
use geomop::to_wkt::to_wkt;
use geomop::{decode_features, decode_geometry, Dispatcher, Operand, Outcome, Registry};

#[derive(Clone, Copy, PartialEq)]
enum OutputFormat {
    Wkt,
    GeoJson,
}

fn main() {
    let matches = Command::new("geomop")
        .version("0.1.0")
        .author("Jesper Fjellin")
        .about("Runs named geometry operations on GeoJSON input")
        .arg(
            Arg::new("operation")
                .num_args(1)
                .help("Operation to run (omit to list operations)"),
        )
        .arg(
            Arg::new("n")
                .num_args(1)
                .value_parser(clap::value_parser!(f64))
                .allow_negative_numbers(true)
                .help("Numeric argument for operations that take one"),
        )
        .arg(
            Arg::new("a")
                .short('a')
                .num_args(1)
                .help("Geometry A: a GeoJSON file or inline GeoJSON"),
        )
        .arg(
            Arg::new("b")
                .short('b')
                .num_args(1)
                .help("Geometry B: a GeoJSON file or inline GeoJSON"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List available operations"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .num_args(1)
                .value_parser(["wkt", "geojson"])
                .default_value("wkt")
                .help("Output format for geometry results"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .get_matches();

    init_logging(matches.get_flag("verbose"));

    let registry = Registry::builtin();
    let operation = matches.get_one::<String>("operation");

    let Some(name) = operation.filter(|_| !matches.get_flag("list")) else {
        for line in registry.list() {
            println!("{}", line);
        }
        return;
    };

    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("geojson") => OutputFormat::GeoJson,
        _ => OutputFormat::Wkt,
    };

    let result = run(
        &registry,
        name,
        matches.get_one::<String>("a").map(String::as_str),
        matches.get_one::<String>("b").map(String::as_str),
        matches.get_one::<f64>("n").copied(),
        format,
    );

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(
    registry: &Registry,
    name: &str,
    a: Option<&str>,
    b: Option<&str>,
    n: Option<f64>,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let mut dispatcher = Dispatcher::new(registry);
    let Some(operation) = dispatcher.find(name) else {
        return Err(format!("Unknown operation: {}", name).into());
    };

    let a_text = read_input(a.ok_or("geometry A is required (-a)")?)?;
    let features = decode_features(&a_text)?;
    let b = match b {
        Some(source) => Some(Operand::new(decode_geometry(&read_input(source)?)?)),
        None => None,
    };
    info!(features = features.len(), operation = name, "evaluating");

    for feature in features {
        let a = Operand::new(feature.geometry);
        let outcome = dispatcher.execute(operation, &a, b.as_ref(), n)?;
        print_outcome(&outcome, format)?;
    }
    Ok(())
}

/// Contents of `source` when it names an existing file, otherwise the
/// argument itself.
fn read_input(source: &str) -> Result<String, Box<dyn Error>> {
    let path = Path::new(source);
    if path.is_file() {
        Ok(fs::read_to_string(path)?)
    } else {
        Ok(source.to_string())
    }
}

fn to_geojson(geometry: &Geometry<f64>) -> Result<String, Box<dyn Error>> {
    let geometry = GeoJsonGeometry::new(GeoJsonValue::from(geometry));
    Ok(serde_json::to_string(&geometry)?)
}

fn print_outcome(outcome: &Outcome, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match (outcome, format) {
        (Outcome::Geometry(Some(geometry)), OutputFormat::GeoJson) => {
            println!("{}", to_geojson(geometry)?);
        }
        (Outcome::GeometryList(list), OutputFormat::GeoJson) => {
            for geometry in list {
                println!("{}", to_geojson(geometry)?);
            }
        }
        (Outcome::GeometryList(list), OutputFormat::Wkt) => {
            for geometry in list {
                println!("{}", to_wkt(geometry));
            }
        }
        _ => println!("{}", outcome),
    }
    Ok(())
}
