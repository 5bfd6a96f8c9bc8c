use crate::config::load_config;
use crate::geometry::{Orientation, Position};
use crate::layout::compute_layout;
use crate::layout_dump::{LayoutDump, QueryDump, write_layout_dump};
use crate::parser::parse_segments;
use crate::pointer::locate;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tlay", version, about = "Lay out timeline segments along an axis")]
pub struct Args {
    /// Segment list (JSON, JSON5 or '<timestamp> <count>' lines) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout JSON. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Axis length in pixels
    #[arg(short = 'l', long = "length")]
    pub length: Option<f64>,

    /// Axis orientation (vertical|horizontal)
    #[arg(long = "orientation")]
    pub orientation: Option<Orientation>,

    /// Pointer position to resolve, either '<main axis>' or '<x>,<y>'. Repeatable.
    #[arg(short = 'q', long = "query", allow_hyphen_values = true)]
    pub queries: Vec<String>,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    if let Some(length) = args.length {
        config.layout.line_segment = length;
    }
    if let Some(orientation) = args.orientation {
        config.layout.orientation = orientation;
    }

    let input = read_input(args.input.as_deref())?;
    let timeline = parse_segments(&input)?;
    let layout = compute_layout(&timeline, &config.layout)?;

    let mut dump = LayoutDump::from_layout(&layout);
    for query in &args.queries {
        let position: Position = query.parse()?;
        let hit = locate(&layout, &position, config.pointer.label_format)?;
        dump.queries.push(QueryDump {
            query: query.clone(),
            hit,
        });
    }

    match args.output.as_deref() {
        Some(path) => write_layout_dump(path, &dump)?,
        None => println!("{}", serde_json::to_string_pretty(&dump)?),
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
