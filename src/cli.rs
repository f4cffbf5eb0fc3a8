use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::load_config;
use crate::dump::{build_dump, write_dump};
use crate::ir::{Diagram, measure_tables};
use crate::layout::{auto_layout, resolve_overlaps};

/// Lay out an ER diagram and route its relationships.
#[derive(Parser, Debug)]
#[command(name = "erdl", version, about = "ER diagram auto-layout and orthogonal edge routing")]
pub struct Args {
    /// Input diagram JSON (tables and relationships); '-' or absent reads stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file; defaults to stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config file (JSON or JSON5) overriding layout, routing and theme defaults
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Keep the input positions and only push overlapping tables apart
    #[arg(long = "keep-positions")]
    pub keep_positions: bool,

    /// Pretty-print the output JSON
    #[arg(long = "pretty")]
    pub pretty: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let mut diagram: Diagram =
        serde_json::from_str(&input).context("parsing diagram JSON")?;
    diagram.validate()?;

    measure_tables(&mut diagram.tables, &config.layout);
    if args.keep_positions {
        resolve_overlaps(&mut diagram.tables, &config.layout.collision);
    } else {
        diagram.tables = auto_layout(&diagram.tables, &diagram.relationships, &config.layout);
    }

    let dump = build_dump(&diagram, &config.layout, &config.theme);
    write_dump(&dump, args.output.as_deref(), args.pretty)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading input file {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading diagram from stdin")?;
            Ok(buffer)
        }
    }
}
