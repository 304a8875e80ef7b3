// Copyright 2021 The Simlin Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use log::{LevelFilter, Log, Metadata, Record, debug};

use contam_prj::prj::RawSection;
use contam_prj::{CsvPathFlows, IndexModel, TimeSeries, open_prj};

const EXIT_FAILURE: i32 = 1;

/// Read, check and convert CONTAM project files
#[derive(Parser, Debug)]
#[command(name = "contam", version)]
struct Args {
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a project and report what it contains
    Check { path: PathBuf },
    /// Read a project and write it back out
    Roundtrip {
        path: PathBuf,
        /// Output file, stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the project as JSON
    Dump { path: PathBuf },
    /// Print infiltration per zone, or per path with --paths, as TSV
    Infiltration {
        path: PathBuf,
        /// Path flow results with a leading time column
        #[arg(short, long)]
        results: PathBuf,
        /// Field delimiter of the results file
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
        /// Comma-separated path numbers
        #[arg(short, long, value_delimiter = ',')]
        paths: Vec<i32>,
    },
}

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level().as_str().to_lowercase(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match verbose {
        _ if quiet => LevelFilter::Error,
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let logger = Box::new(StderrLogger { level });
    if log::set_boxed_logger(logger).is_ok() {
        log::set_max_level(level);
    }
}

fn open_model(path: &Path) -> anyhow::Result<IndexModel> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let model = open_prj(&mut reader).with_context(|| format!("reading {}", path.display()))?;
    Ok(model)
}

fn check(path: &Path) -> anyhow::Result<()> {
    let model = open_model(path)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{}: valid {} {} project", path.display(), model.name(), model.version())?;
    let counts = [
        ("contaminants", model.contaminants().len()),
        ("species", model.species().len()),
        ("levels", model.levels().len()),
        ("day schedules", model.day_schedules().len()),
        ("week schedules", model.week_schedules().len()),
        ("wind pressure profiles", model.wind_pressure_profiles().len()),
        ("airflow elements", model.airflow_elements().len()),
        ("control nodes", model.control_nodes().len()),
        ("simple AHS", model.ahs().len()),
        ("zones", model.zones().len()),
        ("airflow paths", model.airflow_paths().len()),
    ];
    for (label, count) in counts {
        writeln!(out, "  {count:>6} {label}")?;
    }
    let opaque = RawSection::ALL
        .iter()
        .filter(|section| model.raw_section(**section).lines().count() > 1)
        .count();
    writeln!(out, "  {opaque:>6} non-empty uninterpreted sections")?;
    Ok(())
}

fn roundtrip(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let model = open_model(path)?;
    match output {
        Some(output) => model
            .write_to(output)
            .with_context(|| format!("writing {}", output.display()))?,
        None => io::stdout().lock().write_all(model.to_string().as_bytes())?,
    }
    Ok(())
}

fn dump(path: &Path) -> anyhow::Result<()> {
    let model = open_model(path)?;
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &model)?;
    writeln!(out)?;
    Ok(())
}

fn print_tsv(header: &[String], series: &[TimeSeries], times: &[f64]) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "time\t{}", header.join("\t"))?;
    for (i, time) in times.iter().enumerate() {
        write!(out, "{time}")?;
        for s in series {
            write!(out, "\t{}", s.values.get(i).copied().unwrap_or(0.0))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn infiltration(
    path: &Path,
    results: &Path,
    delimiter: char,
    paths: &[i32],
) -> anyhow::Result<()> {
    if !delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, not '{delimiter}'");
    }
    let model = open_model(path)?;
    let flows = CsvPathFlows::from_path(results, delimiter as u8)
        .with_context(|| format!("loading results {}", results.display()))?;
    debug!("results contain paths {:?}", flows.path_numbers());

    if paths.is_empty() {
        let series = model.zone_infiltration(&flows);
        let header: Vec<String> = model.zones().iter().map(|zone| zone.name.clone()).collect();
        let times = series.first().map(|s| s.times.clone()).unwrap_or_default();
        print_tsv(&header, &series, &times)
    } else {
        let series = model.path_infiltration(paths, &flows);
        let header: Vec<String> = paths.iter().map(|nr| format!("path {nr}")).collect();
        let times = series.first().map(|s| s.times.clone()).unwrap_or_default();
        print_tsv(&header, &series, &times)
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Check { path } => check(&path),
        Command::Roundtrip { path, output } => roundtrip(&path, output.as_deref()),
        Command::Dump { path } => dump(&path),
        Command::Infiltration {
            path,
            results,
            delimiter,
            paths,
        } => infiltration(&path, &results, delimiter, &paths),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);
    if let Err(err) = run(args) {
        eprintln!("error: {err:#}");
        std::process::exit(EXIT_FAILURE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_infiltration() {
        let args = Args::try_parse_from([
            "contam",
            "infiltration",
            "office.prj",
            "--results",
            "flows.tsv",
            "--delimiter",
            "\t",
            "--paths",
            "1,3",
        ])
        .unwrap();
        match args.command {
            Command::Infiltration {
                delimiter, paths, ..
            } => {
                assert_eq!('\t', delimiter);
                assert_eq!(vec![1, 3], paths);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_roundtrip_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.prj");
        let output = dir.path().join("out.prj");
        let mut model = IndexModel::new();
        model.set_valid(true);
        let text = model.to_string();
        std::fs::write(&input, &text).unwrap();
        roundtrip(&input, Some(&output)).unwrap();
        assert_eq!(text, std::fs::read_to_string(&output).unwrap());
    }

    #[test]
    fn test_missing_file() {
        let err = open_model(Path::new("/nonexistent/model.prj")).unwrap_err();
        assert!(format!("{err:#}").contains("opening"));
    }
}
