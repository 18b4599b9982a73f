//! Command execution

use crate::cli::{BatchArgs, Command, Settings};
use crate::error::CliError;
use crate::geojson::FeatureCollection;
use crate::report::{MetricsSummary, SimplifyReport};
use serde::Serialize;
use shapeshifter_lib::{AlgorithmKind, BatchOutput, GeometryCollection, Simplifier, evaluate};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Run the parsed command
pub fn run(settings: Settings) -> Result<(), CliError> {
    #[cfg(feature = "profiling")]
    profiling::scope!("shapeshifter::run");

    match settings.command {
        Command::Simplify(args) => simplify(&args),
        Command::Metrics(args) => metrics(&args),
        Command::Algorithms => list_algorithms(&mut std::io::stdout().lock()),
    }
}

fn simplify(args: &BatchArgs) -> Result<(), CliError> {
    let (source, _, output) = run_batch(args)?;
    let report = SimplifyReport::new(&source, &output);
    write_report(args, &report)
}

fn metrics(args: &BatchArgs) -> Result<(), CliError> {
    let (_, original, output) = run_batch(args)?;
    let report = evaluate(&original, &output.table)?;
    tracing::info!(
        original_vertices = report.original_vertices,
        perimeter = report.perimeter,
        "Computed metrics"
    );
    write_report(args, &MetricsSummary::new(&report, &output))
}

/// Load the input and run every requested combination
fn run_batch(
    args: &BatchArgs,
) -> Result<(FeatureCollection, GeometryCollection, BatchOutput), CliError> {
    let source = read_input(&args.input)?;
    let original = source.to_geometries()?;
    tracing::info!(
        path = %args.input.display(),
        features = original.len(),
        vertices = shapeshifter_lib::count_vertices(&original),
        "Loaded input"
    );

    let simplifier = Simplifier::new(args.config())?;
    let output = simplifier.run_batch(&original, &args.algorithms, &args.tolerances)?;
    Ok((source, original, output))
}

fn read_input(path: &Path) -> Result<FeatureCollection, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    FeatureCollection::from_json(&text)
}

fn write_report<T: Serialize>(args: &BatchArgs, report: &T) -> Result<(), CliError> {
    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_json(&mut writer, report, args.pretty)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "Report written");
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_json(&mut stdout, report, args.pretty)?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(writer, value)?;
    } else {
        serde_json::to_writer(writer, value)?;
    }
    Ok(())
}

fn list_algorithms<W: Write>(writer: &mut W) -> Result<(), CliError> {
    for algorithm in AlgorithmKind::ALL {
        writeln!(writer, "{:<26} {}", algorithm.as_str(), algorithm.alias())?;
    }
    Ok(())
}
