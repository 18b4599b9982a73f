use clap::{Args, Parser, Subcommand};
use shapeshifter_lib::{
    AlgorithmKind, AlgorithmParams, Config, ImprovedDouglasPeuckerParams, LangParams,
};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Shapeshifter - Compare vector simplification algorithms on GeoJSON collections
pub struct Settings {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Simplify a collection with every algorithm and tolerance, writing the results
    Simplify(BatchArgs),
    /// Simplify a collection, then report vertex counts, positional error and perimeter
    Metrics(BatchArgs),
    /// List the available algorithms
    Algorithms,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// GeoJSON FeatureCollection to simplify
    #[clap(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Algorithms to run (name or alias, see `algorithms`)
    #[clap(
        short,
        long = "algorithm",
        value_name = "NAME",
        required = true,
        num_args = 1..,
        value_delimiter = ','
    )]
    pub algorithms: Vec<AlgorithmKind>,

    /// Tolerances to run every algorithm with
    #[clap(
        short,
        long = "tolerance",
        value_name = "VALUE",
        required = true,
        num_args = 1..,
        value_delimiter = ','
    )]
    pub tolerances: Vec<f64>,

    /// Write the JSON report here instead of stdout
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Rescale each tolerance to the algorithm's own unit
    #[clap(long, default_value = "false")]
    pub scaled: bool,

    /// Maximum worker threads (default: all cores)
    #[clap(short, long)]
    pub workers: Option<usize>,

    /// Corner angle for improved Douglas-Peucker anchors, in degrees
    #[clap(long, default_value = "60.0")]
    pub anchor_angle: f64,

    /// Minimum spacing between improved Douglas-Peucker anchors
    #[clap(long, default_value = "10.0")]
    pub anchor_distance: f64,

    /// Lookahead window of the Lang algorithm, in points
    #[clap(long, default_value = "4")]
    pub lang_lookahead: usize,

    /// Pretty-print the JSON report
    #[clap(long, default_value = "false")]
    pub pretty: bool,
}

impl BatchArgs {
    /// Simplifier configuration from the command line
    pub fn config(&self) -> Config {
        Config {
            params: AlgorithmParams {
                improved_douglas_peucker: ImprovedDouglasPeuckerParams {
                    angle_threshold: self.anchor_angle.to_radians(),
                    distance_threshold: self.anchor_distance,
                },
                lang: LangParams {
                    lookahead: self.lang_lookahead,
                },
            },
            scale_tolerances: self.scaled,
            max_workers: self.workers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Settings, clap::Error> {
        Settings::try_parse_from(std::iter::once("shapeshifter").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_simplify() {
        let settings = parse(&[
            "simplify", "-i", "in.geojson", "-a", "dp,vw", "-a", "lang", "-t", "0.5", "2",
        ])
        .unwrap();
        let Command::Simplify(args) = settings.command else {
            panic!("expected simplify");
        };
        assert_eq!(args.input, PathBuf::from("in.geojson"));
        assert_eq!(
            args.algorithms,
            vec![
                AlgorithmKind::DouglasPeucker,
                AlgorithmKind::VisvalingamWhyatt,
                AlgorithmKind::Lang
            ]
        );
        assert_eq!(args.tolerances, vec![0.5, 2.0]);
        assert_eq!(args.output, None);
        assert!(!args.scaled);
    }

    #[test]
    fn test_config_from_args() {
        let settings = parse(&[
            "metrics",
            "--input",
            "in.geojson",
            "--algorithm",
            "improved-douglas-peucker",
            "--tolerance",
            "1",
            "--scaled",
            "--workers",
            "2",
            "--lang-lookahead",
            "6",
        ])
        .unwrap();
        let Command::Metrics(args) = settings.command else {
            panic!("expected metrics");
        };
        let config = args.config();
        assert!(config.scale_tolerances);
        assert_eq!(config.max_workers, Some(2));
        assert_eq!(config.params.lang.lookahead, 6);
        assert_eq!(
            config.params.improved_douglas_peucker,
            ImprovedDouglasPeuckerParams::default()
        );
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        assert!(parse(&["simplify", "-i", "x", "-a", "bezier", "-t", "1"]).is_err());
    }

    #[test]
    fn test_algorithms_and_tolerances_required() {
        assert!(parse(&["simplify", "-i", "x", "-t", "1"]).is_err());
        assert!(parse(&["simplify", "-i", "x", "-a", "dp"]).is_err());
        assert!(parse(&["algorithms"]).is_ok());
    }
}
