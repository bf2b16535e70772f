use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, Level};

use clip_partition::{
    config::Config,
    partition::{Partitioner, SolverStrategy},
    tags::TagLoader,
    Frame,
};

#[derive(Parser)]
#[command(
    name = "clip-partition",
    version,
    about = "Split a tagged video into clips at the cheapest cut points",
    long_about = "clip-partition reads the tag intervals detected in a video and prints the frames at which to cut it, trading the tagged content each clip would skip against a fixed penalty per clip."
)]
struct Cli {
    /// Tag document (TOML)
    #[arg(short, long)]
    tags: PathBuf,

    /// Number of frames in the video (overrides the tag document)
    #[arg(short = 'n', long)]
    frames: Option<Frame>,

    /// Penalty per clip
    #[arg(short, long)]
    penalty: Option<f64>,

    /// Weight for labels without an explicit cost
    #[arg(long)]
    default_cost: Option<f64>,

    /// Per-label weight, e.g. --cost person=4 (repeatable)
    #[arg(long = "cost", value_name = "LABEL=WEIGHT", value_parser = parse_cost)]
    costs: Vec<(String, f64)>,

    /// Shortest-path solver (topological, dijkstra)
    #[arg(short, long)]
    strategy: Option<SolverStrategy>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file and exit
    #[arg(long, value_name = "FILE")]
    dump_config: Option<PathBuf>,

    /// Print clip ranges instead of division points
    #[arg(long)]
    clips: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_cost(s: &str) -> std::result::Result<(String, f64), String> {
    let (label, weight) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected LABEL=WEIGHT, got '{}'", s))?;
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid weight '{}': {}", weight, e))?;
    Ok((label.trim().to_string(), weight))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the result
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting clip-partition v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };

    if let Some(penalty) = cli.penalty {
        config.partition.penalty = penalty;
    }
    if let Some(default_cost) = cli.default_cost {
        config.partition.default_cost = default_cost;
    }
    config.partition.cost_table.extend(cli.costs.iter().cloned());
    if let Some(strategy) = cli.strategy {
        config.solver.strategy = strategy;
    }

    if let Some(path) = &cli.dump_config {
        config.validate()?;
        config.save_to_file(path)?;
        info!("Configuration written to {:?}", path);
        return Ok(());
    }

    let file = TagLoader::load(&cli.tags)?;
    let no_frames = match cli.frames.or(file.no_frames) {
        Some(no_frames) => no_frames,
        None => bail!("Frame count unknown: pass --frames or set no_frames in {:?}", cli.tags),
    };
    let tags = file
        .tag_set(no_frames)
        .with_context(|| format!("Invalid tags in {:?}", cli.tags))?;

    info!("Tags: {} intervals, labels {:?}", tags.len(), tags.labels());

    let partitioner = Partitioner::new(config)?;
    let result = partitioner.partition(&tags, no_frames)?;

    if cli.clips {
        for clip in result.clips() {
            println!("{}\t{}", clip.start, clip.end);
        }
    } else {
        let divisions: Vec<String> = result.divisions.iter().map(Frame::to_string).collect();
        println!("{}", divisions.join(","));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cost_pairs() {
        assert_eq!(parse_cost("person=4"), Ok(("person".to_string(), 4.0)));
        assert_eq!(parse_cost("cell phone = 0.5"), Ok(("cell phone".to_string(), 0.5)));
        assert!(parse_cost("person").is_err());
        assert!(parse_cost("person=lots").is_err());
    }

    #[test]
    fn test_overrides_parse() {
        let cli = Cli::parse_from([
            "clip-partition",
            "--tags",
            "tags.toml",
            "--penalty",
            "3",
            "--cost",
            "cat=2",
            "--cost",
            "dog=0.5",
            "--strategy",
            "dijkstra",
        ]);

        assert_eq!(cli.penalty, Some(3.0));
        assert_eq!(cli.costs.len(), 2);
        assert_eq!(cli.strategy, Some(SolverStrategy::Dijkstra));
    }
}
