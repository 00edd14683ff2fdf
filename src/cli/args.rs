use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RUBRIC-SCORE: rubric score annotation for comparison datasets
///
/// Folds each evaluation's weighted yes/no rubric judgements into a 0-100
/// score, optionally migrates rubric dimension labels, and writes the
/// dataset back in place.
#[derive(Parser, Debug)]
#[command(name = "rubric-score")]
#[command(version = "0.1.0")]
#[command(about = "Add rubric scores to a model comparison dataset")]
pub struct Args {
    /// Defaults to `score` with no options
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Score every evaluation in the dataset and write it back
    Score(ScoreArgs),

    /// Generate a sample configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug, Default)]
pub struct ScoreArgs {
    /// Dataset to score (default: comparison_data.json next to the executable)
    pub input: Option<PathBuf>,

    /// Write the scored dataset here instead of overwriting the input
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a configuration file (YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rename rubric dimensions to the current vocabulary before scoring
    #[arg(long)]
    pub normalize_dimensions: bool,

    /// Score and report without writing the dataset
    #[arg(long)]
    pub dry_run: bool,

    /// Also write the run summary as JSON
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for the config file
    #[arg(short, long, default_value = "rubric-score.yaml")]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let args = Args::try_parse_from(["rubric-score"]).unwrap();
        assert!(args.command.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_score_arguments() {
        let args = Args::try_parse_from([
            "rubric-score",
            "score",
            "data.json",
            "--normalize-dimensions",
            "--dry-run",
            "-o",
            "out.json",
            "-v",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Some(Command::Score(score)) => {
                assert_eq!(score.input, Some(PathBuf::from("data.json")));
                assert_eq!(score.output, Some(PathBuf::from("out.json")));
                assert!(score.normalize_dimensions);
                assert!(score.dry_run);
                assert!(score.config.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_default_output() {
        let args = Args::try_parse_from(["rubric-score", "init"]).unwrap();
        match args.command {
            Some(Command::Init(init)) => {
                assert_eq!(init.output, PathBuf::from("rubric-score.yaml"))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
