// Command line surface: flags, mode selection and log verbosity.

use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::{DEFAULT_OUTPUT_PATH, DEFAULT_SECRETS_PATH};

#[derive(Parser, Debug)]
#[command(name = "langdetect")]
#[command(about = "Detect the language of texts with the Azure Translator API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Send one paragraph at a time to Azure Translator
    #[arg(short, long)]
    pub paragraph: bool,

    /// Send the content of one file to Azure Translator and score it against a label
    #[arg(short, long, num_args = 2, value_names = ["PATH", "LABEL"], action = ArgAction::Set)]
    pub file: Option<Vec<String>>,

    /// File holding the subscription key and the endpoint, one per line
    #[arg(long, default_value = DEFAULT_SECRETS_PATH)]
    pub secrets: PathBuf,

    /// Where batch results are written
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Interactive,
    Batch { path: PathBuf, label: String },
}

impl Cli {
    /// `--file` wins over `--paragraph`; no flag at all means interactive.
    pub fn mode(&self) -> Mode {
        match self.file.as_deref() {
            Some([path, label]) => Mode::Batch {
                path: PathBuf::from(path),
                label: label.clone(),
            },
            _ => Mode::Interactive,
        }
    }
}

pub fn verbosity_to_log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut full_args = vec!["langdetect"];
        full_args.extend(args);
        Cli::try_parse_from(full_args)
    }

    #[test]
    fn test_no_flags_is_interactive() {
        let cli = parse_args(&[]).unwrap();
        assert_eq!(cli.mode(), Mode::Interactive);
        assert_eq!(cli.secrets, PathBuf::from("secrets.txt"));
        assert_eq!(cli.output, PathBuf::from("data/export_answers.json"));
    }

    #[test]
    fn test_paragraph_flag() {
        let cli = parse_args(&["-p"]).unwrap();
        assert!(cli.paragraph);
        assert_eq!(cli.mode(), Mode::Interactive);
    }

    #[test]
    fn test_file_flag_takes_path_and_label() {
        let cli = parse_args(&["--file", "data/fra.txt", "fra"]).unwrap();
        assert_eq!(
            cli.mode(),
            Mode::Batch {
                path: PathBuf::from("data/fra.txt"),
                label: "fra".to_string(),
            }
        );
    }

    #[test]
    fn test_file_wins_over_paragraph() {
        let cli = parse_args(&["-p", "-f", "in.txt", "eng"]).unwrap();
        assert!(matches!(cli.mode(), Mode::Batch { .. }));
    }

    #[test]
    fn test_file_flag_requires_label() {
        assert!(parse_args(&["-f", "in.txt"]).is_err());
    }

    #[test]
    fn test_file_flag_cannot_repeat() {
        assert!(parse_args(&["-f", "a.txt", "fra", "-f", "b.txt", "eng"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = parse_args(&["--secrets", "keys.txt", "--output", "out.json", "-vv"]).unwrap();
        assert_eq!(cli.secrets, PathBuf::from("keys.txt"));
        assert_eq!(cli.output, PathBuf::from("out.json"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_verbosity_to_log_level() {
        assert_eq!(verbosity_to_log_level(0), LevelFilter::Warn);
        assert_eq!(verbosity_to_log_level(1), LevelFilter::Info);
        assert_eq!(verbosity_to_log_level(2), LevelFilter::Debug);
        assert_eq!(verbosity_to_log_level(7), LevelFilter::Trace);
    }
}
