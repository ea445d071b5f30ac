//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Transcript, differential and the full report
    Full,
    /// Only the final report
    Verdict,
    /// JSON output
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Full => OutputFormat::Full,
            OutputArg::Verdict => OutputFormat::Verdict,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for case-council
#[derive(Parser, Debug)]
#[command(name = "case-council")]
#[command(author, version, about = "Case Council - a moderated specialist panel reviews a clinical case")]
#[command(long_about = r#"
Case Council runs a multidisciplinary panel over a case file and produces a
structured final report.

A run has three stages:
1. Introductions and an opening differential
2. Debate rounds: the chair sets a topic (or asks you a question with
   --interactive), every specialist speaks, and the prognosis is refreshed
3. Synthesis: the chair drafts the final report

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/case-council/config.toml   Global config

Example:
  case-council cases/chest-pain.json
  case-council cases/fever.json -p infectious-disease -p hematology --rounds 2
  case-council cases/fever.json --what-if "The blood smear is negative" --output json
"#)]
pub struct Cli {
    /// JSON case file to review
    #[arg(value_name = "CASE_FILE", required_unless_present = "show_config")]
    pub case_file: Option<PathBuf>,

    /// Specialist seat (can be specified multiple times; overrides the case file and config)
    #[arg(short, long = "participant", value_name = "ROLE")]
    pub participants: Vec<String>,

    /// Number of debate rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Re-run the final report under a hypothetical premise (can be repeated)
    #[arg(long = "what-if", value_name = "PREMISE")]
    pub what_if: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Write every progress event to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub event_log: Option<PathBuf>,

    /// Answer the chair's questions on stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Ground the final report in web sources
    #[arg(long)]
    pub grounded: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "case-council",
            "case.json",
            "-p",
            "cardiology",
            "--participant",
            "radiology",
            "--rounds",
            "2",
            "--what-if",
            "Troponin is normal",
            "--what-if",
            "Age 25",
            "-o",
            "json",
            "-vv",
            "--interactive",
        ])
        .unwrap();

        assert_eq!(cli.case_file, Some(PathBuf::from("case.json")));
        assert_eq!(cli.participants, vec!["cardiology", "radiology"]);
        assert_eq!(cli.rounds, Some(2));
        assert_eq!(cli.what_if.len(), 2);
        assert_eq!(cli.output, Some(OutputArg::Json));
        assert_eq!(cli.verbose, 2);
        assert!(cli.interactive);
    }

    #[test]
    fn test_case_file_required_unless_show_config() {
        assert!(Cli::try_parse_from(["case-council"]).is_err());
        let cli = Cli::try_parse_from(["case-council", "--show-config"]).unwrap();
        assert!(cli.case_file.is_none());
    }

    #[test]
    fn test_output_arg_maps_to_domain_format() {
        assert_eq!(OutputFormat::from(OutputArg::Verdict), OutputFormat::Verdict);
        assert_eq!(OutputFormat::from(OutputArg::Full), OutputFormat::Full);
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
