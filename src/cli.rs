use crate::{AlignerError, AlignmentMode, AlignmentParams, ScoreParams, Sequence, TracebackMode};
use clap::{ArgAction, Parser};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use std::io::Write;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "pairwise-aligner",
          version,
          about = "Optimal global (Needleman-Wunsch) and local (Smith-Waterman) pairwise alignment",
          long_about = None,
          arg_required_else_help = true,
          )]
pub struct Cli {
    #[clap(required = true)]
    #[clap(short = 'm')]
    #[clap(long = "match")]
    #[clap(help = "Score of a match")]
    #[clap(value_name = "INT")]
    #[arg(value_parser = parse_score, allow_negative_numbers = true)]
    pub match_score: i32,

    #[clap(required = true)]
    #[clap(short = 's')]
    #[clap(long = "mismatch")]
    #[clap(help = "Score of a mismatch")]
    #[clap(value_name = "INT")]
    #[arg(value_parser = parse_score, allow_negative_numbers = true)]
    pub mismatch: i32,

    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "indel")]
    #[clap(help = "Score of a gap/indel")]
    #[clap(value_name = "INT")]
    #[arg(value_parser = parse_score, allow_negative_numbers = true)]
    pub gap: i32,

    #[clap(required = true)]
    #[clap(short = 'b')]
    #[clap(long = "seq1")]
    #[clap(help = "First sequence")]
    #[clap(value_name = "SEQ")]
    #[arg(value_parser = Sequence::from_str)]
    pub seq1: Sequence,

    #[clap(required = true)]
    #[clap(short = 'c')]
    #[clap(long = "seq2")]
    #[clap(help = "Second sequence")]
    #[clap(value_name = "SEQ")]
    #[arg(value_parser = Sequence::from_str)]
    pub seq2: Sequence,

    #[clap(required = true)]
    #[clap(short = 'a')]
    #[clap(long = "algorithm")]
    #[clap(help = "'local' for local alignment, 'global' for global alignment")]
    #[clap(value_name = "MODE")]
    #[arg(value_parser = AlignmentMode::from_str)]
    pub mode: AlignmentMode,

    #[clap(short = 't')]
    #[clap(long = "alignments")]
    #[clap(help = "'0' for only one alignment, '1' for all optimal alignments [default: only one]")]
    #[clap(value_name = "0|1")]
    #[clap(default_value = "0", hide_default_value = true)]
    #[arg(value_parser = TracebackMode::from_str)]
    pub traceback: TracebackMode,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

impl Cli {
    pub fn alignment_params(&self) -> AlignmentParams {
        AlignmentParams {
            mode: self.mode,
            traceback: self.traceback,
            scores: ScoreParams::new(self.match_score, self.mismatch, self.gap),
        }
    }

    pub fn sequences(&self) -> (&Sequence, &Sequence) {
        (&self.seq1, &self.seq2)
    }
}

fn parse_score(s: &str) -> Result<i32, AlignerError> {
    s.trim()
        .parse::<i32>()
        .map_err(|e| AlignerError::InvalidScoringInput(format!("'{s}': {e}")))
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            let target = record
                .module_path()
                .unwrap_or_else(|| record.target())
                .trim_start_matches("pairwise_aligner::");

            writeln!(
                buf,
                "{} {:<5} {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                style.value(level),
                target,
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("pairwise-aligner").chain(args.iter().copied()))
    }

    #[test]
    fn parses_short_flags() {
        let cli = parse(&[
            "-m", "1", "-s", "-1", "-i", "-2", "-b", "AATCG", "-c", "AACG", "-a", "local", "-t", "0",
        ])
        .unwrap();
        assert_eq!(
            cli.alignment_params(),
            AlignmentParams {
                mode: AlignmentMode::Local,
                traceback: TracebackMode::One,
                scores: ScoreParams::new(1, -1, -2),
            }
        );
        let (seq1, seq2) = cli.sequences();
        assert_eq!(seq1.as_bytes(), b"AATCG");
        assert_eq!(seq2.len(), 4);
    }

    #[test]
    fn traceback_defaults_to_single_alignment() {
        let cli = parse(&["-m", "2", "-s", "-1", "-i", "-2", "-b", "CIAO", "-c", "CIAOCI", "-a", "GLOBAL"])
            .unwrap();
        assert_eq!(cli.mode, AlignmentMode::Global);
        assert_eq!(cli.traceback, TracebackMode::One);
        assert_eq!(cli.verbosity, 0);
    }

    #[test]
    fn rejects_bad_inputs() {
        let base = ["-s", "-1", "-i", "-2", "-c", "A"];
        let with = |extra: &[&'static str]| {
            let mut args: Vec<&str> = base.to_vec();
            args.extend_from_slice(extra);
            parse(&args)
        };
        assert!(with(&["-m", "1", "-b", "A", "-a", "local"]).is_ok());
        assert!(with(&["-m", "one", "-b", "A", "-a", "local"]).is_err());
        assert!(with(&["-m", "1", "-b", "A", "-a", "semiglobal"]).is_err());
        assert!(with(&["-m", "1", "-b", "A", "-a", "local", "-t", "2"]).is_err());
        assert!(with(&["-m", "1", "-b", "Aé", "-a", "local"]).is_err());
        assert!(with(&["-m", "1", "-b", "A"]).is_err());
        assert!(with(&["-b", "A", "-a", "local"]).is_err());
    }

    #[test]
    fn non_ascii_sequence_error_names_input() {
        let err = parse(&["-m", "1", "-s", "-1", "-i", "-2", "-b", "é", "-c", "è", "-a", "global"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("only ASCII symbols"));
    }

    #[test]
    fn score_parser_reports_input() {
        match parse_score("1.5") {
            Err(AlignerError::InvalidScoringInput(msg)) => assert!(msg.contains("1.5")),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(parse_score("-3").unwrap(), -3);
    }
}
