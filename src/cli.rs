//! Command-line arguments

use crate::analyzer::AnalyzerConfig;
use crate::parser::{ExpressionGrammar, ParserConfig};
use clap::Parser;
use std::path::PathBuf;

/// Syntax analyzer for the Jack language.
///
/// Parses each `.jack` file under PATH and writes its parse tree as XML.
#[derive(Debug, Parser)]
#[command(name = "jack-analyzer", author, version)]
pub struct AnalyzerArgs {
    /// A `.jack` file or a directory searched recursively for them
    pub path: PathBuf,

    /// Also write the flat token sequence of each file
    #[arg(short, long)]
    pub tokens: bool,

    /// Directory for the output files, instead of next to each source
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Suffix appended to the source file stem for the parse tree
    #[arg(long, default_value = "_p")]
    pub suffix: String,

    /// Suffix appended to the source file stem for the token dump
    #[arg(long, default_value = "_t")]
    pub token_suffix: String,

    /// Report a failing file and continue with the rest
    #[arg(short, long)]
    pub keep_going: bool,

    /// Accept at most one operator per expression
    #[arg(long)]
    pub single_op_expressions: bool,

    /// Browse the parse tree of a single file in the terminal
    #[arg(long)]
    pub view: bool,

    /// Log more detail (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl AnalyzerArgs {
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            expression: if self.single_op_expressions {
                ExpressionGrammar::SinglePair
            } else {
                ExpressionGrammar::Chained
            },
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            emit_tokens: self.tokens,
            out_dir: self.out_dir.clone(),
            tree_suffix: self.suffix.clone(),
            token_suffix: self.token_suffix.clone(),
            keep_going: self.keep_going,
            parser: self.parser_config(),
        }
    }

    /// Default log filter when RUST_LOG is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_analyzer_defaults() {
        let args = AnalyzerArgs::parse_from(["jack-analyzer", "Square"]);
        assert_eq!(args.path, PathBuf::from("Square"));
        assert_eq!(args.analyzer_config(), AnalyzerConfig::default());
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn test_flags() {
        let args = AnalyzerArgs::parse_from([
            "jack-analyzer",
            "Main.jack",
            "--tokens",
            "--keep-going",
            "--single-op-expressions",
            "--out-dir",
            "build",
            "-vv",
        ]);
        let config = args.analyzer_config();
        assert!(config.emit_tokens);
        assert!(config.keep_going);
        assert_eq!(config.out_dir, Some(PathBuf::from("build")));
        assert_eq!(config.parser.expression, ExpressionGrammar::SinglePair);
        assert_eq!(args.log_filter(), "trace");
    }
}
