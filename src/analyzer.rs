//! Batch driver: source discovery, per-file analysis and output files
//!
//! A path names either one `.jack` file or a directory, which is walked
//! recursively for `.jack` files. Each file is one compilation unit: it is
//! read, tokenized and parsed, and its parse tree is written as XML next to
//! it (or into the configured output directory). For `Main.jack` the tree
//! goes to `Main_p.xml` and, when token output is on, the token dump to
//! `Main_t.xml`, so reference `Main.xml` files are left untouched.

use crate::parser::{self, ParserConfig, SyntaxError, Token};
use crate::xml::XmlWriter;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};
use walkdir::WalkDir;

pub const SOURCE_EXTENSION: &str = "jack";

/// Driver error type
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("not a .jack file or directory: {0}")]
    NotJackSource(PathBuf),

    #[error("no .jack files under {0}")]
    NoSources(PathBuf),

    #[error("tree and token outputs share the suffix {0:?}")]
    SuffixClash(String),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}: {source}")]
    Syntax {
        path: PathBuf,
        #[source]
        source: SyntaxError,
    },
}

impl AnalyzerError {
    fn io(path: &Path, source: io::Error) -> Self {
        AnalyzerError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Driver configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Also write the flat token sequence.
    pub emit_tokens: bool,
    /// Write outputs here instead of next to each source.
    pub out_dir: Option<PathBuf>,
    pub tree_suffix: String,
    pub token_suffix: String,
    /// Log a failing unit and continue with the next one.
    pub keep_going: bool,
    pub parser: ParserConfig,
}

impl AnalyzerConfig {
    /// Reject settings under which one output would overwrite another.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.emit_tokens && self.tree_suffix == self.token_suffix {
            return Err(AnalyzerError::SuffixClash(self.tree_suffix.clone()));
        }
        Ok(())
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            emit_tokens: false,
            out_dir: None,
            tree_suffix: "_p".to_string(),
            token_suffix: "_t".to_string(),
            keep_going: false,
            parser: ParserConfig::default(),
        }
    }
}

/// What one successfully analyzed unit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedUnit {
    pub source: PathBuf,
    pub tree_path: PathBuf,
    pub token_path: Option<PathBuf>,
    pub token_count: usize,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub analyzed: Vec<AnalyzedUnit>,
    pub failed: Vec<AnalyzerError>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze every unit under `path`.
    ///
    /// Without `keep_going` the first failure is returned as the error;
    /// with it, failures are collected in the report.
    pub fn run(&self, path: &Path) -> Result<BatchReport, AnalyzerError> {
        self.config.validate()?;
        let sources = discover_sources(path)?;
        info!(count = sources.len(), "found jack sources");

        // Outputs under `out_dir` mirror the layout below this root.
        let root = if path.is_dir() {
            path
        } else {
            path.parent().unwrap_or(Path::new(""))
        };

        let mut report = BatchReport::default();
        for source in sources {
            info!(file = %source.display(), "processing file");
            match self.analyze_unit(&source, root) {
                Ok(unit) => report.analyzed.push(unit),
                Err(err) if self.config.keep_going => {
                    error!("{err}");
                    report.failed.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        Ok(report)
    }

    /// Analyze one `.jack` file and write its outputs.
    pub fn analyze_file(&self, source: &Path) -> Result<AnalyzedUnit, AnalyzerError> {
        self.config.validate()?;
        self.analyze_unit(source, source.parent().unwrap_or(Path::new("")))
    }

    fn analyze_unit(&self, source: &Path, root: &Path) -> Result<AnalyzedUnit, AnalyzerError> {
        let text = fs::read_to_string(source).map_err(|e| AnalyzerError::io(source, e))?;
        let (tokens, tree) = self.analyze_text(&text).map_err(|e| AnalyzerError::Syntax {
            path: source.to_path_buf(),
            source: e,
        })?;
        debug!(tokens = tokens.len(), nodes = tree.node_count(), "parsed unit");

        let tree_path = self.output_path(source, root, &self.config.tree_suffix);
        if self.config.out_dir.is_some() {
            if let Some(dir) = tree_path.parent() {
                fs::create_dir_all(dir).map_err(|e| AnalyzerError::io(dir, e))?;
            }
        }

        write_xml(&tree_path, |w| w.write_tree(&tree))?;

        let token_path = if self.config.emit_tokens {
            let path = self.output_path(source, root, &self.config.token_suffix);
            write_xml(&path, |w| w.write_tokens(&tokens))?;
            Some(path)
        } else {
            None
        };

        Ok(AnalyzedUnit {
            source: source.to_path_buf(),
            tree_path,
            token_path,
            token_count: tokens.len(),
        })
    }

    /// Tokenize and parse in memory.
    pub fn analyze_text(&self, text: &str) -> Result<(Vec<Token>, Token), SyntaxError> {
        let tokens = parser::tokenize(text)?;
        let tree = parser::Parser::with_config(&tokens, self.config.parser).parse()?;
        Ok((tokens, tree))
    }

    /// `<stem><suffix>.xml` next to `source`, or under `out_dir` at the
    /// source's directory relative to `root`.
    pub fn output_path(&self, source: &Path, root: &Path, suffix: &str) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_name = format!("{stem}{suffix}.xml");

        match &self.config.out_dir {
            Some(dir) => {
                let relative = source
                    .strip_prefix(root)
                    .ok()
                    .and_then(Path::parent)
                    .unwrap_or(Path::new(""));
                dir.join(relative).join(file_name)
            }
            None => source.with_file_name(file_name),
        }
    }
}

/// List the units named by `path`, sorted.
pub fn discover_sources(path: &Path) -> Result<Vec<PathBuf>, AnalyzerError> {
    if !path.exists() {
        return Err(AnalyzerError::NotFound(path.to_path_buf()));
    }

    if path.is_file() {
        return if is_jack_source(path) {
            Ok(vec![path.to_path_buf()])
        } else {
            Err(AnalyzerError::NotJackSource(path.to_path_buf()))
        };
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| {
            let at = e.path().unwrap_or(path).to_path_buf();
            AnalyzerError::Io {
                path: at,
                source: e.into(),
            }
        })?;
        if entry.file_type().is_file() && is_jack_source(entry.path()) {
            sources.push(entry.into_path());
        }
    }

    if sources.is_empty() {
        return Err(AnalyzerError::NoSources(path.to_path_buf()));
    }
    sources.sort();
    Ok(sources)
}

pub fn is_jack_source(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Create or truncate `path` and fill it through an [`XmlWriter`].
fn write_xml(
    path: &Path,
    write: impl FnOnce(&mut XmlWriter<BufWriter<File>>) -> io::Result<()>,
) -> Result<(), AnalyzerError> {
    let file = File::create(path).map_err(|e| AnalyzerError::io(path, e))?;
    let mut writer = XmlWriter::new(BufWriter::new(file));
    write(&mut writer).map_err(|e| AnalyzerError::io(path, e))?;
    debug!(file = %path.display(), "wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_source() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        assert_eq!(
            analyzer.output_path(Path::new("proj/Square/Main.jack"), Path::new("proj"), "_p"),
            PathBuf::from("proj/Square/Main_p.xml")
        );
    }

    #[test]
    fn test_output_path_in_out_dir() {
        let analyzer = Analyzer::new(AnalyzerConfig {
            out_dir: Some(PathBuf::from("build")),
            ..AnalyzerConfig::default()
        });
        assert_eq!(
            analyzer.output_path(Path::new("proj/Main.jack"), Path::new("proj"), "_t"),
            PathBuf::from("build/Main_t.xml")
        );
        assert_eq!(
            analyzer.output_path(Path::new("proj/lib/Main.jack"), Path::new("proj"), "_t"),
            PathBuf::from("build/lib/Main_t.xml")
        );
    }

    #[test]
    fn test_equal_suffixes_are_rejected_with_tokens() {
        let config = AnalyzerConfig {
            emit_tokens: true,
            token_suffix: "_p".to_string(),
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalyzerError::SuffixClash(ref s)) if s == "_p"
        ));

        let config = AnalyzerConfig {
            emit_tokens: false,
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_jack_source() {
        assert!(is_jack_source(Path::new("a/Main.jack")));
        assert!(!is_jack_source(Path::new("a/Main.xml")));
        assert!(!is_jack_source(Path::new("a/jack")));
    }

    #[test]
    fn test_analyze_text_reports_syntax_errors() {
        let analyzer = Analyzer::new(AnalyzerConfig::default());
        assert!(matches!(
            analyzer.analyze_text("class A { #"),
            Err(SyntaxError::Lex(_))
        ));
        assert!(matches!(
            analyzer.analyze_text("class A {"),
            Err(SyntaxError::Parse(_))
        ));
    }
}
