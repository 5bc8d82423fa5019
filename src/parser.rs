use crate::error::AnalyzerError;
use crate::utils::LineIndex;
use rustpython_ast::{Mod, Stmt};
use rustpython_parser::{parse, Mode};
use std::fs;
use std::path::{Path, PathBuf};

/// A successfully parsed Python module and the text it came from.
pub struct ParsedSource {
    pub path: PathBuf,
    pub source: String,
    pub body: Vec<Stmt>,
    pub line_index: LineIndex,
}

impl ParsedSource {
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }
}

/// Reads and parses a Python file.
pub fn parse_file(path: &Path) -> Result<ParsedSource, AnalyzerError> {
    if !path.exists() {
        return Err(AnalyzerError::FileNotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(source, path)
}

/// Parses in-memory Python source. `path` is only used for diagnostics.
pub fn parse_source(source: String, path: &Path) -> Result<ParsedSource, AnalyzerError> {
    let line_index = LineIndex::new(&source);
    let module = parse(&source, Mode::Module, &path.to_string_lossy()).map_err(|err| {
        AnalyzerError::Parse {
            path: path.to_path_buf(),
            line: line_index.line_index(err.offset),
            message: err.error.to_string(),
        }
    })?;

    let body = match module {
        Mod::Module(module) => module.body,
        // Mode::Module only ever yields a module.
        _ => Vec::new(),
    };

    Ok(ParsedSource {
        path: path.to_path_buf(),
        source,
        body,
        line_index,
    })
}
