// Lib file to expose modules for testing and external usage.

/// Orchestrates a run: parse, extract, analyze, collect statistics.
pub mod analyzer;

/// Analyzer configuration (recognized widget types, thresholds).
pub mod config;

/// Error type for failed runs.
pub mod error;

/// Python parsing and syntax error reporting.
pub mod parser;

/// Text and JSON rendering of an analysis result.
pub mod report;

/// Structural, spatial and best-practice passes.
pub mod rules;

/// Parent → children tree built from the widget map.
pub mod tree;

/// Line index helper.
pub mod utils;

/// AST visitor that extracts widgets from UI classes.
pub mod visitor;

/// Widget records and the widget map.
pub mod widget;
