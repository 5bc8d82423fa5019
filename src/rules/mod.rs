// Rules module
// Independent passes over the widget map and the raw source.

use serde::Serialize;
use std::fmt;

/// Structural checks: size, visibility, overlap, parenting, naming.
pub mod issues;

/// Coordinate clusters and spacing consistency.
pub mod alignment;

/// Grid / stack / row recognition and mixed layout detection.
pub mod layout;

/// Pairwise occlusion analysis.
pub mod z_order;

/// Lexical best-practice checklist over the raw source text.
pub mod best_practices;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Size,
    Visibility,
    Overlap,
    Layout,
    Naming,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Size => "size",
            Category::Visibility => "visibility",
            Category::Overlap => "overlap",
            Category::Layout => "layout",
            Category::Naming => "naming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic produced by the issue detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub category: Category,
    /// Display form of the affected widgets, e.g. `a` or `a & b`.
    pub widget: String,
    pub widgets: Vec<String>,
    pub message: String,
    pub line: usize,
}
