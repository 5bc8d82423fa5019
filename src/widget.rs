use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};

/// Absolute position and size assigned through `setGeometry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Geometry {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Geometry {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge. Coordinates come straight from source literals, so all
    /// edge and area arithmetic saturates instead of overflowing.
    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    pub fn area(&self) -> i64 {
        self.width.saturating_mul(self.height)
    }

    /// Two rectangles overlap unless one lies entirely to the left, right,
    /// above or below the other. Touching edges count as overlap.
    pub fn overlaps(&self, other: &Geometry) -> bool {
        !(self.right() < other.x
            || other.right() < self.x
            || self.bottom() < other.y
            || other.bottom() < self.y)
    }

    /// Area of the intersection rectangle, 0 when disjoint.
    pub fn overlap_area(&self, other: &Geometry) -> i64 {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return 0;
        }
        right
            .saturating_sub(left)
            .saturating_mul(bottom.saturating_sub(top))
    }
}

/// A `(width, height)` pair from a size setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeHint {
    pub width: i64,
    pub height: i64,
}

/// Auxiliary numeric attributes collected from size setters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WidgetProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<SizeHint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<SizeHint>,
}

/// Marks a widget whose contents are governed by a layout manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutKind {
    /// A `setLayout` call was seen but the layout class is unknown.
    Detected,
    /// The layout class could be resolved from a prior assignment.
    Resolved(String),
}

impl LayoutKind {
    pub fn label(&self) -> &str {
        match self {
            LayoutKind::Detected => "Layout (detected)",
            LayoutKind::Resolved(name) => name,
        }
    }
}

impl Serialize for LayoutKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One widget or layout construction site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetRecord {
    pub name: String,
    /// Class name as written at the construction site.
    pub widget_type: String,
    /// Class that owns the method the widget was constructed in.
    pub class_name: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub geometry: Option<Geometry>,
    pub properties: WidgetProperties,
    pub stylesheet: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    pub layout: Option<LayoutKind>,
    pub issues: Vec<String>,
    pub line: usize,
}

impl WidgetRecord {
    pub fn new(name: &str, widget_type: &str, class_name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            widget_type: widget_type.to_string(),
            class_name: class_name.to_string(),
            parent: None,
            children: Vec::new(),
            geometry: None,
            properties: WidgetProperties::default(),
            stylesheet: None,
            visible: true,
            enabled: true,
            layout: None,
            issues: Vec::new(),
            line,
        }
    }
}

/// Widgets keyed by attribute name, iterated in first-insertion order.
///
/// Inserting a name that already exists replaces the record in place
/// (last write wins), so two classes declaring `self.label` share one entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetMap {
    records: Vec<WidgetRecord>,
    index: HashMap<String, usize>,
}

impl WidgetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the one it replaced.
    pub fn insert(&mut self, record: WidgetRecord) -> Option<WidgetRecord> {
        match self.index.get(&record.name) {
            Some(&slot) => Some(std::mem::replace(&mut self.records[slot], record)),
            None => {
                self.index.insert(record.name.clone(), self.records.len());
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&WidgetRecord> {
        self.index.get(name).map(|&slot| &self.records[slot])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut WidgetRecord> {
        match self.index.get(name) {
            Some(&slot) => Some(&mut self.records[slot]),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetRecord> {
        self.records.iter()
    }

    /// Widgets that carry an explicit geometry, in map order.
    pub fn with_geometry(&self) -> Vec<(&WidgetRecord, Geometry)> {
        self.records
            .iter()
            .filter_map(|w| w.geometry.map(|g| (w, g)))
            .collect()
    }

    /// Appends a note to a widget's issue list. Unknown names are ignored.
    pub fn annotate(&mut self, name: &str, note: &str) {
        if let Some(widget) = self.get_mut(name) {
            widget.issues.push(note.to_string());
        }
    }

    /// Count of widgets per declared type.
    pub fn type_histogram(&self) -> BTreeMap<String, usize> {
        let mut histogram = BTreeMap::new();
        for widget in &self.records {
            *histogram.entry(widget.widget_type.clone()).or_insert(0) += 1;
        }
        histogram
    }
}

impl Serialize for WidgetMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.name, record)?;
        }
        map.end()
    }
}
