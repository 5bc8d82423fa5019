use crate::widget::WidgetMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Key under which widgets without a known parent are grouped.
pub const ROOT: &str = "ROOT";

/// Parent name → child names, built from each widget's `parent` link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WidgetTree {
    children: BTreeMap<String, Vec<String>>,
}

impl WidgetTree {
    /// Groups widgets by parent. A parent that names no widget in the map is
    /// treated as the root.
    pub fn build(widgets: &WidgetMap) -> Self {
        let mut children: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for widget in widgets.iter() {
            let parent = widget
                .parent
                .as_deref()
                .filter(|p| widgets.contains(p))
                .unwrap_or(ROOT);
            children
                .entry(parent.to_string())
                .or_default()
                .push(widget.name.clone());
        }
        Self { children }
    }

    pub fn children_of(&self, parent: &str) -> &[String] {
        self.children
            .get(parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Parent keys in sorted order.
    pub fn parents(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Total number of child entries across all parents.
    pub fn entry_count(&self) -> usize {
        self.children.values().map(Vec::len).sum()
    }

    /// Depth-first walk from the root yielding `(depth, name)`.
    ///
    /// Widgets whose parent chain loops back on itself are unreachable from
    /// the root; each such cycle is entered once from its first member so
    /// every widget is still visited exactly once.
    pub fn walk(&self) -> Vec<(usize, String)> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        self.walk_from(ROOT, 0, &mut seen, &mut out);

        for parent in self.children.keys() {
            if parent != ROOT && !seen.contains(parent.as_str()) {
                seen.insert(parent.clone());
                out.push((0, parent.clone()));
                self.walk_from(parent, 1, &mut seen, &mut out);
            }
        }
        out
    }

    fn walk_from(
        &self,
        node: &str,
        depth: usize,
        seen: &mut HashSet<String>,
        out: &mut Vec<(usize, String)>,
    ) {
        for child in self.children_of(node) {
            if !seen.insert(child.clone()) {
                continue;
            }
            out.push((depth, child.clone()));
            self.walk_from(child, depth + 1, seen, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetRecord;

    fn record(name: &str, parent: Option<&str>) -> WidgetRecord {
        let mut w = WidgetRecord::new(name, "QWidget", "Window", 1);
        w.parent = parent.map(str::to_string);
        w
    }

    #[test]
    fn test_unknown_parent_goes_to_root() {
        let mut widgets = WidgetMap::new();
        widgets.insert(record("panel", None));
        widgets.insert(record("label", Some("panel")));
        widgets.insert(record("stray", Some("elsewhere")));

        let tree = WidgetTree::build(&widgets);
        assert_eq!(tree.children_of(ROOT), ["panel", "stray"]);
        assert_eq!(tree.children_of("panel"), ["label"]);
        assert_eq!(tree.entry_count(), 3);
        assert_eq!(
            tree.walk(),
            vec![
                (0, "panel".to_string()),
                (1, "label".to_string()),
                (0, "stray".to_string())
            ]
        );
    }

    #[test]
    fn test_walk_survives_cycles() {
        let mut widgets = WidgetMap::new();
        widgets.insert(record("a", Some("b")));
        widgets.insert(record("b", Some("a")));

        let tree = WidgetTree::build(&widgets);
        assert!(tree.children_of(ROOT).is_empty());

        let walked: Vec<String> = tree.walk().into_iter().map(|(_, name)| name).collect();
        assert_eq!(walked.len(), 2);
        assert!(walked.contains(&"a".to_string()));
        assert!(walked.contains(&"b".to_string()));
    }
}
