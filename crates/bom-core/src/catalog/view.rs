//! Catalog View
//!
//! The derived data the catalog step renders. Recomputed in full whenever
//! the payload or the top-level filter changes; never patched in place.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::processor::{build_tree, count_all_nodes, filter_by_top_level_id, flatten_leaves, top_level_options};
use super::{CategoryMap, CategoryTreeItem, PartItem, ProcessOptions, TopLevelFilter};
use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogView {
    /// Leaf parts of the filtered payload
    pub parts: Vec<PartItem>,
    /// Display tree of the filtered payload
    pub tree: Vec<CategoryTreeItem>,
    pub node_count: usize,
    /// Filter dropdown entries, always taken from the unfiltered payload
    pub top_level: Vec<(String, String)>,
}

impl CatalogView {
    pub fn compute(
        categories: &CategoryMap,
        filter: &TopLevelFilter,
        opts: ProcessOptions,
    ) -> Result<Self, CatalogError> {
        let filtered = filter_by_top_level_id(categories, filter);
        let parts = flatten_leaves(&filtered, opts)?;
        let tree = build_tree(&filtered, opts)?;
        let node_count = count_all_nodes(&tree);
        log::debug!(
            "catalog view for filter '{}': {} parts, {} nodes",
            filter.as_str(),
            parts.len(),
            node_count
        );
        Ok(Self {
            parts,
            tree,
            node_count,
            top_level: top_level_options(categories),
        })
    }
}

/// Separates IDs in a [`VisibleRow::key`]
const KEY_SEPARATOR: char = '\u{1f}';

/// One row of the tree view
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<'a> {
    pub item: &'a CategoryTreeItem,
    pub depth: usize,
    /// ID chain from the top level; unique even when IDs repeat in other branches
    pub key: String,
}

fn child_key(parent: &str, id: &str) -> String {
    if parent.is_empty() {
        id.to_string()
    } else {
        format!("{}{}{}", parent, KEY_SEPARATOR, id)
    }
}

/// Rows of the tree view in display order
///
/// Children are only listed under nodes whose key is in `expanded`.
pub fn visible_rows<'a>(tree: &'a [CategoryTreeItem], expanded: &HashSet<String>) -> Vec<VisibleRow<'a>> {
    fn collect<'a>(
        items: &'a [CategoryTreeItem],
        parent: &str,
        depth: usize,
        expanded: &HashSet<String>,
        result: &mut Vec<VisibleRow<'a>>,
    ) {
        for item in items {
            let key = child_key(parent, &item.category_id);
            let open = item.has_children && expanded.contains(&key);
            result.push(VisibleRow {
                item,
                depth,
                key: key.clone(),
            });
            if open {
                collect(&item.children, &key, depth + 1, expanded, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(tree, "", 0, expanded, &mut result);
    result
}

/// Keys of every node that has children
pub fn expand_all(tree: &[CategoryTreeItem]) -> HashSet<String> {
    let mut keys = HashSet::new();
    let mut stack: Vec<(String, &CategoryTreeItem)> =
        tree.iter().map(|item| (child_key("", &item.category_id), item)).collect();
    while let Some((key, item)) = stack.pop() {
        if item.has_children {
            stack.extend(
                item.children
                    .iter()
                    .map(|child| (child_key(&key, &child.category_id), child)),
            );
            keys.insert(key);
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryNode;

    fn catalog() -> CategoryMap {
        CategoryMap::new()
            .with(
                "100",
                CategoryNode::new("Engine")
                    .with_child("101", CategoryNode::new("Pistons"))
                    .with_child(
                        "102",
                        CategoryNode::new("Valves").with_child("103", CategoryNode::new("Intake Valve")),
                    ),
            )
            .with("200", CategoryNode::new("Body").with_child("201", CategoryNode::new("Door")))
    }

    #[test]
    fn test_compute_all() {
        let view = CatalogView::compute(&catalog(), &TopLevelFilter::All, ProcessOptions::default()).unwrap();
        assert_eq!(view.parts.len(), 3);
        assert_eq!(view.node_count, 6);
        assert_eq!(view.top_level.len(), 2);
    }

    #[test]
    fn test_compute_filtered_keeps_dropdown() {
        let view = CatalogView::compute(&catalog(), &"200".into(), ProcessOptions::default()).unwrap();
        assert_eq!(view.parts.len(), 1);
        assert_eq!(view.parts[0].full_path, "Body > Door");
        assert_eq!(view.node_count, 2);
        assert_eq!(view.top_level.len(), 2);
    }

    #[test]
    fn test_compute_unknown_filter_is_empty() {
        let view = CatalogView::compute(&catalog(), &"999".into(), ProcessOptions::default()).unwrap();
        assert!(view.parts.is_empty());
        assert_eq!(view.node_count, 0);
    }

    #[test]
    fn test_visible_rows_respect_expansion() {
        let view = CatalogView::compute(&catalog(), &TopLevelFilter::All, ProcessOptions::default()).unwrap();

        let collapsed = visible_rows(&view.tree, &HashSet::new());
        let names: Vec<_> = collapsed.iter().map(|r| r.item.category_name.as_str()).collect();
        assert_eq!(names, vec!["Engine", "Body"]);

        let mut expanded = HashSet::new();
        expanded.insert(collapsed[0].key.clone());
        let rows = visible_rows(&view.tree, &expanded);
        let names: Vec<_> = rows.iter().map(|r| (r.item.category_name.as_str(), r.depth)).collect();
        assert_eq!(
            names,
            vec![("Engine", 0), ("Pistons", 1), ("Valves", 1), ("Body", 0)]
        );
    }

    #[test]
    fn test_cousins_with_same_id_expand_independently() {
        let map = CategoryMap::new()
            .with(
                "1",
                CategoryNode::new("Front").with_child("9", CategoryNode::new("Axle").with_child("91", CategoryNode::new("Hub"))),
            )
            .with(
                "2",
                CategoryNode::new("Rear").with_child("9", CategoryNode::new("Axle").with_child("92", CategoryNode::new("Drum"))),
            );
        let view = CatalogView::compute(&map, &TopLevelFilter::All, ProcessOptions::default()).unwrap();

        let top = visible_rows(&view.tree, &HashSet::new());
        let mut expanded: HashSet<String> = top.iter().map(|r| r.key.clone()).collect();
        let rows = visible_rows(&view.tree, &expanded);
        let axles: Vec<_> = rows.iter().filter(|r| r.item.category_id == "9").collect();
        assert_eq!(axles.len(), 2);
        assert_ne!(axles[0].key, axles[1].key);

        // open only the front axle
        expanded.insert(axles[0].key.clone());
        let rows = visible_rows(&view.tree, &expanded);
        let names: Vec<_> = rows.iter().map(|r| r.item.category_name.as_str()).collect();
        assert_eq!(names, vec!["Front", "Axle", "Hub", "Rear", "Axle"]);

        let all = expand_all(&view.tree);
        assert_eq!(all.len(), 4);
        assert_eq!(visible_rows(&view.tree, &all).len(), view.node_count);
    }

    #[test]
    fn test_expand_all_shows_every_node() {
        let view = CatalogView::compute(&catalog(), &TopLevelFilter::All, ProcessOptions::default()).unwrap();
        let expanded = expand_all(&view.tree);
        assert_eq!(expanded.len(), 3);
        assert_eq!(visible_rows(&view.tree, &expanded).len(), view.node_count);
    }
}
