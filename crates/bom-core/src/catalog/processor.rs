//! Category Tree Processing
//!
//! Pure transformations of a [`CategoryMap`] into the flat BoM list and the
//! display tree. Both walks are depth-first, left to right, and bounded by
//! [`ProcessOptions::max_depth`]. An ID that shows up inside its own
//! ancestry is rejected as a cycle.

use crate::catalog::{CategoryMap, CategoryNode, CategoryTreeItem, PartItem, TopLevelFilter};
use crate::config::AppConfig;
use crate::error::CatalogError;

/// Breadcrumb separator of `full_path`
pub const PATH_SEPARATOR: &str = " > ";

/// Guards applied while walking a category payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Number of nesting levels accepted (top level counts as one)
    pub max_depth: usize,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self { max_depth: 32 }
    }
}

impl ProcessOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_depth: config.max_tree_depth,
        }
    }
}

/// Ancestor chain of the node currently being visited
struct Walk<'a> {
    opts: ProcessOptions,
    ids: Vec<&'a str>,
    names: Vec<&'a str>,
}

impl<'a> Walk<'a> {
    fn new(opts: ProcessOptions) -> Self {
        Self {
            opts,
            ids: Vec::new(),
            names: Vec::new(),
        }
    }

    fn enter(&mut self, id: &'a str, node: &'a CategoryNode) -> Result<(), CatalogError> {
        if self.ids.contains(&id) {
            let mut path = self.names.clone();
            path.push(&node.text);
            return Err(CatalogError::Cycle {
                id: id.to_string(),
                path: path.join(PATH_SEPARATOR),
            });
        }
        if self.ids.len() >= self.opts.max_depth {
            return Err(CatalogError::TooDeep {
                id: id.to_string(),
                max_depth: self.opts.max_depth,
            });
        }
        self.ids.push(id);
        self.names.push(&node.text);
        Ok(())
    }

    fn leave(&mut self) {
        self.ids.pop();
        self.names.pop();
    }

    /// Ancestors of the current node
    fn level(&self) -> usize {
        self.ids.len().saturating_sub(1)
    }

    fn full_path(&self) -> String {
        self.names.join(PATH_SEPARATOR)
    }

    fn part(&self, id: &str, node: &CategoryNode) -> PartItem {
        PartItem {
            category_id: id.to_string(),
            category_name: node.text.clone(),
            full_path: self.full_path(),
            level: self.level(),
        }
    }
}

/// Leaf categories as BoM rows, in depth-first order
pub fn flatten_leaves(
    categories: &CategoryMap,
    opts: ProcessOptions,
) -> Result<Vec<PartItem>, CatalogError> {
    fn collect<'a>(
        map: &'a CategoryMap,
        walk: &mut Walk<'a>,
        result: &mut Vec<PartItem>,
    ) -> Result<(), CatalogError> {
        for (id, node) in map.iter() {
            walk.enter(id, node)?;
            if node.is_leaf() {
                result.push(walk.part(id, node));
            } else {
                collect(&node.children, walk, result)?;
            }
            walk.leave();
        }
        Ok(())
    }

    let mut walk = Walk::new(opts);
    let mut result = Vec::new();
    collect(categories, &mut walk, &mut result)?;
    log::debug!("flattened {} leaf parts", result.len());
    Ok(result)
}

/// Every category (internal and leaf) with its subtree
pub fn build_tree(
    categories: &CategoryMap,
    opts: ProcessOptions,
) -> Result<Vec<CategoryTreeItem>, CatalogError> {
    fn build<'a>(
        map: &'a CategoryMap,
        walk: &mut Walk<'a>,
    ) -> Result<Vec<CategoryTreeItem>, CatalogError> {
        let mut items = Vec::with_capacity(map.len());
        for (id, node) in map.iter() {
            walk.enter(id, node)?;
            let part = walk.part(id, node);
            let children = build(&node.children, walk)?;
            walk.leave();
            items.push(CategoryTreeItem {
                category_id: part.category_id,
                category_name: part.category_name,
                full_path: part.full_path,
                level: part.level,
                has_children: !children.is_empty(),
                children,
            });
        }
        Ok(items)
    }

    let mut walk = Walk::new(opts);
    build(categories, &mut walk)
}

/// Restrict a payload to one top-level branch
///
/// Only top-level keys are matched; an unknown ID yields an empty map.
pub fn filter_by_top_level_id(categories: &CategoryMap, selected: &TopLevelFilter) -> CategoryMap {
    match selected {
        TopLevelFilter::All => categories.clone(),
        TopLevelFilter::Id(id) => categories
            .iter()
            .filter(|(key, _)| *key == id.as_str())
            .map(|(key, node)| (key, node.clone()))
            .collect(),
    }
}

/// Total number of nodes in a built tree
pub fn count_all_nodes(tree: &[CategoryTreeItem]) -> usize {
    tree.iter().map(|item| 1 + count_all_nodes(&item.children)).sum()
}

/// `(id, name)` pairs for the top-level filter dropdown
pub fn top_level_options(categories: &CategoryMap) -> Vec<(String, String)> {
    categories
        .iter()
        .map(|(id, node)| (id.to_string(), node.text.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Engine > {Pistons, Valves > Intake Valve}
    fn engine_catalog() -> CategoryMap {
        CategoryMap::new().with(
            "100",
            CategoryNode::new("Engine")
                .with_child("101", CategoryNode::new("Pistons"))
                .with_child(
                    "102",
                    CategoryNode::new("Valves").with_child("103", CategoryNode::new("Intake Valve")),
                ),
        )
    }

    fn part(id: &str, name: &str, path: &str, level: usize) -> PartItem {
        PartItem {
            category_id: id.into(),
            category_name: name.into(),
            full_path: path.into(),
            level,
        }
    }

    #[test]
    fn test_flatten_leaves() {
        let parts = flatten_leaves(&engine_catalog(), ProcessOptions::default()).unwrap();
        assert_eq!(
            parts,
            vec![
                part("101", "Pistons", "Engine > Pistons", 1),
                part("103", "Intake Valve", "Engine > Valves > Intake Valve", 2),
            ]
        );
    }

    #[test]
    fn test_flatten_top_level_leaf() {
        let map = CategoryMap::new().with("1", CategoryNode::new("Wipers"));
        let parts = flatten_leaves(&map, ProcessOptions::default()).unwrap();
        assert_eq!(parts, vec![part("1", "Wipers", "Wipers", 0)]);
    }

    #[test]
    fn test_build_tree() {
        let tree = build_tree(&engine_catalog(), ProcessOptions::default()).unwrap();
        assert_eq!(tree.len(), 1);
        let engine = &tree[0];
        assert_eq!(engine.level, 0);
        assert!(engine.has_children);
        assert_eq!(engine.children.len(), 2);

        let valves = &engine.children[1];
        assert_eq!(valves.full_path, "Engine > Valves");
        assert_eq!(valves.level, 1);
        assert_eq!(valves.children[0].full_path, "Engine > Valves > Intake Valve");
        assert_eq!(valves.children[0].level, 2);
        assert!(!valves.children[0].has_children);
    }

    #[test]
    fn test_levels_agree_between_projections() {
        let opts = ProcessOptions::default();
        let parts = flatten_leaves(&engine_catalog(), opts).unwrap();
        let tree = build_tree(&engine_catalog(), opts).unwrap();
        let intake = &tree[0].children[1].children[0];
        assert_eq!(parts[1].level, intake.level);
    }

    #[test]
    fn test_count_all_nodes() {
        let tree = build_tree(&engine_catalog(), ProcessOptions::default()).unwrap();
        assert_eq!(count_all_nodes(&tree), 4);
        assert_eq!(count_all_nodes(&[]), 0);
    }

    #[test]
    fn test_filter_by_top_level_id() {
        let map = engine_catalog().with("200", CategoryNode::new("Body"));
        assert_eq!(filter_by_top_level_id(&map, &TopLevelFilter::All), map);

        let only_body = filter_by_top_level_id(&map, &"200".into());
        assert_eq!(only_body.keys().collect::<Vec<_>>(), vec!["200"]);

        // nested ids are not matched
        assert!(filter_by_top_level_id(&map, &"101".into()).is_empty());
        assert!(filter_by_top_level_id(&map, &"999".into()).is_empty());
    }

    #[test]
    fn test_depth_guard() {
        let opts = ProcessOptions { max_depth: 2 };
        let err = flatten_leaves(&engine_catalog(), opts).unwrap_err();
        assert_eq!(
            err,
            CatalogError::TooDeep {
                id: "103".into(),
                max_depth: 2
            }
        );
        assert!(build_tree(&engine_catalog(), opts).is_err());
        assert!(flatten_leaves(&engine_catalog(), ProcessOptions { max_depth: 3 }).is_ok());
    }

    #[test]
    fn test_repeated_ancestor_id_is_a_cycle() {
        let map = CategoryMap::new().with(
            "1",
            CategoryNode::new("Body").with_child(
                "2",
                CategoryNode::new("Doors").with_child("1", CategoryNode::new("Body")),
            ),
        );
        let err = build_tree(&map, ProcessOptions::default()).unwrap_err();
        assert_eq!(
            err,
            CatalogError::Cycle {
                id: "1".into(),
                path: "Body > Doors > Body".into()
            }
        );
    }

    #[test]
    fn test_same_id_in_sibling_branches_is_allowed() {
        let map = CategoryMap::new()
            .with("1", CategoryNode::new("Front").with_child("9", CategoryNode::new("Bolt")))
            .with("2", CategoryNode::new("Rear").with_child("9", CategoryNode::new("Bolt")));
        let parts = flatten_leaves(&map, ProcessOptions::default()).unwrap();
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_top_level_options() {
        let options = top_level_options(&engine_catalog().with("200", CategoryNode::new("Body")));
        assert_eq!(
            options,
            vec![("100".to_string(), "Engine".to_string()), ("200".to_string(), "Body".to_string())]
        );
    }
}
