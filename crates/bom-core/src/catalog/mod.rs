//! Category Catalog
//!
//! The backend returns the parts catalog of a vehicle as a nested
//! `{ id: { text, children: { ... } } }` object. This module holds that
//! shape plus the flat (BoM) and tree projections derived from it.

mod map;
mod processor;
mod view;

pub use map::{CategoryMap, CategoryNode};
pub use processor::{
    build_tree, count_all_nodes, filter_by_top_level_id, flatten_leaves, top_level_options,
    ProcessOptions, PATH_SEPARATOR,
};
pub use view::{expand_all, visible_rows, CatalogView, VisibleRow};

use serde::{Deserialize, Serialize};

/// A leaf category, shown as one row of the bill of materials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartItem {
    pub category_id: String,
    pub category_name: String,
    /// Ancestor names down to this node, joined with `" > "`
    pub full_path: String,
    /// Number of ancestors (top level = 0)
    pub level: usize,
}

/// Any category node, with its subtree, for the tree view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTreeItem {
    pub category_id: String,
    pub category_name: String,
    pub full_path: String,
    /// Same convention as [`PartItem::level`]
    pub level: usize,
    pub has_children: bool,
    pub children: Vec<CategoryTreeItem>,
}

/// Top-level category filter of the catalog step
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TopLevelFilter {
    #[default]
    All,
    Id(String),
}

impl TopLevelFilter {
    /// Sentinel value used by the filter dropdown
    pub const ALL: &'static str = "all";

    pub fn as_str(&self) -> &str {
        match self {
            TopLevelFilter::All => Self::ALL,
            TopLevelFilter::Id(id) => id,
        }
    }
}

impl From<String> for TopLevelFilter {
    fn from(s: String) -> Self {
        if s == Self::ALL {
            TopLevelFilter::All
        } else {
            TopLevelFilter::Id(s)
        }
    }
}

impl From<&str> for TopLevelFilter {
    fn from(s: &str) -> Self {
        TopLevelFilter::from(s.to_string())
    }
}

impl From<TopLevelFilter> for String {
    fn from(f: TopLevelFilter) -> Self {
        f.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_sentinel() {
        assert_eq!(TopLevelFilter::from("all"), TopLevelFilter::All);
        assert_eq!(TopLevelFilter::from("100"), TopLevelFilter::Id("100".into()));
        assert_eq!(TopLevelFilter::Id("5".into()).as_str(), "5");
    }

    #[test]
    fn test_part_item_serializes_camel_case() {
        let part = PartItem {
            category_id: "101".into(),
            category_name: "Pistons".into(),
            full_path: "Engine > Pistons".into(),
            level: 1,
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["categoryId"], "101");
        assert_eq!(json["fullPath"], "Engine > Pistons");
    }
}
