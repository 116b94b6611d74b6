//! Property tests for category tree processing.

use bom_core::catalog::{
    build_tree, count_all_nodes, filter_by_top_level_id, flatten_leaves, CategoryMap, CategoryNode,
    ProcessOptions, TopLevelFilter, PATH_SEPARATOR,
};
use proptest::prelude::*;

/// Tree shape without IDs; IDs are assigned afterwards so they are unique
#[derive(Debug, Clone)]
struct Shape {
    text: String,
    children: Vec<Shape>,
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = "[A-Za-z][A-Za-z ]{0,8}".prop_map(|text| Shape { text, children: Vec::new() });
    leaf.prop_recursive(4, 48, 4, |inner| {
        ("[A-Za-z][A-Za-z ]{0,8}", prop::collection::vec(inner, 0..4))
            .prop_map(|(text, children)| Shape { text, children })
    })
}

fn forest() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(shape(), 0..5)
}

fn to_map(shapes: &[Shape], next_id: &mut u32) -> CategoryMap {
    let mut map = CategoryMap::new();
    for s in shapes {
        *next_id += 1;
        let id = next_id.to_string();
        let node = CategoryNode {
            text: s.text.clone(),
            children: to_map(&s.children, next_id),
        };
        map.insert(id, node);
    }
    map
}

fn build(shapes: &[Shape]) -> CategoryMap {
    to_map(shapes, &mut 0)
}

/// (id, full path, level) of every leaf, depth-first
fn expected_leaves(map: &CategoryMap, ancestors: &mut Vec<String>, out: &mut Vec<(String, String, usize)>) {
    for (id, node) in map.iter() {
        ancestors.push(node.text.clone());
        if node.children.is_empty() {
            out.push((id.to_string(), ancestors.join(PATH_SEPARATOR), ancestors.len() - 1));
        } else {
            expected_leaves(&node.children, ancestors, out);
        }
        ancestors.pop();
    }
}

fn total_nodes(map: &CategoryMap) -> usize {
    map.iter().map(|(_, n)| 1 + total_nodes(&n.children)).sum()
}

proptest! {
    #[test]
    fn flatten_yields_every_leaf_once_in_order(shapes in forest()) {
        let map = build(&shapes);
        let parts = flatten_leaves(&map, ProcessOptions::default()).unwrap();

        let mut expected = Vec::new();
        expected_leaves(&map, &mut Vec::new(), &mut expected);
        let actual: Vec<_> = parts
            .iter()
            .map(|p| (p.category_id.clone(), p.full_path.clone(), p.level))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn tree_counts_every_node(shapes in forest()) {
        let map = build(&shapes);
        let tree = build_tree(&map, ProcessOptions::default()).unwrap();
        prop_assert_eq!(count_all_nodes(&tree), total_nodes(&map));
    }

    #[test]
    fn build_tree_is_deterministic(shapes in forest()) {
        let map = build(&shapes);
        let a = build_tree(&map, ProcessOptions::default()).unwrap();
        let b = build_tree(&map, ProcessOptions::default()).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn filter_all_is_identity(shapes in forest()) {
        let map = build(&shapes);
        prop_assert_eq!(filter_by_top_level_id(&map, &TopLevelFilter::All), map);
    }

    #[test]
    fn filter_unknown_id_is_empty(shapes in forest()) {
        let map = build(&shapes);
        let filtered = filter_by_top_level_id(&map, &TopLevelFilter::Id("not-an-id".into()));
        prop_assert!(filtered.is_empty());
    }

    #[test]
    fn filter_known_id_keeps_that_branch(shapes in forest(), pick in any::<prop::sample::Index>()) {
        let map = build(&shapes);
        prop_assume!(!map.is_empty());
        let keys: Vec<String> = map.keys().map(str::to_string).collect();
        let id = pick.get(&keys).clone();

        let filtered = filter_by_top_level_id(&map, &TopLevelFilter::Id(id.clone()));
        prop_assert_eq!(filtered.len(), 1);
        prop_assert_eq!(filtered.get(&id), map.get(&id));
    }

    #[test]
    fn tree_paths_extend_parent_paths(shapes in forest()) {
        let map = build(&shapes);
        let tree = build_tree(&map, ProcessOptions::default()).unwrap();
        let mut stack: Vec<_> = tree.iter().collect();
        while let Some(item) = stack.pop() {
            prop_assert_eq!(item.has_children, !item.children.is_empty());
            for child in &item.children {
                let expected = format!("{}{}{}", item.full_path, PATH_SEPARATOR, child.category_name);
                prop_assert_eq!(&child.full_path, &expected);
                prop_assert_eq!(child.level, item.level + 1);
                stack.push(child);
            }
        }
    }
}
