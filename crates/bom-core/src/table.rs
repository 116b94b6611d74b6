//! BoM Table
//!
//! Search, pagination and CSV export over the flat parts list.

use serde::{Deserialize, Serialize};

use crate::catalog::PartItem;

/// Case-insensitive substring match on part name or breadcrumb
pub fn search_parts<'a>(parts: &'a [PartItem], query: &str) -> Vec<&'a PartItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return parts.iter().collect();
    }
    parts
        .iter()
        .filter(|p| {
            p.category_name.to_lowercase().contains(&needle)
                || p.full_path.to_lowercase().contains(&needle)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn next(self) -> Self {
        Self { page: self.page + 1, ..self }
    }

    pub fn prev(self) -> Self {
        Self {
            page: self.page.saturating_sub(1),
            ..self
        }
    }

    pub fn first(self) -> Self {
        Self { page: 0, ..self }
    }
}

/// One rendered page of a list
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// Page actually shown, after clamping
    pub page: usize,
    /// Always at least 1
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> PageSlice<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Position of the first item of this page in the whole list
    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }

    /// Items paired with their position in the whole list; the position is
    /// unique per row even when IDs repeat across branches
    pub fn numbered(&self) -> Vec<(usize, T)>
    where
        T: Clone,
    {
        let offset = self.offset();
        self.items.iter().cloned().enumerate().map(|(i, item)| (offset + i, item)).collect()
    }

    /// "Showing 26-50 of 132"
    pub fn range_label(&self) -> String {
        if self.total_items == 0 {
            return "No parts".to_string();
        }
        let start = self.offset() + 1;
        let end = start + self.items.len() - 1;
        format!("Showing {}-{} of {}", start, end, self.total_items)
    }
}

/// Cut `items` into the requested page, clamping the index into range
pub fn paginate<T: Clone>(items: &[T], pagination: Pagination) -> PageSlice<T> {
    let page_size = pagination.page_size.max(1);
    let total_items = items.len();
    let total_pages = ((total_items + page_size - 1) / page_size).max(1);
    let page = pagination.page.min(total_pages - 1);
    let start = page * page_size;
    let end = (start + page_size).min(total_items);
    PageSlice {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total_items,
        page_size,
    }
}

/// Parts as CSV with a header row
pub fn export_csv(parts: &[PartItem]) -> String {
    let mut out = String::from("category_id,category_name,full_path,level\n");
    for part in parts {
        out.push_str(&csv_field(&part.category_id));
        out.push(',');
        out.push_str(&csv_field(&part.category_name));
        out.push(',');
        out.push_str(&csv_field(&part.full_path));
        out.push(',');
        out.push_str(&part.level.to_string());
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parts(n: usize) -> Vec<PartItem> {
        (0..n)
            .map(|i| PartItem {
                category_id: i.to_string(),
                category_name: format!("Part {}", i),
                full_path: format!("Root > Part {}", i),
                level: 1,
            })
            .collect()
    }

    #[test]
    fn test_paginate() {
        let items = parts(7);
        let page = paginate(&items, Pagination { page: 1, page_size: 3 });
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].category_id, "3");
        assert_eq!(page.total_pages, 3);
        assert!(page.has_prev());
        assert!(page.has_next());
        assert_eq!(page.range_label(), "Showing 4-6 of 7");

        let last = paginate(&items, Pagination { page: 2, page_size: 3 });
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_next());
        assert_eq!(last.range_label(), "Showing 7-7 of 7");
    }

    #[test]
    fn test_paginate_clamps_page() {
        let items = parts(4);
        let page = paginate(&items, Pagination { page: 99, page_size: 3 });
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_paginate_empty() {
        let page = paginate::<PartItem>(&[], Pagination::new(10));
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.range_label(), "No parts");
    }

    #[test]
    fn test_numbered_rows_are_unique_with_repeated_ids() {
        // same leaf id under two different parents
        let mut items = parts(5);
        items[3].category_id = "1".into();
        items[4].category_id = "1".into();
        let page = paginate(&items, Pagination { page: 1, page_size: 3 });
        let rows: Vec<_> = page.numbered().into_iter().map(|(n, p)| (n, p.category_id)).collect();
        assert_eq!(rows, vec![(3, "1".to_string()), (4, "1".to_string())]);

        let all = paginate(&items, Pagination { page: 0, page_size: 10 }).numbered();
        let mut positions: Vec<_> = all.iter().map(|(n, _)| *n).collect();
        positions.dedup();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_search_parts() {
        let mut items = parts(3);
        items[1].full_path = "Brakes > Pads".into();
        assert_eq!(search_parts(&items, "").len(), 3);
        assert_eq!(search_parts(&items, "BRAKES")[0].category_id, "1");
        assert_eq!(search_parts(&items, "part 2").len(), 1);
        assert!(search_parts(&items, "nothing").is_empty());
    }

    #[test]
    fn test_export_csv_quotes() {
        let items = vec![PartItem {
            category_id: "7".into(),
            category_name: "Bolt, M8 \"long\"".into(),
            full_path: "Engine > Bolt, M8 \"long\"".into(),
            level: 1,
        }];
        assert_eq!(
            export_csv(&items),
            "category_id,category_name,full_path,level\n7,\"Bolt, M8 \"\"long\"\"\",\"Engine > Bolt, M8 \"\"long\"\"\",1\n"
        );
    }
}
