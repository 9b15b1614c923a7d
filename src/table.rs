use std::cmp::Ordering;

use crate::models::{Dataset, Record};

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub records: Vec<&'a Record>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Case-insensitive substring search across every cell. Empty queries match all.
pub fn search<'a>(dataset: &'a Dataset, query: &str) -> Vec<&'a Record> {
    let needle = query.trim().to_lowercase();
    dataset
        .records
        .iter()
        .filter(|record| {
            needle.is_empty()
                || record
                    .values()
                    .any(|value| value.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Stable sort on one column. Numeric when both cells parse, else case-insensitive text.
pub fn sort_by_column(records: &mut [&Record], header: &str, descending: bool) {
    records.sort_by(|a, b| {
        let ordering = compare_cells(
            a.get(header).map(String::as_str).unwrap_or_default(),
            b.get(header).map(String::as_str).unwrap_or_default(),
        );
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// One-based pagination; pages past the end come back empty.
pub fn paginate<'a>(records: Vec<&'a Record>, page: usize, page_size: usize) -> Page<'a> {
    let page_size = page_size.max(1);
    let total_matches = records.len();
    let total_pages = total_matches.div_ceil(page_size);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);

    let records = records.into_iter().skip(start).take(page_size).collect();
    Page {
        records,
        page,
        total_pages,
        total_matches,
    }
}
