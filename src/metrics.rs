use std::collections::{HashMap, HashSet};

use crate::models::{Dataset, FieldRoleMap, GroupCount, MetricsSummary, Record};

pub const PLACED_VALUES: &[&str] = &["placed", "yes", "y", "true", "1"];
pub const INTERNSHIP_VALUES: &[&str] = &["yes", "y", "true", "1", "completed", "done"];
pub const NOT_PLACED_SENTINEL: &str = "not placed";
pub const BLANK_GROUP: &str = "(blank)";

pub fn summarize(dataset: &Dataset, roles: &FieldRoleMap) -> MetricsSummary {
    let total_count = dataset.len();
    let status = roles.placement_status.as_deref();
    let placed_count = count_matching(dataset, status, PLACED_VALUES);
    let internship_count =
        count_matching(dataset, roles.internship.as_deref(), INTERNSHIP_VALUES);

    let placed_average_cgpa = roles.cgpa.as_deref().and_then(|cgpa| {
        let header = status?;
        let placed = dataset
            .records
            .iter()
            .filter(|record| value_in(record, header, PLACED_VALUES));
        average(placed, cgpa)
    });

    MetricsSummary {
        total_count,
        placed_count,
        placement_rate: percentage(placed_count, total_count),
        average_cgpa: roles
            .cgpa
            .as_deref()
            .and_then(|header| average(dataset.records.iter(), header)),
        placed_average_cgpa,
        average_salary: roles
            .salary
            .as_deref()
            .and_then(|header| average(dataset.records.iter(), header)),
        highest_salary: roles
            .salary
            .as_deref()
            .and_then(|header| maximum(dataset.records.iter(), header)),
        distinct_companies: roles
            .company
            .as_deref()
            .map_or(0, |header| distinct_companies(dataset, header)),
        internship_count,
        internship_rate: percentage(internship_count, total_count),
    }
}

pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Parses a cell as a finite number, ignoring surrounding whitespace.
pub fn numeric_value(record: &Record, header: &str) -> Option<f64> {
    record
        .get(header)
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Mean over the values that parse; `None` when none do.
pub fn average<'a, I>(records: I, header: &str) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let (sum, count) = records
        .into_iter()
        .filter_map(|record| numeric_value(record, header))
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

pub fn maximum<'a, I>(records: I, header: &str) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter_map(|record| numeric_value(record, header))
        .fold(None, |best: Option<f64>, value| {
            Some(best.map_or(value, |best| best.max(value)))
        })
}

pub fn value_in(record: &Record, header: &str, accepted: &[&str]) -> bool {
    record
        .get(header)
        .map(|raw| raw.trim().to_lowercase())
        .is_some_and(|value| accepted.contains(&value.as_str()))
}

fn count_matching(dataset: &Dataset, header: Option<&str>, accepted: &[&str]) -> usize {
    let Some(header) = header else {
        return 0;
    };
    dataset
        .records
        .iter()
        .filter(|record| value_in(record, header, accepted))
        .count()
}

/// Unique trimmed employer names, without blanks or the "not placed" sentinel.
pub fn distinct_companies(dataset: &Dataset, header: &str) -> usize {
    dataset
        .records
        .iter()
        .filter_map(|record| record.get(header))
        .map(|raw| raw.trim())
        .filter(|value| !value.is_empty() && !value.eq_ignore_ascii_case(NOT_PLACED_SENTINEL))
        .collect::<HashSet<&str>>()
        .len()
}

/// Frequency table for one column, largest group first.
pub fn group_counts(dataset: &Dataset, header: &str) -> Vec<GroupCount> {
    if !dataset.has_header(header) {
        return Vec::new();
    }

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for record in &dataset.records {
        let value = record.get(header).map(|raw| raw.trim()).unwrap_or_default();
        let name = if value.is_empty() {
            BLANK_GROUP.to_string()
        } else {
            value.to_string()
        };
        let entry = counts.entry(name.clone()).or_insert(0);
        if *entry == 0 {
            order.push(name);
        }
        *entry += 1;
    }

    let mut groups: Vec<GroupCount> = order
        .into_iter()
        .map(|name| {
            let count = counts.get(&name).copied().unwrap_or(0);
            GroupCount { name, count }
        })
        .collect();

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups
}
