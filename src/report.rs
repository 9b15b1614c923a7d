use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::dashboard::DashboardContext;
use crate::metrics::group_counts;
use crate::models::{display_or_na, GroupCount, Insight, MetricsSummary, Role};

pub fn metric_cards(summary: &MetricsSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Total students", summary.total_count.to_string()),
        ("Placed", summary.placed_count.to_string()),
        ("Placement rate", format!("{:.1}%", summary.placement_rate)),
        ("Average CGPA", display_or_na(summary.average_cgpa, 2)),
        ("Average package", display_or_na(summary.average_salary, 2)),
        ("Highest package", display_or_na(summary.highest_salary, 2)),
        ("Companies", summary.distinct_companies.to_string()),
        ("Internship rate", format!("{:.1}%", summary.internship_rate)),
    ]
}

pub fn insight_line(insight: &Insight) -> String {
    format!(
        "[{}] {} ({} impact, {:.0}% confidence): {}",
        insight.category,
        insight.title,
        insight.impact,
        insight.confidence * 100.0,
        insight.description
    )
}

fn write_groups(output: &mut String, title: &str, groups: &[GroupCount]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    if groups.is_empty() {
        let _ = writeln!(output, "No values recorded.");
        return;
    }

    for group in groups {
        let _ = writeln!(output, "- {}: {}", group.name, group.count);
    }
}

pub fn build_report(
    source: &str,
    generated_at: DateTime<Utc>,
    context: &DashboardContext,
    insights: &[Insight],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Placement Insights Report");
    let _ = writeln!(
        output,
        "Generated for {} at {} (upload {})",
        source,
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        context.upload_id
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");

    if context.dataset.is_empty() {
        let _ = writeln!(output, "No placement data available.");
        return output;
    }

    for (label, value) in metric_cards(&context.metrics) {
        let _ = writeln!(output, "- {label}: {value}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Insights");

    if insights.is_empty() {
        let _ = writeln!(output, "No insights for the columns in this file.");
    } else {
        for insight in insights {
            let _ = writeln!(output, "- {}", insight_line(insight));
        }
    }

    let breakdowns = [
        (Role::PlacementStatus, "Placement Status"),
        (Role::Company, "Companies"),
        (Role::Department, "Departments"),
    ];
    for (role, title) in breakdowns {
        if let Some(header) = context.roles.get(role) {
            write_groups(&mut output, title, &group_counts(&context.dataset, header));
        }
    }

    output
}
