use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// One parsed data row, keyed by header name.
pub type Record = HashMap<String, String>;

/// Every record from one upload, sharing the header set of the first line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_header(&self, header: &str) -> bool {
        self.headers.iter().any(|h| h == header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Cgpa,
    Salary,
    PlacementStatus,
    Company,
    Internship,
    Department,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Cgpa,
        Role::Salary,
        Role::PlacementStatus,
        Role::Company,
        Role::Internship,
        Role::Department,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Cgpa => "cgpa",
            Role::Salary => "salary",
            Role::PlacementStatus => "placementStatus",
            Role::Company => "company",
            Role::Internship => "internship",
            Role::Department => "department",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Role → concrete header in the current dataset, if any header satisfied it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRoleMap {
    pub cgpa: Option<String>,
    pub salary: Option<String>,
    pub placement_status: Option<String>,
    pub company: Option<String>,
    pub internship: Option<String>,
    pub department: Option<String>,
}

impl FieldRoleMap {
    pub fn get(&self, role: Role) -> Option<&str> {
        let slot = match role {
            Role::Cgpa => &self.cgpa,
            Role::Salary => &self.salary,
            Role::PlacementStatus => &self.placement_status,
            Role::Company => &self.company,
            Role::Internship => &self.internship,
            Role::Department => &self.department,
        };
        slot.as_deref()
    }

    pub fn set(&mut self, role: Role, header: Option<String>) {
        let slot = match role {
            Role::Cgpa => &mut self.cgpa,
            Role::Salary => &mut self.salary,
            Role::PlacementStatus => &mut self.placement_status,
            Role::Company => &mut self.company,
            Role::Internship => &mut self.internship,
            Role::Department => &mut self.department,
        };
        *slot = header;
    }

    pub fn has(&self, role: Role) -> bool {
        self.get(role).is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub total_count: usize,
    pub placed_count: usize,
    pub placement_rate: f64,
    pub average_cgpa: Option<f64>,
    pub placed_average_cgpa: Option<f64>,
    pub average_salary: Option<f64>,
    pub highest_salary: Option<f64>,
    pub distinct_companies: usize,
    pub internship_count: usize,
    pub internship_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Trend,
    Recommendation,
    Prediction,
    Anomaly,
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InsightCategory::Trend => "trend",
            InsightCategory::Recommendation => "recommendation",
            InsightCategory::Prediction => "prediction",
            InsightCategory::Anomaly => "anomaly",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insight {
    pub id: &'static str,
    pub category: InsightCategory,
    pub title: &'static str,
    pub description: String,
    /// Fixed per catalog entry, in [0, 1].
    pub confidence: f64,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub name: String,
    pub count: usize,
}

/// Renders an optional metric the way the cards show it.
pub fn display_or_na(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "N/A".to_string(),
    }
}
