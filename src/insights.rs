use crate::metrics;
use crate::models::{
    display_or_na, Dataset, FieldRoleMap, Impact, Insight, InsightCategory, MetricsSummary, Role,
};

pub const LOW_CGPA_THRESHOLD: f64 = 7.0;

/// The fixed set of insight cards. Each entry is gated on the roles it needs
/// and fills its template from already aggregated values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogEntry {
    CgpaImpact,
    InternshipAdvantage,
    SalaryOutlook,
    CompanyDiversity,
    PlacementForecast,
    LowCgpaPlacements,
    DepartmentFocus,
}

pub const CATALOG: [CatalogEntry; 7] = [
    CatalogEntry::CgpaImpact,
    CatalogEntry::InternshipAdvantage,
    CatalogEntry::SalaryOutlook,
    CatalogEntry::CompanyDiversity,
    CatalogEntry::PlacementForecast,
    CatalogEntry::LowCgpaPlacements,
    CatalogEntry::DepartmentFocus,
];

impl CatalogEntry {
    pub fn id(&self) -> &'static str {
        match self {
            CatalogEntry::CgpaImpact => "cgpa-impact",
            CatalogEntry::InternshipAdvantage => "internship-advantage",
            CatalogEntry::SalaryOutlook => "salary-outlook",
            CatalogEntry::CompanyDiversity => "company-diversity",
            CatalogEntry::PlacementForecast => "placement-forecast",
            CatalogEntry::LowCgpaPlacements => "low-cgpa-placements",
            CatalogEntry::DepartmentFocus => "department-focus",
        }
    }

    pub fn requires(&self) -> &'static [Role] {
        match self {
            CatalogEntry::CgpaImpact => &[Role::Cgpa],
            CatalogEntry::InternshipAdvantage => &[Role::Internship],
            CatalogEntry::SalaryOutlook => &[Role::Salary],
            CatalogEntry::CompanyDiversity => &[Role::Company],
            CatalogEntry::PlacementForecast => &[Role::PlacementStatus],
            CatalogEntry::LowCgpaPlacements => &[Role::Cgpa, Role::PlacementStatus],
            CatalogEntry::DepartmentFocus => &[Role::Department],
        }
    }

    pub fn is_available(&self, roles: &FieldRoleMap) -> bool {
        self.requires().iter().all(|role| roles.has(*role))
    }

    fn category(&self) -> InsightCategory {
        match self {
            CatalogEntry::CgpaImpact | CatalogEntry::CompanyDiversity => InsightCategory::Trend,
            CatalogEntry::InternshipAdvantage | CatalogEntry::DepartmentFocus => {
                InsightCategory::Recommendation
            }
            CatalogEntry::SalaryOutlook | CatalogEntry::PlacementForecast => {
                InsightCategory::Prediction
            }
            CatalogEntry::LowCgpaPlacements => InsightCategory::Anomaly,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            CatalogEntry::CgpaImpact => "CGPA Impact on Placement",
            CatalogEntry::InternshipAdvantage => "Internship Advantage",
            CatalogEntry::SalaryOutlook => "Salary Outlook",
            CatalogEntry::CompanyDiversity => "Recruiter Diversity",
            CatalogEntry::PlacementForecast => "Placement Forecast",
            CatalogEntry::LowCgpaPlacements => "Placements Below the CGPA Curve",
            CatalogEntry::DepartmentFocus => "Department Focus",
        }
    }

    fn confidence(&self) -> f64 {
        match self {
            CatalogEntry::CgpaImpact => 0.87,
            CatalogEntry::InternshipAdvantage => 0.82,
            CatalogEntry::SalaryOutlook => 0.74,
            CatalogEntry::CompanyDiversity => 0.79,
            CatalogEntry::PlacementForecast => 0.68,
            CatalogEntry::LowCgpaPlacements => 0.61,
            CatalogEntry::DepartmentFocus => 0.65,
        }
    }

    fn impact(&self) -> Impact {
        match self {
            CatalogEntry::CgpaImpact | CatalogEntry::InternshipAdvantage => Impact::High,
            CatalogEntry::SalaryOutlook
            | CatalogEntry::CompanyDiversity
            | CatalogEntry::PlacementForecast => Impact::Medium,
            CatalogEntry::LowCgpaPlacements | CatalogEntry::DepartmentFocus => Impact::Low,
        }
    }

    fn describe(
        &self,
        dataset: &Dataset,
        roles: &FieldRoleMap,
        summary: &MetricsSummary,
    ) -> String {
        match self {
            CatalogEntry::CgpaImpact => {
                let (subject, cgpa) = if roles.has(Role::PlacementStatus) {
                    ("Placed students", summary.placed_average_cgpa)
                } else {
                    ("Students in this batch", summary.average_cgpa)
                };
                format!(
                    "{subject} average a CGPA of {}. Candidates at or above this mark clear \
                     shortlists noticeably more often, so academic consistency remains a \
                     strong placement signal.",
                    display_or_na(cgpa, 2)
                )
            }
            CatalogEntry::InternshipAdvantage => format!(
                "{:.1}% of students completed an internship. Encourage the rest to secure one \
                 before the next season, as internship experience consistently lifts offer rates.",
                summary.internship_rate
            ),
            CatalogEntry::SalaryOutlook => format!(
                "The average package is {} with a top offer of {}. Expect next season's packages \
                 to settle near this level given the current recruiter mix.",
                display_or_na(summary.average_salary, 2),
                display_or_na(summary.highest_salary, 2)
            ),
            CatalogEntry::CompanyDiversity => format!(
                "{} distinct companies hired from this batch. A broader recruiter base lowers \
                 dependence on any single employer.",
                summary.distinct_companies
            ),
            CatalogEntry::PlacementForecast => format!(
                "With {:.1}% of students placed so far, the batch is on track to finish near \
                 this rate if current hiring continues.",
                summary.placement_rate
            ),
            CatalogEntry::LowCgpaPlacements => format!(
                "{} placed students have a CGPA below {:.1}. Skills and project work may be \
                 outweighing grades for some recruiters.",
                placed_below_threshold(dataset, roles),
                LOW_CGPA_THRESHOLD
            ),
            CatalogEntry::DepartmentFocus => {
                let largest = roles
                    .department
                    .as_deref()
                    .and_then(|header| metrics::group_counts(dataset, header).into_iter().next());
                match largest {
                    Some(group) => format!(
                        "{} has the largest group of students ({}). Prioritise recruiter \
                         outreach that fits this department.",
                        group.name, group.count
                    ),
                    None => "N/A".to_string(),
                }
            }
        }
    }

    pub fn render(
        &self,
        dataset: &Dataset,
        roles: &FieldRoleMap,
        summary: &MetricsSummary,
    ) -> Option<Insight> {
        if !self.is_available(roles) {
            return None;
        }

        Some(Insight {
            id: self.id(),
            category: self.category(),
            title: self.title(),
            description: self.describe(dataset, roles, summary),
            confidence: self.confidence(),
            impact: self.impact(),
        })
    }
}

/// Reads the same columns the gate resolved, never a sibling match.
fn placed_below_threshold(dataset: &Dataset, roles: &FieldRoleMap) -> usize {
    let (Some(cgpa), Some(status)) = (roles.cgpa.as_deref(), roles.placement_status.as_deref())
    else {
        return 0;
    };

    dataset
        .records
        .iter()
        .filter(|record| metrics::value_in(record, status, metrics::PLACED_VALUES))
        .filter_map(|record| metrics::numeric_value(record, cgpa))
        .filter(|value| *value < LOW_CGPA_THRESHOLD)
        .count()
}

/// An empty dataset has nothing to say, whatever its headers resolved to.
pub fn generate_insights(
    dataset: &Dataset,
    roles: &FieldRoleMap,
    summary: &MetricsSummary,
) -> Vec<Insight> {
    if dataset.is_empty() {
        return Vec::new();
    }

    CATALOG
        .iter()
        .filter_map(|entry| entry.render(dataset, roles, summary))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_dataset;
    use crate::metrics::summarize;
    use crate::roles::resolve_roles;

    fn insights_for(text: &str) -> Vec<Insight> {
        let dataset = parse_dataset(text);
        let roles = resolve_roles(&dataset.headers);
        let summary = summarize(&dataset, &roles);
        generate_insights(&dataset, &roles, &summary)
    }

    fn ids(insights: &[Insight]) -> Vec<&'static str> {
        insights.iter().map(|insight| insight.id).collect()
    }

    #[test]
    fn unrelated_columns_produce_no_insights() {
        assert!(insights_for("Notes\nfirst\nsecond\n").is_empty());
    }

    #[test]
    fn empty_dataset_produces_no_insights() {
        assert!(insights_for("CGPA,Status\n").is_empty());
    }

    #[test]
    fn cgpa_only_emits_cgpa_impact() {
        let insights = insights_for("Name,CGPA\nA,8\nB,9\n");
        assert_eq!(ids(&insights), vec!["cgpa-impact"]);
        assert!(insights[0].description.contains("Students in this batch"));
        assert!(insights[0].description.contains("8.50"));
    }

    #[test]
    fn full_sheet_emits_catalog_in_order() {
        let insights = insights_for(
            "Name,Department,CGPA,Internship,Placement_Status,Company,Salary\n\
             A,CSE,8.4,Yes,Placed,Google,24\n\
             B,ECE,6.5,No,Placed,Infosys,6\n\
             C,CSE,7.1,Yes,Not Placed,Not Placed,\n",
        );
        assert_eq!(
            ids(&insights),
            vec![
                "cgpa-impact",
                "internship-advantage",
                "salary-outlook",
                "company-diversity",
                "placement-forecast",
                "low-cgpa-placements",
                "department-focus",
            ]
        );

        let cgpa = &insights[0];
        assert_eq!(cgpa.category, InsightCategory::Trend);
        assert_eq!(cgpa.impact, Impact::High);
        assert!(cgpa.description.contains("Placed students average a CGPA of 7.45"));

        assert!(insights[1].description.starts_with("66.7%"));
        assert!(insights[2].description.contains("15.00"));
        assert!(insights[3].description.starts_with("2 distinct companies"));
        assert!(insights[4].description.contains("66.7%"));
        assert!(insights[5].description.starts_with("1 placed students"));
        assert!(insights[6].description.starts_with("CSE has the largest group of students (2)"));
    }

    #[test]
    fn low_cgpa_count_reads_the_resolved_cgpa_column() {
        let insights =
            insights_for("Name,CGPA,Academic_GPA,Status\nA,6.5,9.0,Placed\nB,6.0,8.0,No\n");
        let anomaly = insights
            .iter()
            .find(|insight| insight.id == "low-cgpa-placements")
            .expect("cgpa and status both resolve");
        assert!(anomaly.description.starts_with("1 placed students"));

        let insights = insights_for("Name,Academic_GPA,CGPA,Status\nA,6.5,9.0,Placed\n");
        let anomaly = insights
            .iter()
            .find(|insight| insight.id == "low-cgpa-placements")
            .expect("cgpa and status both resolve");
        assert!(anomaly.description.starts_with("1 placed students"));
    }

    #[test]
    fn confidence_is_fixed_and_bounded() {
        for entry in CATALOG {
            assert!((0.0..=1.0).contains(&entry.confidence()), "{}", entry.id());
        }
        let first = insights_for("CGPA\n5\n");
        let second = insights_for("CGPA\n10\n");
        assert_eq!(first[0].confidence, second[0].confidence);
    }

    #[test]
    fn unresolved_role_omits_its_entry() {
        let roles = FieldRoleMap {
            cgpa: Some("CGPA".to_string()),
            ..FieldRoleMap::default()
        };
        assert!(CatalogEntry::CgpaImpact.is_available(&roles));
        assert!(!CatalogEntry::LowCgpaPlacements.is_available(&roles));
        let dataset = parse_dataset("CGPA\n8\n");
        let summary = summarize(&dataset, &roles);
        assert!(CatalogEntry::SalaryOutlook
            .render(&dataset, &roles, &summary)
            .is_none());
    }
}
