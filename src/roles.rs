use tracing::debug;

use crate::models::{FieldRoleMap, Role};

/// A pure predicate over one header name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Case-insensitive substring containment.
    Contains(&'static str),
    /// Literal, case-sensitive equality.
    Exact(&'static str),
}

impl Matcher {
    pub fn matches(&self, header: &str) -> bool {
        match self {
            Matcher::Contains(needle) => header.to_lowercase().contains(needle),
            Matcher::Exact(name) => header == *name,
        }
    }
}

/// Company is matched on literal names while every other role uses substrings.
pub const ROLE_TABLE: &[(Role, &[Matcher])] = &[
    (Role::Cgpa, &[Matcher::Contains("cgpa"), Matcher::Contains("gpa")]),
    (
        Role::Salary,
        &[
            Matcher::Contains("salary"),
            Matcher::Contains("package"),
            Matcher::Contains("ctc"),
        ],
    ),
    (
        Role::PlacementStatus,
        &[
            Matcher::Contains("placement_status"),
            Matcher::Contains("status"),
            Matcher::Contains("placed"),
        ],
    ),
    (
        Role::Company,
        &[
            Matcher::Exact("Company"),
            Matcher::Exact("Employer"),
            Matcher::Exact("Organization"),
            Matcher::Exact("Company_Name"),
        ],
    ),
    (
        Role::Internship,
        &[Matcher::Contains("internship"), Matcher::Contains("intern")],
    ),
    (
        Role::Department,
        &[
            Matcher::Contains("department"),
            Matcher::Contains("branch"),
            Matcher::Contains("dept"),
        ],
    ),
];

pub fn matchers_for(role: Role) -> &'static [Matcher] {
    ROLE_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == role)
        .map(|(_, matchers)| *matchers)
        .unwrap_or(&[])
}

/// Headers are scanned in order; the first one any matcher accepts wins.
pub fn resolve_role<'a, I>(headers: I, role: Role) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let matchers = matchers_for(role);
    headers
        .into_iter()
        .find(|header| matchers.iter().any(|matcher| matcher.matches(header)))
}

pub fn resolve_roles(headers: &[String]) -> FieldRoleMap {
    let mut roles = FieldRoleMap::default();
    for role in Role::ALL {
        let header = resolve_role(headers.iter().map(String::as_str), role);
        debug!(role = %role, header = header.unwrap_or("N/A"), "resolved role");
        roles.set(role, header.map(str::to_string));
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn substring_matchers_ignore_case() {
        assert!(Matcher::Contains("gpa").matches("Academic_GPA"));
        assert!(Matcher::Contains("ctc").matches("Offered CTC (LPA)"));
        assert!(!Matcher::Contains("salary").matches("Name"));
    }

    #[test]
    fn exact_matchers_are_literal() {
        assert!(Matcher::Exact("Company").matches("Company"));
        assert!(!Matcher::Exact("Company").matches("company"));
        assert!(!Matcher::Exact("Company").matches("Company Name"));
    }

    #[test]
    fn first_header_in_order_wins() {
        let roles = resolve_roles(&headers(&["Name", "CGPA", "Academic_GPA"]));
        assert_eq!(roles.cgpa.as_deref(), Some("CGPA"));

        let roles = resolve_roles(&headers(&["Academic_GPA", "CGPA"]));
        assert_eq!(roles.cgpa.as_deref(), Some("Academic_GPA"));
    }

    #[test]
    fn resolves_a_typical_placement_sheet() {
        let roles = resolve_roles(&headers(&[
            "Student_ID",
            "Name",
            "Branch",
            "CGPA",
            "Internship_Done",
            "Placement_Status",
            "Company_Name",
            "Salary_Package",
        ]));
        assert_eq!(roles.cgpa.as_deref(), Some("CGPA"));
        assert_eq!(roles.salary.as_deref(), Some("Salary_Package"));
        assert_eq!(roles.placement_status.as_deref(), Some("Placement_Status"));
        assert_eq!(roles.company.as_deref(), Some("Company_Name"));
        assert_eq!(roles.internship.as_deref(), Some("Internship_Done"));
        assert_eq!(roles.department.as_deref(), Some("Branch"));
    }

    #[test]
    fn company_does_not_fall_back_to_substrings() {
        let roles = resolve_roles(&headers(&["Hiring company"]));
        assert_eq!(roles.company, None);
    }

    #[test]
    fn unrelated_headers_leave_every_role_unresolved() {
        let roles = resolve_roles(&headers(&["Notes"]));
        assert_eq!(roles, FieldRoleMap::default());
        for role in Role::ALL {
            assert!(!roles.has(role));
        }
    }

    #[test]
    fn resolves_over_any_ordered_key_list() {
        let keys = ["Name", "Package", "CTC"];
        assert_eq!(resolve_role(keys, Role::Salary), Some("Package"));
        assert_eq!(resolve_role(keys, Role::Cgpa), None);
    }

    #[test]
    fn every_role_has_matchers() {
        for role in Role::ALL {
            assert!(!matchers_for(role).is_empty(), "{role} has no matchers");
        }
    }
}
