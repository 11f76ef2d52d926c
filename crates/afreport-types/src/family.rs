//! Report family definitions.

use crate::{ReportError, Result};

/// A named group of related report endpoints sharing fetch mechanics and
/// field policy.
///
/// Families are plain configuration values: new families are data, not new
/// types. The retargeting-eligible and alternate-field subsets are validated
/// against the member list at construction, so a built family always holds
/// its subset invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFamily {
    name: String,
    report_names: Vec<String>,
    retargeting_eligible: Vec<String>,
    alternate_field_reports: Vec<String>,
    additional_fields: Vec<String>,
    alternate_fields: Vec<String>,
}

impl ReportFamily {
    /// Creates a new family with the given member report names.
    pub fn new<S: Into<String>>(name: impl Into<String>, report_names: Vec<S>) -> Self {
        Self {
            name: name.into(),
            report_names: report_names.into_iter().map(Into::into).collect(),
            retargeting_eligible: Vec::new(),
            alternate_field_reports: Vec::new(),
            additional_fields: Vec::new(),
            alternate_fields: Vec::new(),
        }
    }

    /// Marks a subset of the member reports as retargeting-eligible.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any name is not a family member.
    pub fn with_retargeting<S: Into<String>>(mut self, names: Vec<S>) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        self.check_members(&names)?;
        self.retargeting_eligible = names;
        Ok(self)
    }

    /// Marks a subset of the member reports as using the alternate field
    /// list instead of the family default.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any report name is not a family member.
    pub fn with_alternate_fields<S: Into<String>>(
        mut self,
        reports: Vec<S>,
        fields: Vec<S>,
    ) -> Result<Self> {
        let reports: Vec<String> = reports.into_iter().map(Into::into).collect();
        self.check_members(&reports)?;
        self.alternate_field_reports = reports;
        self.alternate_fields = fields.into_iter().map(Into::into).collect();
        Ok(self)
    }

    /// Sets the default additional query fields for every member report.
    #[must_use]
    pub fn with_additional_fields<S: Into<String>>(mut self, fields: Vec<S>) -> Self {
        self.additional_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    fn check_members(&self, names: &[String]) -> Result<()> {
        for name in names {
            if !self.report_names.iter().any(|n| n == name) {
                return Err(ReportError::Validation(format!(
                    "report '{name}' is not a member of family '{}'",
                    self.name
                )));
            }
        }
        Ok(())
    }

    /// Returns the family name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member report names, in iteration order.
    #[must_use]
    pub fn report_names(&self) -> &[String] {
        &self.report_names
    }

    /// Returns the retargeting-eligible subset.
    #[must_use]
    pub fn retargeting_eligible(&self) -> &[String] {
        &self.retargeting_eligible
    }

    /// Returns the reports that use the alternate field list.
    #[must_use]
    pub fn alternate_field_reports(&self) -> &[String] {
        &self.alternate_field_reports
    }

    /// Returns the default additional query fields.
    #[must_use]
    pub fn additional_fields(&self) -> &[String] {
        &self.additional_fields
    }

    /// Returns the alternate field list.
    #[must_use]
    pub fn alternate_fields(&self) -> &[String] {
        &self.alternate_fields
    }

    /// Returns true if the given report is a family member.
    #[must_use]
    pub fn contains(&self, report_name: &str) -> bool {
        self.report_names.iter().any(|n| n == report_name)
    }

    /// Returns true if the given report is retargeting-eligible.
    #[must_use]
    pub fn is_retargeting_eligible(&self, report_name: &str) -> bool {
        self.retargeting_eligible.iter().any(|n| n == report_name)
    }

    /// Returns true if the given report uses the alternate field list.
    #[must_use]
    pub fn uses_alternate_fields(&self, report_name: &str) -> bool {
        self.alternate_field_reports.iter().any(|n| n == report_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_build() {
        let family = ReportFamily::new("raw_data", vec!["installs_report", "uninstall_events_report"])
            .with_retargeting(vec!["installs_report"])
            .unwrap()
            .with_alternate_fields(vec!["uninstall_events_report"], vec!["gp_referrer"])
            .unwrap();

        assert!(family.contains("installs_report"));
        assert!(family.is_retargeting_eligible("installs_report"));
        assert!(!family.is_retargeting_eligible("uninstall_events_report"));
        assert!(family.uses_alternate_fields("uninstall_events_report"));
    }

    #[test]
    fn test_subset_must_be_member() {
        let result = ReportFamily::new("perf", vec!["daily_report"])
            .with_retargeting(vec!["installs_report"]);

        assert!(matches!(result, Err(ReportError::Validation(_))));
    }
}
