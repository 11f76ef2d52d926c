//! Built-in report family definitions.
//!
//! Families are configuration values: each function returns a fresh
//! [`ReportFamily`] describing one group of endpoints from the AppsFlyer
//! reporting API documentation.

use afreport_types::ReportFamily;

/// Extra fields requested for uninstall queries.
const UNINSTALL_FIELDS: [&str; 5] = [
    "gp_referrer",
    "gp_click_time",
    "gp_install_begin",
    "amazon_aid",
    "keyword_match_type",
];

/// Aggregate performance reports.
#[must_use]
pub fn performance() -> ReportFamily {
    ReportFamily::new(
        "performance",
        vec![
            "partners_report",
            "partners_by_date_report",
            "daily_report",
            "geo_report",
            "geo_by_date_report",
        ],
    )
}

/// Raw data exports, including retargeting variants and the uninstall report
/// with its alternate field list.
#[must_use]
pub fn raw_data() -> ReportFamily {
    let additional: Vec<&str> = [
        "install_app_store",
        "contributor1_match_type",
        "contributor2_match_type",
        "contributor3_match_type",
        "match_type",
        "device_category",
    ]
    .into_iter()
    .chain(UNINSTALL_FIELDS)
    .collect();

    ReportFamily::new(
        "raw_data",
        vec![
            "installs_report",
            "in_app_events_report",
            "organic_installs_report",
            "organic_in_app_events_report",
            "uninstall_events_report",
        ],
    )
    .with_additional_fields(additional)
    .with_retargeting(vec!["installs_report", "in_app_events_report"])
    .expect("built-in retargeting subset")
    .with_alternate_fields(vec!["uninstall_events_report"], UNINSTALL_FIELDS.to_vec())
    .expect("built-in alternate-field subset")
}

/// Targeting validation rules reports.
#[must_use]
pub fn targeting_validation() -> ReportFamily {
    ReportFamily::new(
        "targeting_validation",
        vec!["invalid_installs_report", "invalid_in_app_events_report"],
    )
    .with_additional_fields(vec![
        "rejected_reason",
        "rejected_reason_value",
        "contributor1_match_type",
        "contributor2_match_type",
        "contributor3_match_type",
        "match_type",
        "device_category",
        "gp_referrer",
        "gp_click_time",
        "gp_install_begin",
        "amazon_aid",
        "keyword_match_type",
    ])
}

/// Returns all built-in families.
#[must_use]
pub fn all() -> Vec<ReportFamily> {
    vec![performance(), raw_data(), targeting_validation()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_members() {
        let family = performance();
        assert_eq!(family.report_names().len(), 5);
        assert!(family.contains("geo_report"));
        assert!(family.retargeting_eligible().is_empty());
        assert!(family.additional_fields().is_empty());
    }

    #[test]
    fn test_raw_data_policy() {
        let family = raw_data();
        assert_eq!(family.report_names().len(), 5);
        assert!(family.is_retargeting_eligible("installs_report"));
        assert!(family.is_retargeting_eligible("in_app_events_report"));
        assert!(!family.is_retargeting_eligible("organic_installs_report"));
        assert!(family.uses_alternate_fields("uninstall_events_report"));
        assert_eq!(family.alternate_fields().len(), 5);
        assert_eq!(family.additional_fields().len(), 11);
    }

    #[test]
    fn test_targeting_validation_fields() {
        let family = targeting_validation();
        assert_eq!(family.report_names().len(), 2);
        assert_eq!(family.additional_fields().len(), 12);
        assert!(family.retargeting_eligible().is_empty());
    }

    #[test]
    fn test_all_families() {
        assert_eq!(all().len(), 3);
    }
}
