use crate::models::{ExposureType, ScreeningOutcome};

/// Fixed columns preceding the per-category exposure columns
const PREFIX_FIELDS: [&str; 6] = [
    "address",
    "screenStatus",
    "risk",
    "riskReason",
    "category",
    "name",
];

/// Build the report header for the resolved catalog
///
/// One column per category, or a `<category>_direct`/`<category>_indirect`
/// pair when the exposure split is enabled.
pub fn header(categories: &[String], include_indirect: bool) -> Vec<String> {
    let mut fields: Vec<String> = PREFIX_FIELDS.iter().map(|f| f.to_string()).collect();

    for category in categories {
        if include_indirect {
            fields.push(format!("{}_direct", category));
            fields.push(format!("{}_indirect", category));
        } else {
            fields.push(category.clone());
        }
    }

    fields
}

/// Flatten one screening outcome into a report row
///
/// Category columns follow catalog order. A missing exposure is a normal
/// zero-exposure case and yields an empty field, never an error; failed
/// outcomes carry their failure description in the status column with
/// everything else empty.
pub fn flatten(
    outcome: &ScreeningOutcome,
    categories: &[String],
    include_indirect: bool,
) -> Vec<String> {
    let mut row = vec![
        outcome.address.clone(),
        outcome.status.to_string(),
        outcome.risk.clone().unwrap_or_default(),
        outcome.risk_reason.clone().unwrap_or_default(),
        outcome.cluster_category.clone().unwrap_or_default(),
        outcome.cluster_name.clone().unwrap_or_default(),
    ];

    for category in categories {
        if include_indirect {
            row.push(exposure_value(outcome, category, ExposureType::Direct));
            row.push(exposure_value(outcome, category, ExposureType::Indirect));
        } else {
            // Unset and direct share the single bucket
            row.push(non_indirect_value(outcome, category));
        }
    }

    row
}

fn exposure_value(outcome: &ScreeningOutcome, category: &str, kind: ExposureType) -> String {
    outcome
        .exposures
        .iter()
        .find(|e| e.category == category && e.exposure_type == kind)
        .map(|e| e.value.to_string())
        .unwrap_or_default()
}

fn non_indirect_value(outcome: &ScreeningOutcome, category: &str) -> String {
    outcome
        .exposures
        .iter()
        .find(|e| e.category == category && e.exposure_type != ExposureType::Indirect)
        .map(|e| e.value.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exposure, RiskProfile, ScreeningOutcome};

    fn catalog() -> Vec<String> {
        vec!["mixing".to_string(), "exchange".to_string()]
    }

    fn outcome_with_direct_mixing() -> ScreeningOutcome {
        let profile = RiskProfile {
            exposures: vec![Exposure {
                category: "mixing".to_string(),
                exposure_type: ExposureType::Direct,
                value: 100.0,
            }],
            ..Default::default()
        };
        ScreeningOutcome::complete("0xAAA", profile)
    }

    #[test]
    fn test_header_single_column_per_category() {
        let fields = header(&catalog(), false);
        assert_eq!(
            fields,
            vec!["address", "screenStatus", "risk", "riskReason", "category", "name", "mixing", "exchange"]
        );
    }

    #[test]
    fn test_header_split_columns() {
        let fields = header(&catalog(), true);
        assert_eq!(&fields[6..], &[
            "mixing_direct",
            "mixing_indirect",
            "exchange_direct",
            "exchange_indirect"
        ]);
    }

    #[test]
    fn test_flatten_non_indirect_mode() {
        let row = flatten(&outcome_with_direct_mixing(), &catalog(), false);
        // mixing = 100, exchange absent
        assert_eq!(&row[6..], &["100", ""]);
    }

    #[test]
    fn test_flatten_indirect_mode() {
        let row = flatten(&outcome_with_direct_mixing(), &catalog(), true);
        assert_eq!(&row[6..], &["100", "", "", ""]);
    }

    #[test]
    fn test_unset_exposure_type_counts_as_direct() {
        let profile: RiskProfile = serde_json::from_str(
            r#"{"exposures":[{"category":"mixing","value":55.5}]}"#,
        )
        .unwrap();
        let outcome = ScreeningOutcome::complete("0xAAA", profile);

        let row = flatten(&outcome, &catalog(), false);
        assert_eq!(row[6], "55.5");

        let row = flatten(&outcome, &catalog(), true);
        assert_eq!(row[6], "55.5");
    }

    #[test]
    fn test_indirect_exposure_excluded_from_single_bucket() {
        let profile = RiskProfile {
            exposures: vec![Exposure {
                category: "mixing".to_string(),
                exposure_type: ExposureType::Indirect,
                value: 7.0,
            }],
            ..Default::default()
        };
        let outcome = ScreeningOutcome::complete("0xAAA", profile);

        let row = flatten(&outcome, &catalog(), false);
        assert_eq!(&row[6..], &["", ""]);

        let row = flatten(&outcome, &catalog(), true);
        assert_eq!(&row[6..], &["", "7", "", ""]);
    }

    #[test]
    fn test_zero_exposures_yield_empty_fields() {
        let outcome = ScreeningOutcome::complete("0xAAA", RiskProfile::default());
        let row = flatten(&outcome, &catalog(), false);
        assert_eq!(&row[6..], &["", ""]);
    }

    #[test]
    fn test_failed_outcome_row_shape() {
        let outcome = ScreeningOutcome::failed("0xBAD", "429 Too Many Requests");
        let row = flatten(&outcome, &catalog(), true);

        assert_eq!(row[0], "0xBAD");
        assert_eq!(row[1], "429 Too Many Requests");
        // Everything past the status is empty, including category columns
        assert!(row[2..].iter().all(|field| field.is_empty()));
        assert_eq!(row.len(), 6 + 2 * 2);
    }
}
