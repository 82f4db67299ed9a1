use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether exposure to a risk category is held directly or via intermediaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExposureType {
    Direct,
    Indirect,
}

impl Default for ExposureType {
    fn default() -> Self {
        // The API omits the discriminator for plain direct exposure
        ExposureType::Direct
    }
}

/// USD-denominated attribution of an address's funds to one risk category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exposure {
    pub category: String,
    #[serde(rename = "exposureType", default)]
    pub exposure_type: ExposureType,
    pub value: f64,
}

/// Cluster attribution returned with a risk profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cluster {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Risk profile for one address as returned by the retrieval endpoint
///
/// Every field is optional on the wire; absent fields stay `None` rather
/// than failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Risk rating; the API returns either a label ("Severe") or a score
    #[serde(default)]
    pub risk: Option<Value>,
    #[serde(rename = "riskReason", default)]
    pub risk_reason: Option<String>,
    #[serde(default)]
    pub cluster: Option<Cluster>,
    #[serde(default)]
    pub exposures: Vec<Exposure>,
}

impl RiskProfile {
    /// Render the risk rating as a plain string, whatever its wire type
    pub fn risk_label(&self) -> Option<String> {
        self.risk.as_ref().map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Terminal state of one address screening
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenStatus {
    Complete,
    Failed(String),
}

impl ScreenStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, ScreenStatus::Complete)
    }
}

impl std::fmt::Display for ScreenStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenStatus::Complete => write!(f, "complete"),
            ScreenStatus::Failed(reason) => write!(f, "{}", reason),
        }
    }
}

/// The uniform record produced for exactly one input address
///
/// Exactly one outcome exists per input address regardless of remote
/// failures; a failed lookup yields a record with `status` holding the
/// failure description and every profile field empty.
#[derive(Debug, Clone)]
pub struct ScreeningOutcome {
    pub address: String,
    pub status: ScreenStatus,
    pub risk: Option<String>,
    pub risk_reason: Option<String>,
    pub cluster_category: Option<String>,
    pub cluster_name: Option<String>,
    pub exposures: Vec<Exposure>,
}

impl ScreeningOutcome {
    /// Build the success record from a retrieved profile
    pub fn complete(address: impl Into<String>, profile: RiskProfile) -> Self {
        let risk = profile.risk_label();
        let (cluster_category, cluster_name) = match profile.cluster {
            Some(cluster) => (cluster.category, cluster.name),
            None => (None, None),
        };

        Self {
            address: address.into(),
            status: ScreenStatus::Complete,
            risk,
            risk_reason: profile.risk_reason,
            cluster_category,
            cluster_name,
            exposures: profile.exposures,
        }
    }

    /// Build the failure record; profile fields stay empty
    pub fn failed(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            status: ScreenStatus::Failed(reason.into()),
            risk: None,
            risk_reason: None,
            cluster_category: None,
            cluster_name: None,
            exposures: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposure_type_defaults_to_direct() {
        let exposure: Exposure =
            serde_json::from_str(r#"{"category":"mixing","value":42.0}"#).unwrap();
        assert_eq!(exposure.exposure_type, ExposureType::Direct);
    }

    #[test]
    fn test_profile_tolerates_missing_fields() {
        let profile: RiskProfile = serde_json::from_str("{}").unwrap();
        assert!(profile.risk.is_none());
        assert!(profile.cluster.is_none());
        assert!(profile.exposures.is_empty());
    }

    #[test]
    fn test_risk_label_renders_numbers() {
        let profile: RiskProfile = serde_json::from_str(r#"{"risk":7}"#).unwrap();
        assert_eq!(profile.risk_label().as_deref(), Some("7"));

        let profile: RiskProfile = serde_json::from_str(r#"{"risk":"Severe"}"#).unwrap();
        assert_eq!(profile.risk_label().as_deref(), Some("Severe"));
    }

    #[test]
    fn test_failed_outcome_has_empty_profile() {
        let outcome = ScreeningOutcome::failed("0xAAA", "503 Service Unavailable");
        assert_eq!(outcome.status.to_string(), "503 Service Unavailable");
        assert!(outcome.risk.is_none());
        assert!(outcome.exposures.is_empty());
    }

    #[test]
    fn test_complete_outcome_lifts_cluster() {
        let profile: RiskProfile = serde_json::from_str(
            r#"{"risk":"Low","cluster":{"category":"exchange","name":"Kraken"}}"#,
        )
        .unwrap();
        let outcome = ScreeningOutcome::complete("0xBBB", profile);
        assert!(outcome.status.is_complete());
        assert_eq!(outcome.cluster_category.as_deref(), Some("exchange"));
        assert_eq!(outcome.cluster_name.as_deref(), Some("Kraken"));
    }
}
