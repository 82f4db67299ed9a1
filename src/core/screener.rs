use crate::models::ScreeningOutcome;
use crate::services::ApiClient;
use std::sync::Arc;

/// Two-phase screening of a single address
///
/// Phase 1 registers the address with the scoring service; phase 2
/// retrieves the computed profile. Retrieval is only attempted after a
/// successful registration.
pub struct AddressScreener {
    api: Arc<ApiClient>,
}

impl AddressScreener {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Screen one address, always producing an outcome
    ///
    /// Never fails outward: HTTP non-success, transport faults and
    /// timeouts all fold into the outcome's status, so one poisoned
    /// address cannot abort its batch. The scheduler relies on exactly
    /// one outcome per input address.
    pub async fn screen(&self, address: &str) -> ScreeningOutcome {
        if let Err(e) = self.api.register(address).await {
            return ScreeningOutcome::failed(address, e.to_string());
        }

        match self.api.retrieve(address).await {
            Ok(profile) => ScreeningOutcome::complete(address, profile),
            Err(e) => ScreeningOutcome::failed(address, e.to_string()),
        }
    }
}
