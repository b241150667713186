//! Persistence boundary — confirmed records and the store trait.
//!
//! The pipeline itself never persists anything; a host confirms a
//! candidate with the user, builds a [`ComponentRecord`], and hands it to
//! whatever [`InventoryStore`] it wires in.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::candidate::ComponentCandidate;
use crate::error::StoreError;

/// A candidate the user confirmed, enriched with inventory bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(flatten)]
    pub candidate: ComponentCandidate,
    pub quantity: u32,
    pub location: Option<String>,
    /// Raw OCR transcript kept for later re-classification.
    pub ocr_text: Option<String>,
    pub created_by: i64,
    pub last_modified_by: i64,
}

impl ComponentRecord {
    pub fn confirmed(
        candidate: ComponentCandidate,
        quantity: u32,
        location: Option<String>,
        user_id: i64,
        ocr_text: Option<String>,
    ) -> Self {
        Self {
            candidate: candidate.validated(),
            quantity,
            location,
            ocr_text,
            created_by: user_id,
            last_modified_by: user_id,
        }
    }
}

/// Query filter for inventory lookups. Empty filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComponentFilter {
    pub component_type: Option<String>,
    pub name_contains: Option<String>,
    pub location: Option<String>,
}

/// Inventory persistence boundary implemented by the host.
pub trait InventoryStore {
    /// Insert a confirmed record, returning its assigned id.
    fn insert(
        &self,
        record: &ComponentRecord,
    ) -> impl Future<Output = Result<i64, StoreError>> + Send;

    fn query(
        &self,
        filter: &ComponentFilter,
    ) -> impl Future<Output = Result<Vec<ComponentRecord>, StoreError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::RecognitionMethod;
    use std::collections::BTreeMap;

    #[test]
    fn confirmed_stamps_both_user_fields_and_revalidates() {
        let candidate = ComponentCandidate {
            component_type: "RESISTOR".to_string(),
            name: "10k Resistor".to_string(),
            part_number: None,
            manufacturer: None,
            specifications: BTreeMap::new(),
            description: None,
            tags: vec![],
            recognition_confidence: 120.0,
            recognition_method: RecognitionMethod::ColorCode,
        };
        let record = ComponentRecord::confirmed(
            candidate,
            5,
            Some("drawer A3".to_string()),
            42,
            Some("10k".to_string()),
        );
        assert_eq!(record.created_by, 42);
        assert_eq!(record.last_modified_by, 42);
        assert_eq!(record.quantity, 5);
        // Confirmation is the last normalization gate before persistence.
        assert_eq!(record.candidate.component_type, "resistor");
        assert_eq!(record.candidate.recognition_confidence, 100.0);
    }

    #[test]
    fn record_serializes_candidate_flattened() {
        let record = ComponentRecord::confirmed(
            ComponentCandidate {
                component_type: "led".to_string(),
                name: "Red LED".to_string(),
                part_number: None,
                manufacturer: None,
                specifications: BTreeMap::new(),
                description: None,
                tags: vec!["led".to_string()],
                recognition_confidence: 70.0,
                recognition_method: RecognitionMethod::TextAi,
            },
            10,
            None,
            7,
            None,
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["component_type"], "led");
        assert_eq!(json["quantity"], 10);
        assert_eq!(json["recognition_method"], "text-ai");
    }
}
