//! Setting rows as the REST service stores them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use mizan_core::{InstitutionId, LocalizedText, SettingId};

/// Which entity a setting row belongs to.
///
/// Exactly one scope is meaningful per row; `(key, scope, owning id)` is the
/// effective uniqueness key the server matches batch upserts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingScope {
    System,
    Institution,
    Branch,
    User,
}

/// Declared value type of a setting row.
///
/// Values still arrive loosely typed (old rows may hold `"1"` where a
/// boolean is declared), so readers go through [`crate::coerce`] rather
/// than trusting the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingValueType {
    String,
    Integer,
    Boolean,
    Json,
    Text,
}

/// A persisted setting row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRecord {
    pub id: SettingId,
    pub key: String,
    pub value: Value,
    pub value_type: SettingValueType,
    #[serde(default)]
    pub group: Option<String>,
    pub scope: SettingScope,
    #[serde(default)]
    pub institution_id: Option<InstitutionId>,
    #[serde(default)]
    pub label_en: String,
    #[serde(default)]
    pub label_ar: String,
}

impl SettingRecord {
    pub fn label(&self) -> LocalizedText {
        LocalizedText::new(self.label_en.clone(), self.label_ar.clone())
    }
}

/// One entry of the batch upsert.
///
/// The server matches on `(key, scope, institution_id)` and decides
/// update-vs-create itself; the client always sends the full tracked list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingUpsert {
    pub key: String,
    pub value: Value,
    pub value_type: SettingValueType,
    pub group: String,
    pub scope: SettingScope,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<InstitutionId>,
    pub label_en: String,
    pub label_ar: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_decodes_from_wire_shape() {
        let record: SettingRecord = serde_json::from_value(json!({
            "id": 11,
            "key": "default_vat_rate",
            "value": "15",
            "value_type": "string",
            "group": "tax",
            "scope": "institution",
            "institution_id": 7,
            "label_en": "Default VAT rate",
            "label_ar": "نسبة الضريبة الافتراضية"
        }))
        .unwrap();

        assert_eq!(record.scope, SettingScope::Institution);
        assert_eq!(record.institution_id, Some(InstitutionId::new(7)));
        assert_eq!(record.value, json!("15"));
    }

    #[test]
    fn upsert_omits_institution_for_system_scope() {
        let upsert = SettingUpsert {
            key: "theme".to_string(),
            value: json!("light"),
            value_type: SettingValueType::String,
            group: "appearance".to_string(),
            scope: SettingScope::System,
            institution_id: None,
            label_en: "Theme".to_string(),
            label_ar: "المظهر".to_string(),
        };

        let json = serde_json::to_value(&upsert).unwrap();
        assert!(json.get("institution_id").is_none());
        assert_eq!(json["scope"], "system");
    }
}
