use serde::{Deserialize, Serialize};

/// One normalized organization entry, ready for querying and display.
///
/// Instances are produced in bulk by the ingestion pipeline; a reload replaces
/// the whole set, so records are never mutated in place.
///
/// The serde names match the JSON shape used by the snapshot side-channel
/// (and by external consumers of the legacy dataset dumps), which is why a
/// few fields carry camelCase renames next to the `cat_*` snake_case ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier derived from `name` (see [`crate::to_id`]), or the
    /// positional fallback `id-{index}` when the derivation is empty.
    ///
    /// Derivation is deterministic across reloads so external links keyed by
    /// id stay valid. Records sharing a name share an id; collisions are not
    /// deduplicated here.
    pub id: String,
    /// Non-empty display name; defaults to `Company {n}` when the source cell
    /// is blank.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(
        rename = "typeOfStakeholder",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub stakeholder_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(
        rename = "federalState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub federal_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Present only when the source cell parsed to a finite number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Union of all multi-value source columns, deduplicated case-sensitively
    /// and sorted lexicographically.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Split from the stakeholder column, deduplicated in first-occurrence
    /// order (this list drives ordered display, unlike `tags`).
    #[serde(default)]
    pub stakeholders: Vec<String>,
    #[serde(default)]
    pub cat_support: Vec<String>,
    #[serde(default)]
    pub cat_applications: Vec<String>,
    #[serde(default)]
    pub cat_manufacturers: Vec<String>,
    #[serde(default)]
    pub cat_research: Vec<String>,
    #[serde(default)]
    pub cat_government: Vec<String>,
    #[serde(default)]
    pub cat_hw_sw: Vec<String>,
}

impl Record {
    /// A record with the given id/name and everything else empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            description: None,
            website: None,
            stakeholder_type: None,
            domain: None,
            federal_state: None,
            comments: None,
            lat: None,
            lng: None,
            tags: Vec::new(),
            stakeholders: Vec::new(),
            cat_support: Vec::new(),
            cat_applications: Vec::new(),
            cat_manufacturers: Vec::new(),
            cat_research: Vec::new(),
            cat_government: Vec::new(),
            cat_hw_sw: Vec::new(),
        }
    }

    /// True when the record carries a plottable coordinate pair.
    pub fn has_position(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn serializes_with_legacy_field_names() {
        let mut record = Record::new("acme-space", "Acme Space");
        record.stakeholder_type = Some("Industry".to_owned());
        record.federal_state = Some("Bavaria".to_owned());
        record.lat = Some(48.1);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["typeOfStakeholder"], "Industry");
        assert_eq!(json["federalState"], "Bavaria");
        assert_eq!(json["lat"], 48.1);
        // Unset optionals are omitted entirely, matching the legacy dumps.
        assert!(json.get("address").is_none());
        assert!(json.get("lng").is_none());
    }

    #[test]
    fn deserializes_sparse_legacy_json() {
        let record: Record =
            serde_json::from_str(r#"{"id":"x","name":"X","tags":["Space"]}"#).unwrap();
        assert_eq!(record.id, "x");
        assert_eq!(record.tags, vec!["Space".to_owned()]);
        assert!(record.stakeholders.is_empty());
        assert!(record.lat.is_none());
    }
}
