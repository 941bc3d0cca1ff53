//! Lead types: Lead, LeadStatus, FollowUp and partial updates

use super::ids::{CustomColumnId, LeadId};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Pipeline status of a lead. The serialized form is also the id of the
/// status column that shows it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    #[serde(rename = "In Discussion")]
    InDiscussion,
    Converted,
    Lost,
}

impl LeadStatus {
    /// All statuses in pipeline order
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::InDiscussion,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    /// The wire value, which doubles as the status column id and title
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Contacted => "Contacted",
            Self::InDiscussion => "In Discussion",
            Self::Converted => "Converted",
            Self::Lost => "Lost",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a status value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown lead status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for LeadStatus {
    type Err = UnknownStatus;

    /// Exact match on the wire value. Column ids are compared verbatim.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A scheduled follow-up. Display only, never reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// A sales contact tracked through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(alias = "_id")]
    pub id: LeadId,

    /// Absent, `null` or blank means `New`
    #[serde(
        default,
        deserialize_with = "deserialize_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<LeadStatus>,

    /// When set, placement follows this column instead of `status`
    #[serde(
        default,
        deserialize_with = "deserialize_column_ref",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_column_id: Option<CustomColumnId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<FollowUp>,
}

impl Lead {
    /// Create a lead with the given id and no status (placed as `New`)
    pub fn new(id: impl Into<LeadId>) -> Self {
        Self {
            id: id.into(),
            status: None,
            custom_column_id: None,
            company_name: None,
            contact_person: None,
            email: None,
            phone: None,
            notes: None,
            follow_up: None,
        }
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_custom_column(mut self, column: impl Into<CustomColumnId>) -> Self {
        self.custom_column_id = Some(column.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = Some(company.into());
        self
    }

    /// The status used for placement when no custom column applies
    pub fn effective_status(&self) -> LeadStatus {
        self.status.unwrap_or_default()
    }

    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &LeadPatch) {
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        match &patch.custom_column_id {
            FieldUpdate::Unchanged => {}
            FieldUpdate::Clear => self.custom_column_id = None,
            FieldUpdate::Set(id) => self.custom_column_id = Some(id.clone()),
        }
    }
}

/// Empty strings count as "no custom column"; older documents stored `""`.
fn deserialize_status<'de, D>(deserializer: D) -> Result<Option<LeadStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn deserialize_column_ref<'de, D>(deserializer: D) -> Result<Option<CustomColumnId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(CustomColumnId::from_string))
}

/// A field in a partial update: omitted, explicitly cleared, or set.
///
/// Serializes as absent / `null` / the value, so stores can tell "leave it"
/// from "remove it".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Unchanged,
    Clear,
    Set(T),
}

impl<T> FieldUpdate<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unchanged | Self::Clear => serializer.serialize_none(),
            Self::Set(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}

/// Partial update sent to the Leads Store: exactly the changed fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(default, skip_serializing_if = "FieldUpdate::is_unchanged")]
    pub custom_column_id: FieldUpdate<CustomColumnId>,
}

impl LeadPatch {
    /// Place the lead on a custom column, leaving its status alone
    pub fn to_custom_column(column: CustomColumnId) -> Self {
        Self {
            status: None,
            custom_column_id: FieldUpdate::Set(column),
        }
    }

    /// Place the lead on a status column, taking it off any custom column
    pub fn to_status(status: LeadStatus) -> Self {
        Self {
            status: Some(status),
            custom_column_id: FieldUpdate::Clear,
        }
    }

    /// Take the lead off its custom column, falling back to status placement
    pub fn clear_custom_column() -> Self {
        Self {
            status: None,
            custom_column_id: FieldUpdate::Clear,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.custom_column_id.is_unchanged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_value(LeadStatus::InDiscussion).unwrap(),
            json!("In Discussion")
        );
        assert_eq!("In Discussion".parse::<LeadStatus>(), Ok(LeadStatus::InDiscussion));
        assert!("contacted".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn test_lead_from_document() {
        let lead: Lead = serde_json::from_value(json!({
            "_id": "65f1",
            "companyName": "Acme",
            "status": "Contacted",
            "customColumnId": null,
            "followUp": {"date": "2024-05-01", "status": "pending"},
            "createdAt": "2024-04-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(lead.id.as_str(), "65f1");
        assert_eq!(lead.status, Some(LeadStatus::Contacted));
        assert_eq!(lead.custom_column_id, None);
        assert_eq!(lead.company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_missing_status_defaults_to_new() {
        let lead: Lead = serde_json::from_value(json!({"id": "1"})).unwrap();
        assert_eq!(lead.status, None);
        assert_eq!(lead.effective_status(), LeadStatus::New);
    }

    #[test]
    fn test_blank_status_defaults_to_new() {
        for status in [json!(""), json!("   "), Value::Null] {
            let lead: Lead = serde_json::from_value(json!({"_id": "1", "status": status})).unwrap();
            assert_eq!(lead.status, None);
            assert_eq!(lead.effective_status(), LeadStatus::New);
        }

        let lead: Lead = serde_json::from_value(json!({"_id": "2", "status": " Lost "})).unwrap();
        assert_eq!(lead.status, Some(LeadStatus::Lost));
        assert!(serde_json::from_value::<Lead>(json!({"_id": "3", "status": "Pending"})).is_err());
    }

    #[test]
    fn test_empty_custom_column_is_none() {
        let lead: Lead = serde_json::from_value(json!({"id": "1", "customColumnId": ""})).unwrap();
        assert_eq!(lead.custom_column_id, None);
    }

    #[test]
    fn test_patch_serialization_distinguishes_clear_from_omitted() {
        let to_status = serde_json::to_value(LeadPatch::to_status(LeadStatus::Converted)).unwrap();
        assert_eq!(to_status, json!({"status": "Converted", "customColumnId": null}));

        let to_custom =
            serde_json::to_value(LeadPatch::to_custom_column("custom-1".into())).unwrap();
        assert_eq!(to_custom, json!({"customColumnId": "custom-1"}));

        let empty = serde_json::to_value(LeadPatch::default()).unwrap();
        assert_eq!(empty, json!({}));
    }

    #[test]
    fn test_patch_deserialization() {
        let patch: LeadPatch = serde_json::from_value(json!({"customColumnId": null})).unwrap();
        assert_eq!(patch.custom_column_id, FieldUpdate::Clear);

        let patch: LeadPatch = serde_json::from_value(json!({"status": "Lost"})).unwrap();
        assert!(patch.custom_column_id.is_unchanged());
    }

    #[test]
    fn test_apply_patch() {
        let mut lead = Lead::new("3").with_custom_column("custom-1");
        lead.apply(&LeadPatch::to_status(LeadStatus::Converted));
        assert_eq!(lead.status, Some(LeadStatus::Converted));
        assert_eq!(lead.custom_column_id, None);

        lead.apply(&LeadPatch::to_custom_column("custom-2".into()));
        assert_eq!(lead.status, Some(LeadStatus::Converted));
        assert_eq!(lead.custom_column_id, Some("custom-2".into()));
    }
}
