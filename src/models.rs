/// Entity types shared by the storage backends and the HTTP layer
///
/// Wire format is the camelCase JSON the mobile client speaks; the
/// species/owner/report discriminators all serialize as `"type"`.
use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner account category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    PetOwner,
    PetRescuer,
    PetFoster,
}

impl OwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::PetOwner => "pet_owner",
            OwnerType::PetRescuer => "pet_rescuer",
            OwnerType::PetFoster => "pet_foster",
        }
    }

    pub fn from_str(s: &str) -> ApiResult<Self> {
        match s {
            "pet_owner" => Ok(OwnerType::PetOwner),
            "pet_rescuer" => Ok(OwnerType::PetRescuer),
            "pet_foster" => Ok(OwnerType::PetFoster),
            _ => Err(ApiError::Validation(format!("Invalid owner type: {}", s))),
        }
    }
}

/// Cruelty report lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Submitted,
    Investigating,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Submitted => "submitted",
            ReportStatus::Investigating => "investigating",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
        }
    }

    pub fn from_str(s: &str) -> ApiResult<Self> {
        match s {
            "submitted" => Ok(ReportStatus::Submitted),
            "investigating" => Ok(ReportStatus::Investigating),
            "resolved" => Ok(ReportStatus::Resolved),
            "dismissed" => Ok(ReportStatus::Dismissed),
            _ => Err(ApiError::Validation(format!("Invalid report status: {}", s))),
        }
    }
}

/// Admin privilege level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }

    pub fn from_str(s: &str) -> ApiResult<Self> {
        match s {
            "admin" => Ok(AdminRole::Admin),
            "super_admin" => Ok(AdminRole::SuperAdmin),
            _ => Err(ApiError::Validation(format!("Invalid admin role: {}", s))),
        }
    }
}

/// A pet listed on the platform
///
/// `is_adoptable` partitions pets between the adoptable browse listing
/// and the engagement-only showcase feed. The owner name/avatar are
/// denormalized copies kept alongside the `owner_id` reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub species: String,
    pub breed: String,
    pub age: i64,
    pub gender: String,
    pub size: Option<String>,
    pub description: String,
    pub image_url: String,
    pub owner_id: i64,
    pub owner_name: String,
    pub owner_avatar_url: String,
    pub likes: i64,
    pub is_adoptable: bool,
    pub is_recent: bool,
    pub is_featured: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pet owner, rescuer, or foster
///
/// Created unapproved; approval is a one-way admin action. The password
/// hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub owner_type: OwnerType,
    pub bio: String,
    pub avatar_url: String,
    #[serde(skip)]
    pub password_hash: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user-submitted cruelty report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: i64,
    #[serde(rename = "type")]
    pub incident_type: String,
    pub location: String,
    pub description: String,
    pub contact_info: Option<String>,
    pub anonymous: bool,
    pub status: ReportStatus,
    pub admin_notes: Option<String>,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An admin console account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: i64,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pet-supply product
///
/// Price is carried as a decimal string, matching the wire format the
/// client renders verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub pet_type: String,
    pub price: String,
    pub image_url: String,
    pub stock: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Create payloads
// ---------------------------------------------------------------------------

/// Fields accepted when creating a pet (likes start at zero)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    pub name: String,
    #[serde(rename = "type")]
    pub species: String,
    pub breed: String,
    pub age: i64,
    pub gender: String,
    pub size: Option<String>,
    pub description: String,
    pub image_url: String,
    pub owner_id: i64,
    pub owner_name: String,
    pub owner_avatar_url: String,
    pub status: String,
    pub is_adoptable: bool,
    #[serde(default)]
    pub is_recent: bool,
    #[serde(default)]
    pub is_featured: bool,
}

/// Fields accepted when registering an owner (always starts unapproved)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOwner {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub owner_type: OwnerType,
    pub bio: String,
    pub avatar_url: String,
    pub password: String,
}

/// Fields accepted on public report submission
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    #[serde(rename = "type")]
    pub incident_type: String,
    pub location: String,
    pub description: String,
    pub contact_info: Option<String>,
    #[serde(default)]
    pub anonymous: bool,
}

/// Fields accepted when an admin creates another admin
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAdmin {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub role: Option<AdminRole>,
}

/// Fields accepted when creating a product
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub pet_type: String,
    pub price: String,
    pub image_url: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Patch payloads
//
// These are the per-entity patchable-fields contracts: an update merges
// exactly the fields present here over the stored row. Ids and
// timestamps are not patchable; updated_at is re-stamped by the store.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetPatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub size: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub owner_id: Option<i64>,
    pub owner_name: Option<String>,
    pub owner_avatar_url: Option<String>,
    pub likes: Option<i64>,
    pub is_adoptable: Option<bool>,
    pub is_recent: Option<bool>,
    pub is_featured: Option<bool>,
    pub status: Option<String>,
}

/// Owner profile fields; approval and credentials have dedicated paths
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub owner_type: Option<OwnerType>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPatch {
    pub status: Option<ReportStatus>,
    pub admin_notes: Option<String>,
    pub assigned_to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub pet_type: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<i64>,
    pub is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_type_round_trip() {
        for t in [OwnerType::PetOwner, OwnerType::PetRescuer, OwnerType::PetFoster] {
            assert_eq!(OwnerType::from_str(t.as_str()).unwrap(), t);
        }
        assert!(OwnerType::from_str("breeder").is_err());
    }

    #[test]
    fn test_report_status_round_trip() {
        for s in [
            ReportStatus::Submitted,
            ReportStatus::Investigating,
            ReportStatus::Resolved,
            ReportStatus::Dismissed,
        ] {
            assert_eq!(ReportStatus::from_str(s.as_str()).unwrap(), s);
        }
        assert!(ReportStatus::from_str("open").is_err());
    }

    #[test]
    fn test_admin_role_round_trip() {
        assert_eq!(AdminRole::from_str("super_admin").unwrap(), AdminRole::SuperAdmin);
        assert!(AdminRole::from_str("root").is_err());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let owner = Owner {
            id: 1,
            name: "Sarah Johnson".to_string(),
            email: "sarah@example.com".to_string(),
            owner_type: OwnerType::PetFoster,
            bio: "Fosters dogs".to_string(),
            avatar_url: "https://example.com/a.jpg".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            is_approved: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&owner).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password"));
        assert!(json.contains("\"type\":\"pet_foster\""));
    }

    #[test]
    fn test_new_report_defaults() {
        let report: NewReport = serde_json::from_str(
            r#"{"type":"neglect","location":"123 Main St","description":"left outside without water"}"#,
        )
        .unwrap();

        assert!(!report.anonymous);
        assert!(report.contact_info.is_none());
    }
}
