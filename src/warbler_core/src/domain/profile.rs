use serde::{Deserialize, Serialize};

/// The user record written once the account exists.
///
/// Field names are part of the stored document format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub profile_image_url: String,
}
