use serde::{Deserialize, Serialize};

/// Notification preferences as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesInfo {
    pub marketing: bool,
    pub product_updates: bool,
    pub weekly_digest: bool,
    pub updated_at: String,
}

/// Response for preference reads and writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub preferences: PreferencesInfo,
}

/// Partial update of notification preferences; omitted fields are unchanged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub marketing: Option<bool>,
    pub product_updates: Option<bool>,
    pub weekly_digest: Option<bool>,
}

/// One-click unsubscribe request, built from an emailed link
///
/// The token authenticates the user without a session; `type` names the
/// notification category to disable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    /// Signed unsubscribe token from the email link
    pub token: String,
    /// Notification category wire name (e.g. `marketing`)
    #[serde(rename = "type")]
    pub kind: String,
}

/// Response after a successful unsubscribe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeResponse {
    pub message: String,
}
