//! The cached user profile.

use serde::{Deserialize, Serialize};

use mizan_core::UserId;

/// Profile of the signed-in user, as returned by the auth endpoints and
/// cached locally for offline display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}
