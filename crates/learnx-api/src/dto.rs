//! Request and response payloads

use serde::{Deserialize, Serialize};

use learnx_core::UserProfile;

/// POST /api/auth/signup. Missing fields read as empty and fail validation.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/signin
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// GET /api/user/me
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            username: profile.username,
            email: profile.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_missing_fields_default_to_empty() {
        let request: SignUpRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();

        assert_eq!(request.username, "alice");
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
    }

    #[test]
    fn test_profile_response_has_only_public_fields() {
        let json = serde_json::to_value(ProfileResponse::from(UserProfile {
            username: "alice".into(),
            email: "alice@x.com".into(),
        }))
        .unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["username"], "alice");
        assert_eq!(object["email"], "alice@x.com");
    }
}
