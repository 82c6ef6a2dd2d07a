//! User models

use serde::{Deserialize, Serialize};

/// User row as stored, including the credential hash. Served verbatim by
/// the admin listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: bool,
}

/// Public-safe user payload returned on login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_admin: bool,
}

impl From<UserRecord> for PublicUser {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            is_admin: user.is_admin,
        }
    }
}

/// Payload for registration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

/// Validated registration input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    pub is_admin: bool,
}

impl RegisterRequest {
    /// Every field is required; the admin flag is taken from the caller
    /// verbatim.
    pub fn into_new_user(self) -> Option<NewUser> {
        Some(NewUser {
            name: self.name.filter(|s| !s.is_empty())?,
            email: self.email.filter(|s| !s.is_empty())?,
            phone: self.phone.filter(|s| !s.is_empty())?,
            address: self.address.filter(|s| !s.is_empty())?,
            password: self.password.filter(|s| !s.is_empty())?,
            is_admin: self.is_admin?,
        })
    }
}

/// Payload for login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Envelope for a successful login
#[derive(Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Full-overwrite update payload; omitted fields become NULL and a missing
/// admin flag falls back to false
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request() -> RegisterRequest {
        RegisterRequest {
            name: Some("Trần Thị B".to_string()),
            email: Some("b.tran@example.com".to_string()),
            phone: Some("0905123456".to_string()),
            address: Some("3 Hai Bà Trưng, Huế".to_string()),
            password: Some("m@tKhau123".to_string()),
            is_admin: Some(false),
        }
    }

    #[test]
    fn complete_registration_validates() {
        assert!(register_request().into_new_user().is_some());
    }

    #[test]
    fn missing_admin_flag_is_rejected() {
        let mut request = register_request();
        request.is_admin = None;
        assert!(request.into_new_user().is_none());
    }

    #[test]
    fn empty_password_is_rejected() {
        let mut request = register_request();
        request.password = Some(String::new());
        assert!(request.into_new_user().is_none());
    }

    #[test]
    fn login_response_excludes_credential_hash() {
        let record = UserRecord {
            id: 9,
            name: Some("Trần Thị B".to_string()),
            email: Some("b.tran@example.com".to_string()),
            phone: Some("0905123456".to_string()),
            address: Some("3 Hai Bà Trưng, Huế".to_string()),
            password_hash: Some("$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_string()),
            is_admin: true,
        };

        let response = LoginResponse {
            message: "Đăng nhập thành công".to_string(),
            user: record.into(),
        };

        let json = serde_json::to_value(&response).expect("serializes");
        assert!(json["user"].get("passwordHash").is_none());
        assert_eq!(json["user"]["isAdmin"], true);
        assert_eq!(json["user"]["id"], 9);
    }
}
