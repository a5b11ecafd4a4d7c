//! Identity service wire types.
//!
//! The managed identity dialect: JSON bodies with PascalCase members, an
//! action header naming the operation, and error envelopes carrying
//! `__type` + `message`. These are wire-only structures; the domain types
//! live in `parley-types`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A name/value user attribute on the wire (e.g. the email at sign-up).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeType {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignUpRequest {
    pub client_id: String,
    pub username: String,
    pub password: String,
    pub user_attributes: Vec<AttributeType>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignUpResponse {
    #[serde(default)]
    pub user_confirmed: bool,
    #[serde(default)]
    pub user_sub: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfirmSignUpRequest {
    pub client_id: String,
    pub username: String,
    pub confirmation_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthRequest {
    pub auth_flow: String,
    pub client_id: String,
    pub auth_parameters: HashMap<String, String>,
}

impl InitiateAuthRequest {
    /// Username/password authentication flow.
    pub fn user_password(client_id: &str, username: &str, password: &str) -> Self {
        let mut auth_parameters = HashMap::new();
        auth_parameters.insert("USERNAME".to_string(), username.to_string());
        auth_parameters.insert("PASSWORD".to_string(), password.to_string());
        Self {
            auth_flow: "USER_PASSWORD_AUTH".to_string(),
            client_id: client_id.to_string(),
            auth_parameters,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthResponse {
    pub authentication_result: AuthenticationResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GlobalSignOutRequest {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetUserRequest {
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetUserResponse {
    pub username: String,
    #[serde(default)]
    pub user_attributes: Vec<AttributeType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForgotPasswordRequest {
    pub client_id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfirmForgotPasswordRequest {
    pub client_id: String,
    pub username: String,
    pub confirmation_code: String,
    pub password: String,
}

// --- Credential exchange ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIdRequest {
    pub identity_pool_id: String,
    pub logins: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetIdResponse {
    pub identity_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCredentialsForIdentityRequest {
    pub identity_id: String,
    pub logins: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetCredentialsForIdentityResponse {
    pub identity_id: String,
    pub credentials: WireCredentials,
}

/// Short-lived credentials as issued on the wire.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireCredentials {
    pub access_key_id: String,
    pub secret_key: String,
    pub session_token: String,
}

/// Responses with no members of interest (ConfirmSignUp, GlobalSignOut,
/// ForgotPassword, ConfirmForgotPassword).
#[derive(Debug, Deserialize)]
pub struct EmptyResponse {}

/// Service error envelope.
#[derive(Debug, Deserialize)]
pub struct ServiceError {
    #[serde(rename = "__type", default)]
    pub error_type: String,
    #[serde(alias = "Message", default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_serialization() {
        let req = SignUpRequest {
            client_id: "client-1".to_string(),
            username: "alice".to_string(),
            password: "Pw123!".to_string(),
            user_attributes: vec![AttributeType {
                name: "email".to_string(),
                value: "a@x.com".to_string(),
            }],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["ClientId"], "client-1");
        assert_eq!(json["Username"], "alice");
        assert_eq!(json["UserAttributes"][0]["Name"], "email");
        assert_eq!(json["UserAttributes"][0]["Value"], "a@x.com");
    }

    #[test]
    fn test_initiate_auth_request_shape() {
        let req = InitiateAuthRequest::user_password("client-1", "alice", "Pw123!");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["AuthFlow"], "USER_PASSWORD_AUTH");
        assert_eq!(json["AuthParameters"]["USERNAME"], "alice");
        assert_eq!(json["AuthParameters"]["PASSWORD"], "Pw123!");
    }

    #[test]
    fn test_initiate_auth_response_deserialization() {
        let json = r#"{
            "AuthenticationResult": {
                "AccessToken": "access",
                "IdToken": "id",
                "RefreshToken": "refresh",
                "ExpiresIn": 3600,
                "TokenType": "Bearer"
            }
        }"#;
        let resp: InitiateAuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.authentication_result.access_token, "access");
        assert_eq!(resp.authentication_result.refresh_token, "refresh");
    }

    #[test]
    fn test_sign_up_response_defaults() {
        let resp: SignUpResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.user_confirmed);
        assert!(resp.user_sub.is_empty());
    }

    #[test]
    fn test_credentials_response_deserialization() {
        let json = r#"{
            "IdentityId": "us-east-1:7c88856e",
            "Credentials": {
                "AccessKeyId": "AKIDEXAMPLE",
                "SecretKey": "wJalr",
                "SessionToken": "AQoDYX",
                "Expiration": 1.7e9
            }
        }"#;
        let resp: GetCredentialsForIdentityResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.identity_id, "us-east-1:7c88856e");
        assert_eq!(resp.credentials.access_key_id, "AKIDEXAMPLE");
        assert_eq!(resp.credentials.session_token, "AQoDYX");
    }

    #[test]
    fn test_service_error_envelope() {
        let json = r#"{"__type": "NotAuthorizedException", "message": "Incorrect username or password."}"#;
        let err: ServiceError = serde_json::from_str(json).unwrap();
        assert_eq!(err.error_type, "NotAuthorizedException");
        assert_eq!(err.message, "Incorrect username or password.");
    }

    #[test]
    fn test_service_error_capitalized_message() {
        let json = r#"{"__type": "UserNotFoundException", "Message": "User does not exist."}"#;
        let err: ServiceError = serde_json::from_str(json).unwrap();
        assert_eq!(err.message, "User does not exist.");
    }

    #[test]
    fn test_get_user_response_deserialization() {
        let json = r#"{
            "Username": "alice",
            "UserAttributes": [{"Name": "email", "Value": "a@x.com"}]
        }"#;
        let resp: GetUserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.username, "alice");
        assert_eq!(resp.user_attributes.len(), 1);
    }
}
