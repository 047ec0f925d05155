use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountIdResponse {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}
