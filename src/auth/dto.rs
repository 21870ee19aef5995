use serde::Deserialize;

/// Form body for login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Form body for signup. `send_email` is a checkbox and may be absent.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub send_email: bool,
}

/// Form body for the password reset flow.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordForm {
    pub username: String,
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
    #[serde(default)]
    pub send_email: bool,
}

/// Form body for the standalone reset-notification trigger.
#[derive(Debug, Deserialize)]
pub struct SendResetEmailForm {
    pub username: String,
    #[serde(default)]
    pub send_email: bool,
}
