//! Form payloads posted by the HTML pages, with the length and shape rules
//! each field must satisfy before anything touches storage.

use serde::Deserialize;

use crate::error::DeskError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub user_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueueForm {
    #[serde(default)]
    pub queue_name: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub instructions: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JoinForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub service_requested: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardAction {
    DeleteQueue,
    ServeAttendee,
}

/// Buttons posted from the dashboard. `attendee_id` is only sent with
/// `serve_attendee`.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardForm {
    pub action: DashboardAction,
    pub queue_id: i64,
    #[serde(default)]
    pub attendee_id: Option<i64>,
}

impl RegistrationForm {
    /// Trim fields, lower-case the email and check every rule.
    pub fn validate(mut self) -> Result<Self, DeskError> {
        self.business_name = self.business_name.trim().to_string();
        self.email = normalize_email(&self.email);
        self.phone_number = self.phone_number.trim().to_string();

        required("Business Name", &self.business_name, 100)?;
        required("Email", &self.email, 100)?;
        if !looks_like_email(&self.email) {
            return Err(DeskError::Validation("Invalid email address".to_string()));
        }
        required("Phone Number", &self.phone_number, 50)?;
        if self.password.is_empty() {
            return Err(DeskError::Validation("Password is required".to_string()));
        }
        if self.password != self.confirm {
            return Err(DeskError::Validation("Passwords do not match".to_string()));
        }
        Ok(self)
    }
}

impl QueueForm {
    pub fn validate(mut self) -> Result<Self, DeskError> {
        self.queue_name = self.queue_name.trim().to_string();
        self.purpose = self.purpose.trim().to_string();
        self.instructions = self.instructions.trim().to_string();

        required("Queue Name", &self.queue_name, 100)?;
        optional("Purpose", &self.purpose, 255)?;
        optional("Instructions", &self.instructions, 1000)?;
        Ok(self)
    }
}

impl JoinForm {
    pub fn validate(mut self) -> Result<Self, DeskError> {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.account_number = self.account_number.trim().to_string();
        self.service_requested = self.service_requested.trim().to_string();

        required("First Name", &self.first_name, 100)?;
        required("Last Name", &self.last_name, 100)?;
        optional("Account Number", &self.account_number, 50)?;
        optional("Service Requested", &self.service_requested, 255)?;
        Ok(self)
    }
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn required(field: &str, value: &str, max: usize) -> Result<(), DeskError> {
    if value.is_empty() {
        return Err(DeskError::Validation(format!("{field} is required")));
    }
    optional(field, value, max)
}

fn optional(field: &str, value: &str, max: usize) -> Result<(), DeskError> {
    if value.chars().count() > max {
        return Err(DeskError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
