//! Student record model and request validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::credentials::Department;

pub const DEFAULT_COLLEGE: &str = "Government College of Engineering, Erode";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Unique; doubles as the student's login identifier.
    pub email: String,
    pub phone: String,
    #[serde(default = "default_gender")]
    pub gender: String,
    #[serde(default)]
    pub address: String,
    pub enrollment_date: NaiveDate,
    /// Canonical department label, see [`Department::label`].
    pub course: String,
    pub year: u8,
    pub cgpa: f64,
    #[serde(default = "default_college")]
    pub college: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_gender() -> String {
    "Not specified".to_string()
}

fn default_college() -> String {
    DEFAULT_COLLEGE.to_string()
}

/// Client-supplied record fields for create and update requests.
///
/// Everything defaults so that a missing field surfaces as a validation
/// message rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub year: u8,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub college: Option<String>,
}

impl StudentPayload {
    /// Validates the payload, collecting every violation into one
    /// comma-separated message.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.first_name.len() < 2 || self.first_name.len() > 50 {
            errors.push("First name must be between 2 and 50 characters");
        }
        if self.last_name.len() < 2 || self.last_name.len() > 50 {
            errors.push("Last name must be between 2 and 50 characters");
        }
        if !is_valid_email(&self.email) {
            errors.push("Valid email is required");
        }
        if !is_valid_phone(&self.phone) {
            errors.push("Phone must be 10-15 digits");
        }
        if Department::from_label(&self.course).is_none() {
            errors.push("Course must be a recognized department");
        }
        if !(1..=4).contains(&self.year) {
            errors.push("Year must be between 1 and 4");
        }
        if let Some(cgpa) = self.cgpa {
            if !(1.0..=10.0).contains(&cgpa) {
                errors.push("CGPA must be between 1.0 and 10.0");
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join(", "))
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && domain.split('.').all(|segment| !segment.is_empty())
        }
        _ => false,
    }
}

fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| *c != '-' && *c != ' ').collect();
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

impl StudentRecord {
    /// Builds a fresh record from a validated payload.
    pub fn new(payload: StudentPayload) -> Self {
        let now = Utc::now();
        StudentRecord {
            id: Uuid::new_v4().to_string(),
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            gender: payload.gender.unwrap_or_else(default_gender),
            address: payload.address.unwrap_or_default(),
            enrollment_date: payload.enrollment_date.unwrap_or_else(|| now.date_naive()),
            course: payload.course,
            year: payload.year,
            cgpa: payload.cgpa.unwrap_or(0.0),
            college: payload.college.unwrap_or_else(default_college),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the client-editable fields, keeping id and creation time.
    pub fn apply(&mut self, payload: StudentPayload) {
        self.first_name = payload.first_name;
        self.last_name = payload.last_name;
        self.email = payload.email;
        self.phone = payload.phone;
        self.gender = payload.gender.unwrap_or_else(default_gender);
        self.address = payload.address.unwrap_or_default();
        if let Some(date) = payload.enrollment_date {
            self.enrollment_date = date;
        }
        self.course = payload.course;
        self.year = payload.year;
        self.cgpa = payload.cgpa.unwrap_or(0.0);
        self.college = payload.college.unwrap_or_else(default_college);
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> StudentPayload {
        StudentPayload {
            first_name: "Student".to_string(),
            last_name: "001".to_string(),
            email: "student001@gce.edu.in".to_string(),
            phone: "9876543210".to_string(),
            gender: Some("Female".to_string()),
            address: Some("12, College Road, Erode, Tamil Nadu".to_string()),
            enrollment_date: NaiveDate::from_ymd_opt(2022, 7, 15),
            course: "BE - Civil Engineering".to_string(),
            year: 2,
            cgpa: Some(8.25),
            college: None,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert_eq!(valid_payload().validate(), Ok(()));
    }

    #[test]
    fn violations_are_joined_into_one_message() {
        let mut payload = valid_payload();
        payload.first_name = "S".to_string();
        payload.year = 5;

        let message = payload.validate().unwrap_err();
        assert_eq!(
            message,
            "First name must be between 2 and 50 characters, Year must be between 1 and 4"
        );
    }

    #[test]
    fn unknown_course_is_rejected() {
        let mut payload = valid_payload();
        payload.course = "BE - Civil Engineering ".to_string();
        assert_eq!(
            payload.validate().unwrap_err(),
            "Course must be a recognized department"
        );
    }

    #[test]
    fn email_shape_is_checked() {
        for bad in ["", "plain", "no domain@x", "a@b", "a@b..c", "@gce.edu.in"] {
            let mut payload = valid_payload();
            payload.email = bad.to_string();
            assert!(payload.validate().is_err(), "{bad:?} should be invalid");
        }
    }

    #[test]
    fn phone_accepts_separators_but_not_letters() {
        let mut payload = valid_payload();
        payload.phone = "98765 432-10".to_string();
        assert_eq!(payload.validate(), Ok(()));

        payload.phone = "98765abc10".to_string();
        assert!(payload.validate().is_err());

        payload.phone = "123456789".to_string(); // 9 digits
        assert!(payload.validate().is_err());
    }

    #[test]
    fn cgpa_is_optional_but_bounded() {
        let mut payload = valid_payload();
        payload.cgpa = None;
        assert_eq!(payload.validate(), Ok(()));

        payload.cgpa = Some(0.5);
        assert!(payload.validate().is_err());
        payload.cgpa = Some(10.5);
        assert!(payload.validate().is_err());
    }

    #[test]
    fn new_record_fills_defaults() {
        let mut payload = valid_payload();
        payload.gender = None;
        payload.address = None;
        payload.cgpa = None;

        let record = StudentRecord::new(payload);
        assert_eq!(record.gender, "Not specified");
        assert_eq!(record.address, "");
        assert_eq!(record.cgpa, 0.0);
        assert_eq!(record.college, DEFAULT_COLLEGE);
        assert!(!record.id.is_empty());
    }

    #[test]
    fn apply_keeps_id_and_created_at() {
        let record = StudentRecord::new(valid_payload());
        let id = record.id.clone();
        let created_at = record.created_at;

        let mut updated = record;
        let mut payload = valid_payload();
        payload.cgpa = Some(9.1);
        payload.year = 3;
        updated.apply(payload);

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, created_at);
        assert_eq!(updated.cgpa, 9.1);
        assert_eq!(updated.year, 3);
    }
}
