//! Business description models and request validation.
//!
//! This module defines:
//! - `GenerateSiteRequest`: Request body for the generation endpoint
//! - `BusinessDescription`: Typed view over the submitted `formData`
//! - `ValidationErrors`: Every required-field violation found in one pass

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request body for `POST /api/v1/sites/generate`.
///
/// The business description is nested under `formData`. It is kept as raw
/// JSON so the record can persist exactly what the caller submitted.
///
/// ```json
/// {
///   "formData": {
///     "businessName": "Dan's Barber Shop",
///     "businessType": "Barber Shop",
///     "branding": { "primaryColor": "#059669" },
///     "contact": { "email": "contact@dansbarbers.com", "phone": "555-123-4567" },
///     "services": [{ "name": "Men's Haircut", "price": "45", "duration": "30" }]
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSiteRequest {
    pub form_data: Option<serde_json::Value>,
}

/// Response body for a successful generation.
#[derive(Debug, Serialize)]
pub struct GenerateSiteResponse {
    pub html: String,
}

/// A business as described by its owner in the builder form.
///
/// Every field is optional at the type level so that a missing field surfaces
/// as a validation violation instead of a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<Branding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    #[serde(default, skip_serializing_if = "Vec::is_empty", deserialize_with = "null_as_empty")]
    pub services: Vec<ServiceOffering>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One service the business offers.
///
/// `price` and `duration` are numbers typed into text inputs; JSON numbers are
/// accepted too and kept as their textual form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    #[serde(default, deserialize_with = "text_or_number")]
    pub name: String,

    #[serde(default, deserialize_with = "text_or_number")]
    pub price: String,

    #[serde(default, deserialize_with = "text_or_number")]
    pub duration: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
    Null,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(number) => number.to_string(),
        TextOrNumber::Null => String::new(),
    })
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ServiceOffering>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ServiceOffering>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single required-field violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire path of the offending field, e.g. `branding.primaryColor`
    pub field: &'static str,

    pub message: &'static str,
}

/// All violations found while validating a business description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub violations: Vec<FieldViolation>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "formData is invalid")?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{} {}", sep, violation.field, violation.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl BusinessDescription {
    pub fn business_name(&self) -> &str {
        self.business_name.as_deref().unwrap_or_default()
    }

    pub fn business_type(&self) -> &str {
        self.business_type.as_deref().unwrap_or_default()
    }

    pub fn primary_color(&self) -> &str {
        self.branding
            .as_ref()
            .and_then(|b| b.primary_color.as_deref())
            .unwrap_or_default()
    }

    pub fn email(&self) -> &str {
        self.contact
            .as_ref()
            .and_then(|c| c.email.as_deref())
            .unwrap_or_default()
    }

    pub fn phone(&self) -> &str {
        self.contact
            .as_ref()
            .and_then(|c| c.phone.as_deref())
            .unwrap_or_default()
    }
}

/// Required text fields, by JSON pointer and wire path.
const REQUIRED_TEXT: [(&str, &str); 2] = [
    ("/businessName", "businessName"),
    ("/branding/primaryColor", "branding.primaryColor"),
];

/// Check the raw `formData` object and report all violations together.
///
/// Runs on the JSON value so that a wrongly typed field is reported next to
/// every other problem instead of aborting deserialization.
///
/// # Rules
///
/// - `businessName`: required string, not blank
/// - `branding.primaryColor`: required string, not blank
/// - no string or key anywhere may contain a NUL character (rejected by the store)
pub fn check_form_data(form_data: &Value) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();

    for (pointer, field) in REQUIRED_TEXT {
        let message = match form_data.pointer(pointer) {
            None | Some(Value::Null) => Some("is required"),
            Some(Value::String(text)) if text.trim().is_empty() => Some("is required"),
            Some(Value::String(_)) => None,
            Some(_) => Some("must be a string"),
        };
        if let Some(message) = message {
            violations.push(FieldViolation { field, message });
        }
    }

    if contains_nul(form_data) {
        violations.push(FieldViolation {
            field: "formData",
            message: "must not contain NUL characters",
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors { violations })
    }
}

fn contains_nul(value: &Value) -> bool {
    match value {
        Value::String(text) => text.contains('\0'),
        Value::Array(items) => items.iter().any(contains_nul),
        Value::Object(map) => map
            .iter()
            .any(|(key, item)| key.contains('\0') || contains_nul(item)),
        _ => false,
    }
}
