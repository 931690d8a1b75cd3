use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::{image, institutional_email, min_chars, Report, ValidationErrors};
use crate::config::ValidationConfig;
use crate::database::models::LostItem;

/// Body of POST/PUT /api/lost-items
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LostItemInput {
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date_lost: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub is_found: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LostItemDraft {
    pub item_name: String,
    pub description: String,
    pub location: String,
    pub date_lost: DateTime<Utc>,
    pub contact_number: String,
    pub email: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LostItemChanges {
    pub item_name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date_lost: Option<DateTime<Utc>>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub is_found: Option<bool>,
}

impl LostItemChanges {
    pub fn apply_to(self, item: &mut LostItem) {
        if let Some(v) = self.item_name {
            item.item_name = v;
        }
        if let Some(v) = self.description {
            item.description = v;
        }
        if let Some(v) = self.location {
            item.location = v;
        }
        if let Some(v) = self.date_lost {
            item.date_lost = v;
        }
        if let Some(v) = self.contact_number {
            item.contact_number = v;
        }
        if let Some(v) = self.email {
            item.email = v;
        }
        if let Some(v) = self.image {
            item.image = v;
        }
        if let Some(v) = self.is_found {
            item.is_found = v;
        }
    }
}

impl From<&LostItem> for LostItemInput {
    fn from(item: &LostItem) -> Self {
        Self {
            item_name: Some(item.item_name.clone()),
            description: Some(item.description.clone()),
            location: Some(item.location.clone()),
            date_lost: Some(item.date_lost.to_rfc3339()),
            contact_number: Some(item.contact_number.clone()),
            email: Some(item.email.clone()),
            image: Some(item.image.clone()),
            is_found: Some(item.is_found),
        }
    }
}

/// RFC 3339 timestamps or plain calendar dates (taken as midnight UTC)
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| "Date lost must be a valid date".to_string())
}

fn item_name(value: &str) -> Result<String, String> {
    min_chars(value, 3, "Item name")
}

fn description(value: &str) -> Result<String, String> {
    min_chars(value, 10, "Description")
}

fn trimmed(value: &str) -> Result<String, String> {
    Ok(value.trim().to_string())
}

pub fn validate_new_lost_item(input: &LostItemInput, rules: &ValidationConfig) -> Result<LostItemDraft, ValidationErrors> {
    let mut report = Report::default();

    let item_name = report
        .required("itemName", input.item_name.as_deref())
        .and_then(|v| report.check("itemName", item_name(&v)));
    let description = report
        .required("description", input.description.as_deref())
        .and_then(|v| report.check("description", description(&v)));
    let location = report
        .required("location", input.location.as_deref())
        .and_then(|v| report.check("location", trimmed(&v)));
    let date_lost = report
        .required("dateLost", input.date_lost.as_deref())
        .and_then(|v| report.check("dateLost", parse_date(&v)));
    let contact_number = report
        .required("contactNumber", input.contact_number.as_deref())
        .and_then(|v| report.check("contactNumber", trimmed(&v)));
    let email = report
        .required("email", input.email.as_deref())
        .and_then(|v| report.check("email", institutional_email(&v, rules)));
    let image = report
        .required("image", input.image.as_deref())
        .and_then(|v| report.check("image", image(&v, rules)));

    report.finish()?;
    match (item_name, description, location, date_lost, contact_number, email, image) {
        (
            Some(item_name),
            Some(description),
            Some(location),
            Some(date_lost),
            Some(contact_number),
            Some(email),
            Some(image),
        ) => Ok(LostItemDraft {
            item_name,
            description,
            location,
            date_lost,
            contact_number,
            email,
            image,
        }),
        _ => Err(ValidationErrors::single("input", super::MISSING_FIELDS_MESSAGE)),
    }
}

pub fn validate_lost_item_changes(input: &LostItemInput, rules: &ValidationConfig) -> Result<LostItemChanges, ValidationErrors> {
    let mut report = Report::default();
    let mut changes = LostItemChanges {
        is_found: input.is_found,
        ..Default::default()
    };

    if let Some(raw) = input.item_name.as_deref() {
        changes.item_name = report
            .required("itemName", Some(raw))
            .and_then(|v| report.check("itemName", item_name(&v)));
    }
    if let Some(raw) = input.description.as_deref() {
        changes.description = report
            .required("description", Some(raw))
            .and_then(|v| report.check("description", description(&v)));
    }
    if let Some(raw) = input.location.as_deref() {
        changes.location = report.required("location", Some(raw));
    }
    if let Some(raw) = input.date_lost.as_deref() {
        changes.date_lost = report
            .required("dateLost", Some(raw))
            .and_then(|v| report.check("dateLost", parse_date(&v)));
    }
    if let Some(raw) = input.contact_number.as_deref() {
        changes.contact_number = report.required("contactNumber", Some(raw));
    }
    if let Some(raw) = input.email.as_deref() {
        changes.email = report
            .required("email", Some(raw))
            .and_then(|v| report.check("email", institutional_email(&v, rules)));
    }
    if let Some(raw) = input.image.as_deref() {
        changes.image = report
            .required("image", Some(raw))
            .and_then(|v| report.check("image", image(&v, rules)));
    }

    report.finish()?;
    Ok(changes)
}

pub fn check_lost_item(item: &LostItem, rules: &ValidationConfig) -> Result<(), ValidationErrors> {
    validate_new_lost_item(&LostItemInput::from(item), rules).map(|_| ())
}
