use serde::Deserialize;
use serde_json::Value;

use super::{image, min_chars, present, Report, ValidationErrors};
use crate::config::ValidationConfig;
use crate::database::models::{Condition, Product};

pub const DEFAULT_PHONE: &str = "Not provided";
pub const DEFAULT_UNSPECIFIED: &str = "Not specified";

/// Body of POST/PUT /api/products
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub category: Option<String>,
    /// Number or numeric string
    pub price: Option<Value>,
    pub condition: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub year: Option<String>,
    pub branch: Option<String>,
    pub is_available: Option<bool>,
}

/// A validated new listing, before the owner snapshot is attached
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub condition: Condition,
    pub description: String,
    pub image: String,
    pub phone: String,
    pub year: String,
    pub branch: String,
}

/// Validated subset of fields for an update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub condition: Option<Condition>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub year: Option<String>,
    pub branch: Option<String>,
    pub is_available: Option<bool>,
}

impl ProductChanges {
    pub fn apply_to(self, product: &mut Product) {
        if let Some(v) = self.name {
            product.name = v;
        }
        if let Some(v) = self.category {
            product.category = v;
        }
        if let Some(v) = self.price {
            product.price = v;
        }
        if let Some(v) = self.condition {
            product.condition = v;
        }
        if let Some(v) = self.description {
            product.description = v;
        }
        if let Some(v) = self.image {
            product.image = v;
        }
        if let Some(v) = self.phone {
            product.owner.phone = v;
        }
        if let Some(v) = self.year {
            product.owner.year = v;
        }
        if let Some(v) = self.branch {
            product.owner.branch = v;
        }
        if let Some(v) = self.is_available {
            product.is_available = v;
        }
    }
}

impl From<&Product> for ProductInput {
    fn from(p: &Product) -> Self {
        Self {
            name: Some(p.name.clone()),
            category: Some(p.category.clone()),
            price: Some(Value::from(p.price)),
            condition: Some(p.condition.as_str().to_string()),
            description: Some(p.description.clone()),
            image: Some(p.image.clone()),
            phone: Some(p.owner.phone.clone()),
            year: Some(p.owner.year.clone()),
            branch: Some(p.owner.branch.clone()),
            is_available: Some(p.is_available),
        }
    }
}

fn name(value: &str) -> Result<String, String> {
    min_chars(value, 3, "Product name")
}

/// Free-text category, stored lowercased
fn category(value: &str) -> Result<String, String> {
    Ok(value.trim().to_lowercase())
}

fn condition(value: &str) -> Result<Condition, String> {
    Condition::from_label(value).ok_or_else(|| {
        let labels: Vec<&str> = Condition::ALL.iter().map(Condition::as_str).collect();
        format!("Condition must be one of: {}", labels.join(", "))
    })
}

fn description(value: &str, rules: &ValidationConfig) -> Result<String, String> {
    let text = min_chars(value, 10, "Description")?;
    if text.chars().count() > rules.product_description_max {
        return Err(format!(
            "Description cannot exceed {} characters",
            rules.product_description_max
        ));
    }
    Ok(text)
}

/// `None` when the price is absent, null or blank
fn price(value: Option<&Value>) -> Option<Result<f64, String>> {
    let parsed = match value? {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => return None,
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Some(match parsed {
        Some(p) if !p.is_finite() => Err("Price must be a number".to_string()),
        Some(p) if p < 0.0 => Err("Price cannot be negative".to_string()),
        Some(p) => Ok(p),
        None => Err("Price must be a number".to_string()),
    })
}

fn contact_detail(value: Option<&str>, default: &str) -> String {
    present(value).unwrap_or(default).to_string()
}

pub fn validate_new_product(input: &ProductInput, rules: &ValidationConfig) -> Result<ProductDraft, ValidationErrors> {
    let mut report = Report::default();

    let name = report
        .required("name", input.name.as_deref())
        .and_then(|v| report.check("name", name(&v)));
    let category = report
        .required("category", input.category.as_deref())
        .and_then(|v| report.check("category", category(&v)));
    let price = match price(input.price.as_ref()) {
        Some(result) => report.check("price", result),
        None => {
            report.missing("price");
            None
        }
    };
    let condition = report
        .required("condition", input.condition.as_deref())
        .and_then(|v| report.check("condition", condition(&v)));
    let description = report
        .required("description", input.description.as_deref())
        .and_then(|v| report.check("description", description(&v, rules)));
    let image = report
        .required("image", input.image.as_deref())
        .and_then(|v| report.check("image", image(&v, rules)));

    report.finish()?;
    match (name, category, price, condition, description, image) {
        (Some(name), Some(category), Some(price), Some(condition), Some(description), Some(image)) => {
            Ok(ProductDraft {
                name,
                category,
                price,
                condition,
                description,
                image,
                phone: contact_detail(input.phone.as_deref(), DEFAULT_PHONE),
                year: contact_detail(input.year.as_deref(), DEFAULT_UNSPECIFIED),
                branch: contact_detail(input.branch.as_deref(), DEFAULT_UNSPECIFIED),
            })
        }
        _ => Err(ValidationErrors::single("input", super::MISSING_FIELDS_MESSAGE)),
    }
}

/// Validates only the fields present in an update body
pub fn validate_product_changes(input: &ProductInput, rules: &ValidationConfig) -> Result<ProductChanges, ValidationErrors> {
    let mut report = Report::default();
    let mut changes = ProductChanges {
        is_available: input.is_available,
        ..Default::default()
    };

    if let Some(raw) = input.name.as_deref() {
        changes.name = report
            .required("name", Some(raw))
            .and_then(|v| report.check("name", name(&v)));
    }
    if let Some(raw) = input.category.as_deref() {
        changes.category = report
            .required("category", Some(raw))
            .and_then(|v| report.check("category", category(&v)));
    }
    if input.price.is_some() {
        changes.price = match price(input.price.as_ref()) {
            Some(result) => report.check("price", result),
            None => {
                report.missing("price");
                None
            }
        };
    }
    if let Some(raw) = input.condition.as_deref() {
        changes.condition = report
            .required("condition", Some(raw))
            .and_then(|v| report.check("condition", condition(&v)));
    }
    if let Some(raw) = input.description.as_deref() {
        changes.description = report
            .required("description", Some(raw))
            .and_then(|v| report.check("description", description(&v, rules)));
    }
    if let Some(raw) = input.image.as_deref() {
        changes.image = report
            .required("image", Some(raw))
            .and_then(|v| report.check("image", image(&v, rules)));
    }
    if input.phone.is_some() {
        changes.phone = Some(contact_detail(input.phone.as_deref(), DEFAULT_PHONE));
    }
    if input.year.is_some() {
        changes.year = Some(contact_detail(input.year.as_deref(), DEFAULT_UNSPECIFIED));
    }
    if input.branch.is_some() {
        changes.branch = Some(contact_detail(input.branch.as_deref(), DEFAULT_UNSPECIFIED));
    }

    report.finish()?;
    Ok(changes)
}

/// Full re-check of a stored or merged record
pub fn check_product(product: &Product, rules: &ValidationConfig) -> Result<(), ValidationErrors> {
    validate_new_product(&ProductInput::from(product), rules).map(|_| ())
}
