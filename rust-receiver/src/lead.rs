//! Projection of RB2B visitor payloads onto lemlist lead fields.
//!
//! RB2B has shipped several naming conventions for the same data
//! ("WorkEmail", "Business Email", "email", ...), so every field tolerates
//! the known variants, in priority order. Fields the payload does not carry
//! are omitted from the serialized lead entirely.

use serde::Serialize;
use serde_json::{Map, Value};

/// A lead ready for the lemlist campaign API.
///
/// The email is not serialized: lemlist takes it as part of the lead URL,
/// not the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lead {
    #[serde(skip)]
    pub email: Option<String>,
    #[serde(rename = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "linkedinUrl", skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(rename = "jobTitle", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(rename = "companyName", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(rename = "companyWebsite", skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(rename = "companyIndustry", skip_serializing_if = "Option::is_none")]
    pub company_industry: Option<String>,
    #[serde(rename = "companySize", skip_serializing_if = "Option::is_none")]
    pub company_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(rename = "estimatedRevenue", skip_serializing_if = "Option::is_none")]
    pub estimated_revenue: Option<String>,
}

impl Lead {
    /// Project a validated webhook payload onto lead fields.
    ///
    /// Unknown payload fields are ignored.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Lead {
            email: pick(payload, &["WorkEmail", "Business Email", "email"]),
            first_name: pick(payload, &["FirstName", "First Name"]),
            last_name: pick(payload, &["LastName", "Last Name"]),
            linkedin_url: pick(payload, &["LinkedIn URL", "LinkedInUrl"]),
            job_title: pick(payload, &["Title", "jobTitle"]),
            company_name: pick(payload, &["CompanyName", "Company Name"]),
            company_website: pick(payload, &["Website", "companyWebsite"]),
            company_industry: pick(payload, &["Industry", "companyIndustry"]),
            company_size: pick(payload, &["EstimatedEmployeeCount", "Employee Count"]),
            city: pick(payload, &["City"]),
            state: pick(payload, &["State"]),
            zipcode: pick(payload, &["Zipcode", "zipcode"]),
            estimated_revenue: pick(payload, &["EstimateRevenue", "Estimate Revenue"]),
        }
    }
}

/// Return the first candidate field that holds a usable value.
fn pick(payload: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| payload.get(*name).and_then(value_to_string))
}

/// Normalize a JSON value to a lead field string.
///
/// Empty strings count as absent so a blank "WorkEmail" falls through to
/// the next candidate field. Numbers (employee counts, revenue estimates)
/// are stringified; other shapes are dropped.
fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
