//! Response envelopes
//!
//! List endpoints answer with one of two shapes:
//!
//! ```text
//! { "pageData": [...], "pageInfo": { "totalItems": 40, "totalPages": 4, ... } }
//! { "success": true, "data": [...], "total": 40 }
//! ```
//!
//! Both are normalized into [`Page`] here so nothing past the transport
//! sees either shape.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Page selection sent as `pageNum`/`pageSize` query parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_num: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num: page_num.max(1),
            page_size: page_size.max(1),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: u64,
    pub total_pages: u64,
    pub page_num: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        u64::from(self.page_num) < self.total_pages
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: Option<u64>,
    #[serde(default)]
    pub page_num: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Either list envelope the backend produces
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PageEnvelope<T> {
    #[serde(rename_all = "camelCase")]
    Paged {
        page_data: Vec<T>,
        page_info: PageInfo,
    },
    Flat {
        #[serde(default)]
        success: Option<bool>,
        data: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
}

impl<T> PageEnvelope<T> {
    /// Normalize against the page that was requested
    pub fn into_page(self, request: PageRequest) -> Page<T> {
        match self {
            PageEnvelope::Paged {
                page_data,
                page_info,
            } => {
                let page_size = page_info.page_size.unwrap_or(request.page_size).max(1);
                let total_pages = page_info
                    .total_pages
                    .unwrap_or_else(|| pages_for(page_info.total_items, page_size));
                Page {
                    items: page_data,
                    total_items: page_info.total_items,
                    total_pages,
                    page_num: page_info.page_num.unwrap_or(request.page_num),
                    page_size,
                }
            }
            PageEnvelope::Flat { success, data, total } => {
                if success == Some(false) {
                    tracing::warn!("List response flagged success=false");
                }
                let total_items = total.unwrap_or(data.len() as u64);
                Page {
                    total_pages: pages_for(total_items, request.page_size),
                    items: data,
                    total_items,
                    page_num: request.page_num,
                    page_size: request.page_size,
                }
            }
        }
    }
}

fn pages_for(total_items: u64, page_size: u32) -> u64 {
    total_items.div_ceil(u64::from(page_size.max(1)))
}

/// Single-record responses, either wrapped in `{ "data": ... }` or bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Data<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Data<T> {
    pub fn into_inner(self) -> T {
        match self {
            Data::Wrapped { data } => data,
            Data::Bare(value) => value,
        }
    }
}

/// Decode a single-record body in either shape
pub fn unwrap_data<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    serde_json::from_value::<Data<T>>(value).map(Data::into_inner)
}

/// One field-level validation message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldError {
    #[serde(alias = "path", alias = "param")]
    pub field: String,
    #[serde(alias = "msg")]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FieldMessages {
    One(String),
    Many(Vec<String>),
}

/// Error payload as sent by the backend
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    /// Machine-readable error code
    pub code: Option<String>,
    pub errors: Vec<FieldError>,
}

impl ApiErrorBody {
    /// Read whatever structure the payload has. Each part is read on its
    /// own, so an odd `message` or `code` never hides the field errors.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self {
                message: value.as_str().map(str::to_string),
                ..Self::default()
            };
        };

        Self {
            message: object.get("message").and_then(text_of),
            code: ["errorCode", "code"]
                .iter()
                .filter_map(|key| object.get(*key))
                .find_map(text_of),
            errors: object.get("errors").map(field_errors_of).unwrap_or_default(),
        }
    }

    /// Form field a known error code belongs to
    pub fn field_for_code(code: &str) -> Option<&'static str> {
        match code.to_ascii_uppercase().as_str() {
            "EMAIL_EXISTS" | "EMAIL_TAKEN" | "USER_NOT_FOUND" => Some("email"),
            "PHONE_EXISTS" | "PHONE_TAKEN" => Some("phone"),
            "INVALID_CREDENTIALS" | "WRONG_PASSWORD" => Some("password"),
            "STUDENT_NOT_FOUND" => Some("student_id"),
            "CAPTCHA_FAILED" => Some("captcha"),
            _ => None,
        }
    }

    /// Field → message, from the validation list and the error code.
    /// The first message per field wins.
    pub fn field_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.clone())
                .or_insert_with(|| error.message.clone());
        }

        if let Some(field) = self.code.as_deref().and_then(Self::field_for_code) {
            let message = self
                .message
                .clone()
                .or_else(|| self.code.clone())
                .unwrap_or_default();
            map.entry(field.to_string()).or_insert(message);
        }
        map
    }
}

/// Strings as-is, numbers printed, arrays of either joined
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(text_of).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}

/// `[{field, message}, ...]` or `{field: message | [messages]}`.
/// Entries that fit neither are skipped.
fn field_errors_of(value: &Value) -> Vec<FieldError> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<FieldError>(item.clone()).ok())
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(field, messages)| {
                let messages = match serde_json::from_value::<FieldMessages>(messages.clone()).ok()? {
                    FieldMessages::One(m) => vec![m],
                    FieldMessages::Many(ms) => ms,
                };
                Some(messages.into_iter().map(move |message| FieldError {
                    field: field.clone(),
                    message,
                }))
            })
            .flatten()
            .collect(),
        _ => Vec::new(),
    }
}
