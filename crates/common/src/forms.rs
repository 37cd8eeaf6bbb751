//! Field rules for the request bodies posted by the web forms.
//!
//! A [`Field`] mirrors one input of a form: its kind decides the format check,
//! `required` and `min_length` carry the message shown next to the input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

const TOKEN_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Phone,
    Price,
    Token,
}

impl InputKind {
    /// Canonical stored form of a submitted value.
    pub fn normalize(&self, value: &str) -> String {
        match self {
            InputKind::Phone => value
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '-')
                .collect(),
            _ => value.trim().to_string(),
        }
    }

    fn format_message(&self) -> &'static str {
        match self {
            InputKind::Text => "*입력값이 올바르지 않습니다.",
            InputKind::Email => "*이메일 형식이 올바르지 않습니다.",
            InputKind::Phone => "*전화번호는 숫자만 입력해주세요.",
            InputKind::Price => "*가격을 올바르게 입력해주세요.",
            InputKind::Token => "*인증번호 6자리를 입력해주세요.",
        }
    }

    fn accepts(&self, normalized: &str) -> bool {
        match self {
            InputKind::Text => true,
            InputKind::Email => EMAIL.is_match(normalized),
            InputKind::Phone => normalized.chars().all(|c| c.is_ascii_digit()),
            InputKind::Price => normalized.parse::<i64>().map_or(false, |price| price >= 0),
            InputKind::Token => {
                normalized.len() == TOKEN_DIGITS && normalized.chars().all(|c| c.is_ascii_digit())
            }
        }
    }
}

/// A failed rule, attached to the field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    kind: InputKind,
    required: Option<&'static str>,
    min_length: Option<(usize, &'static str)>,
}

impl Field {
    pub fn new(name: &'static str, kind: InputKind) -> Self {
        Self {
            name,
            kind,
            required: None,
            min_length: None,
        }
    }

    pub fn required(mut self, message: &'static str) -> Self {
        self.required = Some(message);
        self
    }

    pub fn min_length(mut self, length: usize, message: &'static str) -> Self {
        self.min_length = Some((length, message));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    fn error(&self, message: &str) -> FieldError {
        FieldError::new(self.name, message)
    }

    /// Checks a submitted text value. Blank values count as missing.
    pub fn check(&self, value: Option<&str>) -> Result<(), FieldError> {
        let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
            return match self.required {
                Some(message) => Err(self.error(message)),
                None => Ok(()),
            };
        };

        // Separators alone, such as "-" for a phone, are not a value.
        let normalized = self.kind.normalize(raw);
        if normalized.is_empty() {
            return Err(self.error(self.kind.format_message()));
        }

        if let Some((length, message)) = self.min_length {
            if normalized.chars().count() < length {
                return Err(self.error(message));
            }
        }

        if !self.kind.accepts(&normalized) {
            return Err(self.error(self.kind.format_message()));
        }

        Ok(())
    }

    /// Checks a value the client already sent as a number.
    pub fn check_number(&self, value: Option<i64>) -> Result<(), FieldError> {
        match value {
            None => match self.required {
                Some(message) => Err(self.error(message)),
                None => Ok(()),
            },
            Some(number) => self.check(Some(&number.to_string())),
        }
    }
}
