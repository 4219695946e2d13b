use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::value::{FieldValue, NO_VALUE_TEXT};

/// Storage affinity of a field's column in the `roms` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Affinity {
    Numeric,
    Text,
}

impl Affinity {
    pub fn sql_type(&self) -> &'static str {
        match self {
            Affinity::Numeric => "NUMERIC",
            Affinity::Text => "TEXT",
        }
    }
}

/// What kind of input a field takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// A measurement. Holds a number or the "no value" sentinel.
    Numeric,
    /// Free text.
    Text,
    /// One of a fixed list of textual options.
    Choice { options: Vec<String> },
}

/// Declaration of one form field. The declaration carries the storage type
/// tag; nothing is inferred from how the field is displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub kind: FieldKind,
    /// Unit appended to numeric values in text reports (e.g. "°", " kg").
    pub unit: Option<String>,
    /// Decimals shown in reports. The stored value keeps full precision.
    #[serde(default)]
    pub decimals: Option<u32>,
    /// Derived fields are recomputed from other fields and never edited directly.
    pub derived: bool,
    pub default: FieldValue,
}

impl FieldDecl {
    /// A numeric measurement, not measured by default.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Numeric,
            unit: None,
            decimals: None,
            derived: false,
            default: FieldValue::NoValue,
        }
    }

    /// Free text, empty by default.
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Text,
            unit: None,
            decimals: None,
            derived: false,
            default: FieldValue::Text(String::new()),
        }
    }

    /// A choice field. The first option is the default.
    pub fn choice(name: impl Into<String>, options: &[&str]) -> Self {
        let default = options
            .first()
            .map(|o| FieldValue::from_text(*o))
            .unwrap_or(FieldValue::NoValue);
        Self {
            name: name.into(),
            kind: FieldKind::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            unit: None,
            decimals: None,
            derived: false,
            default,
        }
    }

    pub fn with_unit(mut self, unit: &str) -> Self {
        self.unit = Some(unit.to_string());
        self
    }

    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    pub fn with_default(mut self, default: impl Into<FieldValue>) -> Self {
        self.default = default.into();
        self
    }

    pub fn derived(mut self) -> Self {
        self.derived = true;
        self
    }

    pub fn affinity(&self) -> Affinity {
        match self.kind {
            FieldKind::Numeric => Affinity::Numeric,
            FieldKind::Text | FieldKind::Choice { .. } => Affinity::Text,
        }
    }

    /// Unit to display for `value`. Only measured numbers carry a unit.
    pub fn unit_for(&self, value: &FieldValue) -> &str {
        match (value, &self.unit) {
            (FieldValue::Number(_), Some(unit)) => unit,
            _ => "",
        }
    }

    /// Display text of `value` in a report, rounded to the field's decimals.
    pub fn display(&self, value: &FieldValue) -> String {
        match (value, self.decimals) {
            (FieldValue::Number(n), Some(decimals)) => {
                let scale = 10f64.powi(decimals as i32);
                FieldValue::Number((n * scale).round() / scale).to_string()
            }
            _ => value.to_string(),
        }
    }

    /// Check that `value` is acceptable for this field.
    pub fn check(&self, value: &FieldValue) -> Result<(), CoreError> {
        match (&self.kind, value) {
            (_, FieldValue::NoValue) => Ok(()),
            (FieldKind::Numeric, FieldValue::Number(_)) => Ok(()),
            (FieldKind::Text, FieldValue::Text(_)) => Ok(()),
            (FieldKind::Choice { options }, FieldValue::Text(t)) => {
                if options.iter().any(|o| o == t) {
                    Ok(())
                } else {
                    Err(CoreError::InvalidChoice {
                        name: self.name.clone(),
                        value: t.clone(),
                    })
                }
            }
            _ => Err(CoreError::KindMismatch {
                name: self.name.clone(),
                affinity: self.affinity(),
                value: value.to_string(),
            }),
        }
    }

    /// Parse user-typed text into a value for this field.
    ///
    /// Numeric input accepts a decimal comma; an empty input or the sentinel
    /// text means "not measured".
    pub fn parse_input(&self, input: &str) -> Result<FieldValue, CoreError> {
        let value = match self.kind {
            FieldKind::Numeric => {
                let trimmed = input.trim();
                if trimmed.is_empty() || trimmed == NO_VALUE_TEXT {
                    FieldValue::NoValue
                } else {
                    let n = trimmed.replace(',', ".").parse::<f64>().map_err(|_| {
                        CoreError::InvalidNumber {
                            name: self.name.clone(),
                            input: input.to_string(),
                        }
                    })?;
                    if !n.is_finite() {
                        return Err(CoreError::InvalidNumber {
                            name: self.name.clone(),
                            input: input.to_string(),
                        });
                    }
                    FieldValue::Number(n)
                }
            }
            FieldKind::Text | FieldKind::Choice { .. } => FieldValue::from_text(input),
        };
        self.check(&value)?;
        Ok(value)
    }
}
