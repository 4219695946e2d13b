use serde::{Deserialize, Serialize};

use gaitbase_core::models::value::FieldValue;

/// Divide a raw measurement by body weight.
///
/// Expects `[raw, weight]`. Propagates "no value" when either operand is
/// missing or non-numeric, or when the weight is zero.
pub fn weight_normalized(inputs: &[&FieldValue]) -> FieldValue {
    match inputs {
        [raw, weight] => match (raw.as_number(), weight.as_number()) {
            (Some(raw), Some(weight)) if weight != 0.0 => FieldValue::Number(raw / weight),
            _ => FieldValue::NoValue,
        },
        _ => FieldValue::NoValue,
    }
}

/// Grade of one joint in the SCALE (Selective Control Assessment of the
/// Lower Extremity) test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleGrade {
    NotMeasured,
    Unable,
    Impaired,
    Normal,
}

impl ScaleGrade {
    /// Options offered for a SCALE grade field, "not measured" first.
    pub const OPTIONS: [&'static str; 4] = [
        "Ei mitattu",
        "Normaali (2)",
        "Alentunut (1)",
        "Kykenemätön (0)",
    ];

    /// Parse the grade text stored for a SCALE field.
    pub fn from_value(value: &FieldValue) -> Self {
        match value {
            FieldValue::NoValue => ScaleGrade::NotMeasured,
            FieldValue::Text(text) => match text.as_str() {
                "Normaali (2)" => ScaleGrade::Normal,
                // older records carry the misspelled option
                "Alentunut (1)" | "Alentunnut (1)" => ScaleGrade::Impaired,
                "Kykenemätön (0)" => ScaleGrade::Unable,
                "Ei mitattu" => ScaleGrade::NotMeasured,
                other => {
                    tracing::warn!(grade = %other, "unrecognized SCALE grade, treating as not measured");
                    ScaleGrade::NotMeasured
                }
            },
            FieldValue::Number(n) => {
                tracing::warn!(grade = %n, "numeric SCALE grade, treating as not measured");
                ScaleGrade::NotMeasured
            }
        }
    }

    /// Points for the grade, `None` if not measured.
    pub fn points(&self) -> Option<u32> {
        match self {
            ScaleGrade::NotMeasured => None,
            ScaleGrade::Unable => Some(0),
            ScaleGrade::Impaired => Some(1),
            ScaleGrade::Normal => Some(2),
        }
    }
}

/// Total SCALE points over a limb.
///
/// Not-measured joints are skipped; if no joint was measured the total is
/// "no value".
pub fn scale_total(inputs: &[&FieldValue]) -> FieldValue {
    let measured: Vec<u32> = inputs
        .iter()
        .filter_map(|v| ScaleGrade::from_value(v).points())
        .collect();
    if measured.is_empty() {
        FieldValue::NoValue
    } else {
        FieldValue::Number(f64::from(measured.iter().sum::<u32>()))
    }
}
