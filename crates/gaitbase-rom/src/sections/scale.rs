use gaitbase_core::models::field::FieldDecl;

use crate::derived::DerivedEngine;
use crate::error::RomError;
use crate::scoring::{scale_total, ScaleGrade};
use crate::Section;

/// SCALE: Selective Control Assessment of the Lower Extremity.
/// Five joints per limb, each graded 0–2 points. Limb total 0–10.
pub struct Scale;

const JOINTS: [&str; 5] = ["Lonkka", "Polvi", "Nilkka", "STJ", "Varpaat"];

/// `(total field, side suffix)` for each limb.
pub const LIMB_TOTALS: [(&str, &str); 2] = [
    ("SCALEWholeLimbTotOikPts", "Oik"),
    ("SCALEWholeLimbTotVasPts", "Vas"),
];

fn grade_field(joint: &str, side: &str) -> String {
    format!("SCALE{joint}Tot{side}")
}

impl Section for Scale {
    fn id(&self) -> &str {
        "scale"
    }

    fn name(&self) -> &str {
        "SCALE"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            let mut fields = Vec::new();
            for (total, side) in LIMB_TOTALS {
                fields.extend(
                    JOINTS
                        .iter()
                        .map(|joint| FieldDecl::choice(grade_field(joint, side), &ScaleGrade::OPTIONS)),
                );
                fields.push(FieldDecl::numeric(total).with_unit(" p").derived());
            }
            fields
        });
        &FIELDS
    }
}

/// Register the limb totals, if the form declares them.
pub fn register_totals(engine: &mut DerivedEngine, fields: &[FieldDecl]) -> Result<(), RomError> {
    for (total, side) in LIMB_TOTALS {
        if !fields.iter().any(|f| f.name == total) {
            continue;
        }
        let grades: Vec<String> = JOINTS.iter().map(|joint| grade_field(joint, side)).collect();
        let inputs: Vec<&str> = grades.iter().map(String::as_str).collect();
        engine.register(total, &inputs, scale_total)?;
    }
    Ok(())
}
