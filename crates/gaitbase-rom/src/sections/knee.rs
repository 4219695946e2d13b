use gaitbase_core::models::field::FieldDecl;

use crate::sections::{angles, bilateral, YES_NO};
use crate::Section;

/// Knee extension and flexion.
pub struct Knee;

impl Section for Knee {
    fn id(&self) -> &str {
        "knee"
    }

    fn name(&self) -> &str {
        "Polvi"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            let mut fields = angles(&[
                "PolviEkstensioVap",
                "PolviEkstensioAct",
                "PolviFleksio",
                "PolviLateraalinenStabiliteetti",
            ]);
            fields.extend(bilateral("PolviPatellaAlta", |name| {
                FieldDecl::choice(name, &YES_NO)
            }));
            fields
        });
        &FIELDS
    }
}
