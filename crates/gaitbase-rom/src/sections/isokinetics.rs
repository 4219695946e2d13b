use gaitbase_core::models::field::FieldDecl;

use crate::sections::bilateral;
use crate::{Section, NORMALIZED_SUFFIX, UNNORMALIZED_SUFFIX};

/// Isokinetic strength. Each torque is entered raw (`...NormUn`, Nm) and
/// shown normalized to body weight (`...Norm`, Nm/kg).
pub struct Isokinetics;

impl Section for Isokinetics {
    fn id(&self) -> &str {
        "isokinetics"
    }

    fn name(&self) -> &str {
        "Isokineettinen"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            let movements = [
                "IsokinPolviEkstensio",
                "IsokinPolviFleksio",
                "IsokinNilkkaPlantaarifleksio",
                "IsokinNilkkaDorsifleksio",
            ];

            let mut fields = Vec::new();
            for movement in movements {
                fields.extend(bilateral(movement, |side| {
                    FieldDecl::numeric(format!("{side}{UNNORMALIZED_SUFFIX}")).with_unit(" Nm")
                }));
                fields.extend(bilateral(movement, |side| {
                    FieldDecl::numeric(format!("{side}{NORMALIZED_SUFFIX}"))
                        .with_unit(" Nm/kg")
                        .with_decimals(2)
                        .derived()
                }));
            }
            fields
        });
        &FIELDS
    }
}
