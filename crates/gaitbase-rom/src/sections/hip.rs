use gaitbase_core::models::field::FieldDecl;

use crate::sections::angles;
use crate::Section;

/// Passive range of motion of the hip.
pub struct Hip;

impl Section for Hip {
    fn id(&self) -> &str {
        "hip"
    }

    fn name(&self) -> &str {
        "Lonkka"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            angles(&[
                "LonkkaFleksio",
                "LonkkaEkstensio",
                "LonkkaEkstensioPolvi90",
                "LonkkaAbduktio",
                "LonkkaAbduktioPolvi90",
                "LonkkaAdduktio",
                "LonkkaSisakierto",
                "LonkkaUlkokierto",
                "LonkkaHamstringPopliteal",
                "LonkkaRectusCatch",
            ])
        });
        &FIELDS
    }
}
