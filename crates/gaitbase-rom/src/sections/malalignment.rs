use gaitbase_core::models::field::FieldDecl;

use crate::sections::angles;
use crate::Section;

/// Torsional malalignment of the femur and tibia.
pub struct Malalignment;

impl Section for Malalignment {
    fn id(&self) -> &str {
        "malalignment"
    }

    fn name(&self) -> &str {
        "Virheasennot"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            angles(&[
                "VirheasAnteversio",
                "VirheasReisiJalkaterakulma",
                "VirheasBimalleolaarikulma",
            ])
        });
        &FIELDS
    }
}
