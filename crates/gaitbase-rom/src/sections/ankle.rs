use gaitbase_core::models::field::FieldDecl;

use crate::sections::angles;
use crate::Section;

/// Ankle dorsiflexion with catches of the soleus and gastrocnemius.
pub struct Ankle;

impl Section for Ankle {
    fn id(&self) -> &str {
        "ankle"
    }

    fn name(&self) -> &str {
        "Nilkka"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            angles(&[
                "NilkkaSoleusCatch",
                "NilkkaSoleusPROM",
                "NilkkaGastroCatch",
                "NilkkaGastroPROM",
                "NilkkaPlantaarifleksio",
                "NilkkaInversio",
                "NilkkaEversio",
            ])
        });
        &FIELDS
    }
}
