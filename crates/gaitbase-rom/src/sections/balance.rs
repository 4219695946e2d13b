use gaitbase_core::models::field::FieldDecl;

use crate::sections::bilateral;
use crate::Section;

/// One-leg standing time.
pub struct Balance;

impl Section for Balance {
    fn id(&self) -> &str {
        "balance"
    }

    fn name(&self) -> &str {
        "Tasapaino"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            bilateral("Tasap", |name| FieldDecl::numeric(name).with_unit(" s")).to_vec()
        });
        &FIELDS
    }
}
