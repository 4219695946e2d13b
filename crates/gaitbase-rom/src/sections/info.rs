use gaitbase_core::models::field::FieldDecl;

use crate::{Section, DATE_FIELD};

/// General information about the examination.
pub struct Info;

impl Section for Info {
    fn id(&self) -> &str {
        "info"
    }

    fn name(&self) -> &str {
        "Tiedot"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            vec![
                FieldDecl::text(DATE_FIELD),
                FieldDecl::text("TiedotMittaajat"),
                FieldDecl::text("TiedotLahete"),
                FieldDecl::text("TiedotLisatiedot"),
            ]
        });
        &FIELDS
    }

    fn first_field(&self) -> Option<&str> {
        // the date is filled automatically for new entries
        Some("TiedotMittaajat")
    }
}
