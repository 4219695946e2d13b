use gaitbase_core::models::field::FieldDecl;

use crate::sections::YES_NO;
use crate::Section;

/// Questionnaire on daily mobility, filled in with the patient.
pub struct Questionnaire;

impl Section for Questionnaire {
    fn id(&self) -> &str {
        "questionnaire"
    }

    fn name(&self) -> &str {
        "Kysely"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            vec![
                FieldDecl::numeric("KyselyPaivittainenMatka").with_unit(" m"),
                FieldDecl::choice(
                    "KyselyVasymys",
                    &["Ei mitattu", "Ei", "Joskus", "Usein"],
                ),
                FieldDecl::choice("KyselyKaatuilu", &YES_NO),
                FieldDecl::choice("KyselyApuvalineet", &YES_NO),
                FieldDecl::text("KyselyApuvalineetMitka"),
                FieldDecl::choice("KyselyKivut", &YES_NO),
                FieldDecl::text("KyselyKivutMissa"),
            ]
        });
        &FIELDS
    }
}
