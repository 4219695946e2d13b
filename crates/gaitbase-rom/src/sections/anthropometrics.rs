use gaitbase_core::models::field::FieldDecl;

use crate::sections::bilateral;
use crate::{Section, WEIGHT_FIELD};

/// Body measurements. The weight is the divisor of every weight-normalized
/// field.
pub struct Anthropometrics;

impl Section for Anthropometrics {
    fn id(&self) -> &str {
        "anthropometrics"
    }

    fn name(&self) -> &str {
        "Antropometria"
    }

    fn fields(&self) -> &[FieldDecl] {
        static FIELDS: std::sync::LazyLock<Vec<FieldDecl>> = std::sync::LazyLock::new(|| {
            let mm = |name: String| FieldDecl::numeric(name).with_unit(" mm");

            let mut fields = Vec::new();
            fields.extend(bilateral("AntropAlaraaja", mm));
            fields.extend(bilateral("AntropPolvi", mm));
            fields.extend(bilateral("AntropNilkka", mm));
            fields.extend(bilateral("AntropSIAS", mm));
            fields.push(FieldDecl::numeric("AntropPituus").with_unit(" cm"));
            fields.push(FieldDecl::numeric(WEIGHT_FIELD).with_unit(" kg"));
            fields
        });
        &FIELDS
    }
}
