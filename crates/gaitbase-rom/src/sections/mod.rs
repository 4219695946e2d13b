pub mod ankle;
pub mod anthropometrics;
pub mod balance;
pub mod hip;
pub mod info;
pub mod isokinetics;
pub mod knee;
pub mod malalignment;
pub mod questionnaire;
pub mod scale;

use gaitbase_core::models::field::FieldDecl;

/// Right/left pair of a measurement: `{base}Oik` and `{base}Vas`.
pub(crate) fn bilateral(base: &str, make: impl Fn(String) -> FieldDecl) -> [FieldDecl; 2] {
    [make(format!("{base}Oik")), make(format!("{base}Vas"))]
}

/// Bilateral angles in degrees.
pub(crate) fn angles(bases: &[&str]) -> Vec<FieldDecl> {
    bases
        .iter()
        .flat_map(|base| bilateral(base, |name| FieldDecl::numeric(name).with_unit("°")))
        .collect()
}

pub(crate) const YES_NO: [&str; 3] = ["Ei mitattu", "Ei", "Kyllä"];
