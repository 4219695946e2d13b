/// Diagnosis letters accepted as the first character of a patient code:
/// C = unspecified CP, E = misc. diagnoses, D = diplegia, H = hemiplegia,
/// M = meningomyelocele.
pub const PATIENT_CODE_PREFIXES: [char; 5] = ['C', 'E', 'D', 'H', 'M'];

/// Date format used by the form, e.g. "24.03.2021".
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Check that `date` is a real calendar date in `dd.mm.yyyy` form.
///
/// Day and month may be written without a leading zero, the year always
/// has four digits.
pub fn validate_date(date: &str) -> bool {
    let date = date.trim();
    let four_digit_year = date
        .rsplit_once('.')
        .is_some_and(|(_, year)| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()));
    four_digit_year && jiff::civil::Date::strptime(DATE_FORMAT, date).is_ok()
}

/// Check a patient code of the form `XNNNN_II`.
///
/// `X` is a diagnosis prefix, `NNNN` a running number from 0 to 9999 and
/// `II` the patient's initials (two or three letters).
pub fn validate_patient_code(code: &str) -> bool {
    let mut chars = code.chars();
    match chars.next() {
        Some(prefix) if PATIENT_CODE_PREFIXES.contains(&prefix) => {}
        _ => return false,
    }
    let Some((number, initials)) = chars.as_str().split_once('_') else {
        return false;
    };
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    match number.parse::<u32>() {
        Ok(n) if n <= 9999 => {}
        _ => return false,
    }
    let initials_len = initials.chars().count();
    (2..=3).contains(&initials_len) && initials.chars().all(char::is_alphabetic)
}
