use gaitbase_core::validate::{validate_date, validate_patient_code};

#[test]
fn dates_must_be_real_and_day_first() {
    assert!(validate_date("24.03.2021"));
    assert!(validate_date("29.02.2024"));
    assert!(!validate_date("29.02.2023"));
    assert!(!validate_date("2021-03-24"));
    assert!(!validate_date(""));
}

#[test]
fn year_needs_four_digits() {
    assert!(!validate_date("24.03.21"));
    assert!(!validate_date("24.03.021"));
    assert!(!validate_date("24.03.20210"));
    assert!(!validate_date("31.02.2021"));
    assert!(validate_date("1.2.2021"));
}

#[test]
fn patient_codes() {
    assert!(validate_patient_code("C0001_JS"));
    assert!(validate_patient_code("H1234_ABC"));
    assert!(validate_patient_code("M9999_AB"));
    assert!(!validate_patient_code(""));
    assert!(!validate_patient_code("X0001_JS"));
    assert!(!validate_patient_code("C0001JS"));
    assert!(!validate_patient_code("C10000_JS"));
    assert!(!validate_patient_code("C0001_J"));
    assert!(!validate_patient_code("C0001_ABCD"));
    assert!(!validate_patient_code("C0001_A1"));
    assert!(!validate_patient_code("C_JS"));
}

#[test]
fn running_number_is_checked_by_value() {
    assert!(validate_patient_code("C00012_AB"));
    assert!(validate_patient_code("D7_AK"));
    assert!(!validate_patient_code("C99999_AB"));
    assert!(!validate_patient_code("C99999999999_AB"));
    assert!(!validate_patient_code("C+12_AB"));
}
