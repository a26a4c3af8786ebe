use super::*;

// =============================================================
// format_rut
// =============================================================

#[test]
fn format_inserts_dots_and_dash() {
    assert_eq!(format_rut("123456785"), "12.345.678-5");
}

#[test]
fn format_strips_existing_punctuation_first() {
    assert_eq!(format_rut("12.345.678-5"), "12.345.678-5");
    assert_eq!(format_rut("12,345,678-5"), "12.345.678-5");
}

#[test]
fn format_uppercases_k_check_digit() {
    assert_eq!(format_rut("1111111k"), "1.111.111-K");
}

#[test]
fn format_short_inputs_pass_through() {
    assert_eq!(format_rut(""), "");
    assert_eq!(format_rut("5"), "5");
}

// =============================================================
// validate_rut
// =============================================================

#[test]
fn validate_accepts_correct_check_digits() {
    // 12.345.678 → módulo 11 check digit 5.
    assert!(validate_rut("12345678-5"));
    assert!(validate_rut("12.345.678-5"));
    // 11.111.111 → check digit 1.
    assert!(validate_rut("11111111-1"));
}

#[test]
fn validate_accepts_k_check_digit_case_insensitive() {
    // 20.347.878 → check digit K.
    assert!(validate_rut("20347878-K"));
    assert!(validate_rut("20347878-k"));
}

#[test]
fn validate_rejects_wrong_check_digit() {
    assert!(!validate_rut("12345678-9"));
    assert!(!validate_rut("11111111-2"));
}

#[test]
fn validate_rejects_garbage() {
    assert!(!validate_rut(""));
    assert!(!validate_rut("k"));
    assert!(!validate_rut("-5"));
    assert!(!validate_rut("abcdefg-5"));
}
