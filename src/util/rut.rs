//! Chilean RUT formatting and validation (módulo 11 check digit).

#[cfg(test)]
#[path = "rut_test.rs"]
mod rut_test;

/// Keep digits and `k`/`K` only.
fn clean(rut: &str) -> String {
    rut.chars()
        .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
        .collect()
}

/// Format a RUT with thousand dots and the check-digit dash:
/// `12345678-5` → `12.345.678-5`. Inputs too short to have a check digit are
/// returned cleaned but unformatted.
pub fn format_rut(rut: &str) -> String {
    let clean = clean(rut);
    if clean.len() <= 1 {
        return clean;
    }

    let (body, dv) = clean.split_at(clean.len() - 1);
    let mut formatted = String::new();
    for (j, c) in body.chars().rev().enumerate() {
        if j > 0 && j % 3 == 0 {
            formatted.insert(0, '.');
        }
        formatted.insert(0, c);
    }

    format!("{formatted}-{}", dv.to_uppercase())
}

/// Validate the módulo 11 check digit.
pub fn validate_rut(rut: &str) -> bool {
    let clean = clean(rut);
    if clean.len() < 2 {
        return false;
    }

    let (body, dv) = clean.split_at(clean.len() - 1);
    if !body.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let mut sum: u32 = 0;
    let mut multiplier: u32 = 2;
    for c in body.chars().rev() {
        sum += c.to_digit(10).unwrap_or(0) * multiplier;
        multiplier = if multiplier == 7 { 2 } else { multiplier + 1 };
    }

    let expected = 11 - (sum % 11);
    let expected_dv = match expected {
        11 => "0".to_owned(),
        10 => "K".to_owned(),
        n => n.to_string(),
    };

    dv.to_uppercase() == expected_dv
}
