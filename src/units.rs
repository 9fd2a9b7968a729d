use crate::types::UnitConversion;

pub const CM_PER_INCH: f64 = 2.54;
pub const MM_PER_INCH: f64 = 25.4;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Inches to cm/mm plus the pixel count needed at 300 DPI.
pub fn convert_units(inches: f64) -> UnitConversion {
    UnitConversion {
        inches: round_to(inches, 3),
        cm: round_to(inches * CM_PER_INCH, 3),
        mm: round_to(inches * MM_PER_INCH, 2),
        pixels_at_300_dpi: (inches * 300.0).round() as i64,
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
