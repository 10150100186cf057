//! House lookups from cusp longitudes, and parsing of house labels.

const HOUSE_LABELS: [&str; 12] = [
    "FIRST", "SECOND", "THIRD", "FOURTH", "FIFTH", "SIXTH", "SEVENTH", "EIGHTH", "NINTH", "TENTH",
    "ELEVENTH", "TWELFTH",
];

/// House (1..=12) containing `longitude`, given the twelve cusp longitudes in
/// house order. Handles houses that straddle 0° Aries.
///
/// Returns `None` when no house contains the longitude, which only happens with
/// malformed cusps.
pub fn house_for_longitude(longitude: f64, cusps: &[f64; 12]) -> Option<u8> {
    let lon = longitude.rem_euclid(360.0);

    for i in 0..12 {
        let start = cusps[i].rem_euclid(360.0);
        let mut end = cusps[(i + 1) % 12].rem_euclid(360.0);
        let mut g = lon;

        if end < start {
            end += 360.0;
            if g < start {
                g += 360.0;
            }
        }

        if start <= g && g < end {
            return Some(i as u8 + 1);
        }
    }

    None
}

/// Parse a house given as a number or as a label like `Third_House`.
pub fn parse_house_label(label: &str) -> Option<u8> {
    let trimmed = label.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
        return (1..=12).contains(&n).then_some(n);
    }

    let upper = trimmed.to_uppercase();
    let stem = upper.strip_suffix("_HOUSE").unwrap_or(&upper);
    HOUSE_LABELS
        .iter()
        .position(|name| *name == stem)
        .map(|i| i as u8 + 1)
}
