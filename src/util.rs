const UNITS: [&str; 4] = ["", "k", "M", "B"];

/// Human-readable download counts: 950 -> "950", 1200 -> "1.2k",
/// 3_400_000 -> "3.4M".
pub fn format_count(count: f64) -> String {
    let count = count.max(0.0);
    let mut value = count;
    let mut unit = 0usize;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{}", count.round() as u64)
    } else {
        format!("{value:.1}{}", UNITS[unit])
    }
}
