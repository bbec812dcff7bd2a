use crate::ids;

/// Every classmate is one of two categories, so `depth` classmates give `2^depth` arrangements
pub fn total_arrangements(depth: u32) -> u64 {
    u64::from(ids::leaf_count(depth))
}

/// The widget's "probability of having enough items" figure.
///
/// `((count_a / depth + count_b / depth) / 2) * 100`. This is a teaching
/// approximation, shown as-is. Returns 0 for depth 0.
pub fn illustrative_probability(count_a: u32, count_b: u32, depth: u32) -> f64 {
    if depth == 0 {
        return 0.0;
    }
    let depth = f64::from(depth);
    ((f64::from(count_a) / depth + f64::from(count_b) / depth) / 2.0) * 100.0
}

/// Two decimals and a percent sign, e.g. `50.00%`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}
