use crate::error::{check_extent, check_positive};
use crate::Result;

/// Picks how many equal cells fit across `total`.
///
/// Returns the largest count `c >= 1` such that `minimum * c + spacing * (c - 1) <= total`, and
/// the realized cell extent `(total - (c - 1) * spacing) / c` rounded to the nearest integral
/// unit. When even one cell does not fit, the count is still `1`.
///
/// `minimum` must be positive and finite; `spacing` and `total` must be non-negative and finite.
pub fn calculate_columns(minimum: f64, spacing: f64, total: f64) -> Result<(usize, f64)> {
    let minimum = check_positive("column minimum", minimum)?;
    let spacing = check_extent("column spacing", spacing)?;
    let total = check_extent("column total", total)?;

    let fits = |count: usize| minimum * count as f64 + spacing * (count - 1) as f64 <= total;

    // Closed form, then nudged to absorb floating-point error at the boundary.
    let estimate = ((total + spacing) / (minimum + spacing)).floor();
    let mut count = if estimate >= 1.0 { estimate as usize } else { 1 };
    while count > 1 && !fits(count) {
        count -= 1;
    }
    loop {
        match count.checked_add(1) {
            Some(next) if fits(next) => count = next,
            _ => break,
        }
    }

    let cell = ((total - (count - 1) as f64 * spacing) / count as f64).round();
    Ok((count, cell))
}
