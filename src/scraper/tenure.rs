use crate::models::YearMonth;

/// Human readable length of a position, e.g. `"1 yr(s) 6 mo(s)"`.
///
/// Both endpoint months are counted. When either month is unknown only the years are
/// subtracted. A non-positive span yields an empty string.
pub fn compute(start: YearMonth, end: YearMonth) -> String {
    let (start_year, end_year) = (i64::from(start.year), i64::from(end.year));
    let (start_month, end_month) = match (start.month, end.month) {
        (Some(s), Some(e)) => (i64::from(s), i64::from(e)),
        _ => return format!("{} yr(s)", end_year - start_year),
    };

    let total = (end_year - start_year) * 12 + (end_month - start_month) + 1;
    let years = total.div_euclid(12);
    let months = total.rem_euclid(12);

    match (years, months) {
        (y, m) if y > 0 && m > 0 => format!("{} yr(s) {} mo(s)", y, m),
        (0, m) if m > 0 => format!("{} mo(s)", m),
        (y, 0) if y > 0 => format!("{} yr(s)", y),
        _ => String::new(),
    }
}
