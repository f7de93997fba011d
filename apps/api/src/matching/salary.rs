/// Every run of ASCII digits in a salary string, in order of appearance.
///
/// Runs too large for `u64` saturate rather than being dropped.
pub fn extract_integers(salary_range: &str) -> Vec<u64> {
    salary_range
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .map(|run| run.parse::<u64>().unwrap_or(u64::MAX))
        .collect()
}

/// Sort key for salary ordering: the largest integer in the string, 0 if none.
///
/// Units are ignored, so "₹30k-50k/month" (50) outranks "₹6-10 LPA" (10).
pub fn max_salary_figure(salary_range: &str) -> u64 {
    extract_integers(salary_range).into_iter().max().unwrap_or(0)
}
