use crate::entities::Grade;

/// Σ(grade·credits) / Σ(credits), or 0 when there are no credits.
///
/// Both sums are taken over sorted terms, so the result is bit-for-bit the
/// same for any ordering of `grades`.
pub fn weighted_gpa(grades: &[Grade]) -> f64 {
    let total_credits = ordered_sum(grades.iter().map(|g| g.credits));
    if total_credits <= 0.0 {
        return 0.0;
    }
    let weighted = ordered_sum(grades.iter().map(|g| g.grade * g.credits));
    weighted / total_credits
}

fn ordered_sum(terms: impl Iterator<Item = f64>) -> f64 {
    let mut terms: Vec<f64> = terms.collect();
    terms.sort_by(f64::total_cmp);
    terms.into_iter().sum()
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    (value * factor).round() / factor
}
