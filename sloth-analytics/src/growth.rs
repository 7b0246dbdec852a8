use crate::GrowthError;

/// Growth Percentage Rate (PR) between two member counts:
/// `((present - past) / past) * 100`.
///
/// The baseline must be non-zero or the percentage is undefined.
pub fn growth_percentage(present: i64, past: i64) -> Result<f64, GrowthError> {
    if past == 0 {
        return Err(GrowthError::ZeroBaseline);
    }

    Ok(((present - past) as f64 / past as f64) * 100.0)
}

/// Compute the growth rate for every designated adjacent pair in an ordered
/// sequence of per-period totals.
///
/// The pairing rule compares index `i` against `i - 1` whenever
/// `(i - 1) % 2 == 0`, so only every second adjacent pair produces a rate.
/// The rule mirrors how the data-bump history is recorded and is intentional;
/// do not "fix" it to a plain adjacent sweep.
pub fn growth_rates(totals: &[i64]) -> Result<Vec<f64>, GrowthError> {
    let mut rates = Vec::new();

    for i in 1..totals.len() {
        if (i - 1) % 2 == 0 {
            rates.push(growth_percentage(totals[i], totals[i - 1])?);
        }
    }

    Ok(rates)
}

/// Mean growth rate over an ordered history of per-period totals.
///
/// Fails with [`GrowthError::EmptyHistory`] when the sequence is too short to
/// produce any rate.
pub fn average_growth(totals: &[i64]) -> Result<f64, GrowthError> {
    let rates = growth_rates(totals)?;
    if rates.is_empty() {
        return Err(GrowthError::EmptyHistory);
    }

    Ok(rates.iter().sum::<f64>() / rates.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::{average_growth, growth_percentage, growth_rates};
    use crate::GrowthError;

    #[test]
    fn percentage_of_basic_changes() {
        assert_eq!(growth_percentage(110, 100), Ok(10.0));
        assert_eq!(growth_percentage(90, 100), Ok(-10.0));
        assert_eq!(growth_percentage(100, 100), Ok(0.0));
    }

    #[test]
    fn percentage_rejects_zero_baseline() {
        assert_eq!(growth_percentage(50, 0), Err(GrowthError::ZeroBaseline));
    }

    #[test]
    fn rates_follow_the_pairing_rule() {
        // Only indices 1 and 3 are compared against their predecessors.
        let totals = [100, 110, 110, 121, 121];
        assert_eq!(growth_rates(&totals), Ok(vec![10.0, 10.0]));
    }

    #[test]
    fn rates_of_constant_history_are_zero() {
        let totals = [250, 250, 250, 250, 250];
        assert_eq!(growth_rates(&totals), Ok(vec![0.0, 0.0]));
        assert_eq!(average_growth(&totals), Ok(0.0));
    }

    #[test]
    fn skipped_offsets_do_not_contribute() {
        // Growth happens at indices 2 and 4, which the pairing rule skips.
        let totals = [100, 100, 110, 110, 121];
        assert_eq!(growth_rates(&totals), Ok(vec![0.0, 0.0]));
        assert_eq!(average_growth(&totals), Ok(0.0));
    }

    #[test]
    fn average_rejects_empty_history() {
        assert_eq!(average_growth(&[]), Err(GrowthError::EmptyHistory));
        assert_eq!(average_growth(&[500]), Err(GrowthError::EmptyHistory));
    }
}
