use chrono::{DateTime, Duration, Timelike, Utc};

use crate::GrowthError;

/// Outcome of a member-count prediction.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Whole days elapsed before the goal is reached.
    pub days: u64,
    /// Hours into the final partial day.
    pub hours: u64,
    pub present: i64,
    pub future: i64,
    pub computed_at: DateTime<Utc>,
    pub reached_at: DateTime<Utc>,
}

impl Prediction {
    /// Three-line projection block shown inside the estimation embed.
    pub fn describe(&self) -> String {
        let last_day = self.computed_at.format("%d/%m/%Y at %H");
        let future_day = self.reached_at.format("%d/%m/%Y at %H");

        let line1 = format!(
            "{:<8} {} members. Date: ({})",
            "Present:", self.present, last_day
        );
        let line2 = format!("|↓ in {} day(s) and {} hours ↓|", self.days, self.hours);
        let line3 = format!(
            "{:<8} {} members. Date: ({})",
            "Future:", self.future, future_day
        );

        format!("{}\n{:^48}\n{}", line1, line2, line3)
    }
}

/// Simulate compound growth from `present` towards `future` at an average
/// daily rate of `rate` percent, and report how long it takes.
///
/// Whole days are accumulated by compounding once per day. The day on which
/// the goal falls is sliced into even hourly increments (the day's compound
/// amount divided by 24); on the first day only, the hour loop is aligned to
/// the wall-clock hour of `now` and runs for the hours left in that day. The
/// hour loop never runs past its day even if the goal is not reached within
/// it; this asymmetry is long-standing observed behavior and is kept as-is.
///
/// `now` is a parameter so the simulation is reproducible.
pub fn predict(
    present: i64,
    future: i64,
    rate: f64,
    now: DateTime<Utc>,
) -> Result<Prediction, GrowthError> {
    // An already-met goal needs no growth at all, so it short-circuits
    // before the rate is even looked at.
    if present >= future {
        return Ok(Prediction {
            days: 0,
            hours: 0,
            present,
            future,
            computed_at: now,
            reached_at: now,
        });
    }

    if rate <= 0.0 {
        return Err(GrowthError::NonPositiveRate(rate));
    }

    // Zero (or negative) membership never compounds anywhere.
    if present <= 0 {
        return Err(GrowthError::ZeroBaseline);
    }

    let goal = future as f64;
    let mut current = present as f64;
    let mut days: u64 = 0;
    let mut hours: u64 = 0;

    loop {
        let compound = (current * rate) / 100.0;

        if current + compound >= goal {
            let mut remaining_hours = 24;
            if now.hour() != 0 && days == 0 {
                remaining_hours = 24 - now.hour();
            }

            let hourly = compound / 24.0;
            for _ in 0..remaining_hours {
                current += hourly;
                hours += 1;

                if current >= goal {
                    break;
                }
            }

            break;
        }

        current += compound;
        days += 1;
    }

    let reached_at = now + Duration::days(days as i64) + Duration::hours(hours as i64);

    Ok(Prediction {
        days,
        hours,
        present,
        future,
        computed_at: now,
        reached_at,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::predict;
    use crate::GrowthError;
    use crate::growth::average_growth;

    fn midnight() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 5, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn goal_already_met_returns_zero_elapsed() {
        let prediction = predict(100, 100, 5.0, midnight()).unwrap();
        assert_eq!(prediction.days, 0);
        assert_eq!(prediction.hours, 0);
        assert_eq!(prediction.reached_at, prediction.computed_at);

        let prediction = predict(250, 100, 5.0, midnight()).unwrap();
        assert_eq!((prediction.days, prediction.hours), (0, 0));

        // A met goal wins over every other guard, whatever the rate.
        let prediction = predict(100, 100, -1.0, midnight()).unwrap();
        assert_eq!((prediction.days, prediction.hours), (0, 0));
        let prediction = predict(100, 100, 0.0, midnight()).unwrap();
        assert_eq!((prediction.days, prediction.hours), (0, 0));
    }

    #[test]
    fn non_positive_rate_is_rejected() {
        assert_eq!(
            predict(100, 200, 0.0, midnight()),
            Err(GrowthError::NonPositiveRate(0.0))
        );
        assert_eq!(
            predict(100, 200, -3.5, midnight()),
            Err(GrowthError::NonPositiveRate(-3.5))
        );
    }

    #[test]
    fn zero_membership_is_rejected() {
        assert_eq!(
            predict(0, 200, 10.0, midnight()),
            Err(GrowthError::ZeroBaseline)
        );
    }

    #[test]
    fn compound_simulation_is_deterministic() {
        // 121 members growing 10% a day crosses 200 after five whole days
        // plus seven hourly slices of the sixth day's compound amount.
        let prediction = predict(121, 200, 10.0, midnight()).unwrap();
        assert_eq!(prediction.days, 5);
        assert_eq!(prediction.hours, 7);
        assert_eq!(
            prediction.reached_at,
            Utc.with_ymd_and_hms(2023, 5, 6, 7, 0, 0).unwrap()
        );

        // Same inputs, same answer.
        assert_eq!(predict(121, 200, 10.0, midnight()).unwrap(), prediction);
    }

    #[test]
    fn first_day_hour_loop_aligns_to_wall_clock() {
        // Goal falls on day zero at 20:00, so only four hourly slices run,
        // and the loop stops there even though the goal was not reached.
        let evening = Utc.with_ymd_and_hms(2023, 5, 1, 20, 0, 0).unwrap();
        let prediction = predict(100, 110, 10.0, evening).unwrap();
        assert_eq!(prediction.days, 0);
        assert_eq!(prediction.hours, 4);
    }

    #[test]
    fn history_average_feeds_the_predictor() {
        // Growth lands on the designated pairing offsets: 10% twice.
        let totals = [100, 110, 110, 121, 121];
        let rate = average_growth(&totals).unwrap();
        assert_eq!(rate, 10.0);

        let prediction = predict(121, 200, rate, midnight()).unwrap();
        assert_eq!((prediction.days, prediction.hours), (5, 7));
    }

    #[test]
    fn flat_history_refuses_prediction() {
        let totals = [100, 100, 110, 110, 121];
        let rate = average_growth(&totals).unwrap();
        assert_eq!(rate, 0.0);
        assert_eq!(
            predict(121, 200, rate, midnight()),
            Err(GrowthError::NonPositiveRate(0.0))
        );
    }

    #[test]
    fn description_contains_both_dates() {
        let prediction = predict(121, 200, 10.0, midnight()).unwrap();
        let block = prediction.describe();
        assert!(block.contains("Present: 121 members. Date: (01/05/2023 at 00)"));
        assert!(block.contains("in 5 day(s) and 7 hours"));
        assert!(block.contains("Future:  200 members. Date: (06/05/2023 at 07)"));
    }
}
