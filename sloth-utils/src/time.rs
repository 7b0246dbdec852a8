use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

/// Return the current unix timestamp in seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Calendar label used to identify one day of analytics history.
pub fn day_label(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::day_label;

    #[test]
    fn day_labels_are_day_month_year() {
        let at = Utc.with_ymd_and_hms(2023, 5, 6, 23, 59, 0).unwrap();
        assert_eq!(day_label(at), "06/05/2023");
    }
}
