use crate::model::DailySummary;

/// Length of the forecast window shown on the dashboard.
pub const OUTLOOK_DAYS: usize = 5;

/// Order day summaries by calendar date and keep the first [`OUTLOOK_DAYS`].
///
/// Day zero is whatever date the earliest bucket falls on, even when the
/// provider only had a sample or two left for it.
pub fn select_outlook(mut summaries: Vec<DailySummary>) -> Vec<DailySummary> {
    summaries.sort_by_key(|summary| summary.date);
    summaries.truncate(OUTLOOK_DAYS);
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::{bucketize, test_support::*};

    #[test]
    fn sorts_shuffled_days_and_truncates() {
        let mut samples = three_hourly(MONDAY, 7);
        samples.reverse();

        let outlook = select_outlook(bucketize(&samples, 0).expect("valid"));

        assert_eq!(outlook.len(), OUTLOOK_DAYS);
        let weekdays: Vec<_> = outlook.iter().map(|d| d.weekday.as_str()).collect();
        assert_eq!(weekdays, ["Mon", "Tue", "Wed", "Thu", "Fri"]);
        assert!(outlook.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn fewer_days_than_the_window_is_not_an_error() {
        let outlook = select_outlook(bucketize(&three_hourly(MONDAY, 2), 0).expect("valid"));
        assert_eq!(outlook.len(), 2);
    }

    #[test]
    fn empty_forecast_gives_empty_outlook() {
        assert!(select_outlook(Vec::new()).is_empty());
    }

    #[test]
    fn forty_three_hourly_samples_give_five_noon_summaries() {
        let samples = three_hourly(MONDAY, 5);
        assert_eq!(samples.len(), 40);

        let outlook = select_outlook(bucketize(&samples, 0).expect("valid"));

        assert_eq!(outlook.len(), 5);
        for (i, day) in outlook.iter().enumerate() {
            let noon = MONDAY + i as i64 * DAY + 12 * HOUR;
            assert!((day.sampled_at - noon).abs() <= 90 * 60);
        }
    }

    #[test]
    fn thin_first_day_still_counts_as_day_zero() {
        // Provider stream starting at 21:00: Monday only has one late sample.
        let samples: Vec<_> = (0..40)
            .map(|i| sample_at(MONDAY + 21 * HOUR + i * 3 * HOUR, i as f64))
            .collect();

        let outlook = select_outlook(bucketize(&samples, 0).expect("valid"));

        assert_eq!(outlook.len(), 5);
        assert_eq!(outlook[0].weekday, "Mon");
        assert_eq!(outlook[0].sampled_at, MONDAY + 21 * HOUR);
        assert_eq!(outlook[4].weekday, "Fri");
    }
}
