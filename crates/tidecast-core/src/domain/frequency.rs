use std::collections::HashMap;

use serde::Serialize;
use time::{Date, Duration, Month};

use super::Timestamp;

const DAY_SECONDS: i64 = 86_400;

/// Sampling frequency inferred from the observed axis.
///
/// The inferred frequency drives two things: how future timestamps
/// continue past the last observation, and how many observations make
/// up one year when yearly seasonality is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Regular but unrecognized spacing, in whole seconds.
    Irregular { seconds: i64 },
}

impl Frequency {
    /// Infer the frequency from the modal gap between consecutive
    /// timestamps. Expects ascending order; duplicates are ignored.
    /// Falls back to daily when no positive gap exists.
    pub fn infer(timestamps: &[Timestamp]) -> Self {
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for pair in timestamps.windows(2) {
            let gap = pair[1].since(pair[0]).whole_seconds();
            if gap > 0 {
                *counts.entry(gap).or_default() += 1;
            }
        }

        // Modal gap, ties broken towards the smaller spacing.
        let modal = counts
            .into_iter()
            .max_by(|(gap_a, count_a), (gap_b, count_b)| {
                count_a.cmp(count_b).then(gap_b.cmp(gap_a))
            })
            .map(|(gap, _)| gap);

        match modal {
            None => Self::Daily,
            Some(1) => Self::Secondly,
            Some(60) => Self::Minutely,
            Some(3_600) => Self::Hourly,
            Some(s) if s == DAY_SECONDS => Self::Daily,
            Some(s) if s == 7 * DAY_SECONDS => Self::Weekly,
            Some(s) if (28 * DAY_SECONDS..=31 * DAY_SECONDS).contains(&s) => Self::Monthly,
            Some(s) if (360 * DAY_SECONDS..=370 * DAY_SECONDS).contains(&s) => Self::Yearly,
            Some(s) => Self::Irregular { seconds: s },
        }
    }

    /// Timestamp `steps` periods after `from`. Monthly and yearly
    /// spacing advances the calendar rather than a fixed duration, so
    /// month-end series stay on month boundaries.
    pub fn advance(self, from: Timestamp, steps: i64) -> Timestamp {
        match self {
            Self::Secondly => from + Duration::seconds(steps),
            Self::Minutely => from + Duration::minutes(steps),
            Self::Hourly => from + Duration::hours(steps),
            Self::Daily => from + Duration::days(steps),
            Self::Weekly => from + Duration::weeks(steps),
            Self::Monthly => add_months(from, steps),
            Self::Yearly => add_months(from, 12 * steps),
            Self::Irregular { seconds } => from + Duration::seconds(seconds * steps),
        }
    }

    /// Observations per year at this frequency, used as the seasonal
    /// period when yearly seasonality is on.
    pub fn periods_per_year(self) -> usize {
        match self {
            Self::Secondly => 31_536_000,
            Self::Minutely => 525_600,
            Self::Hourly => 8_760,
            Self::Daily => 365,
            Self::Weekly => 52,
            Self::Monthly => 12,
            Self::Yearly => 1,
            Self::Irregular { seconds } => {
                let periods = (365.25 * DAY_SECONDS as f64 / seconds as f64).round();
                periods.max(1.0) as usize
            }
        }
    }
}

/// Calendar month arithmetic with the day-of-month clamped to the
/// target month's length (Jan 31 + 1 month = Feb 28/29).
fn add_months(from: Timestamp, months: i64) -> Timestamp {
    let datetime = from.into_inner();
    let date = datetime.date();

    let total = date.year() as i64 * 12 + (u8::from(date.month()) as i64 - 1) + months;
    let year = total.div_euclid(12) as i32;
    let month = Month::try_from(total.rem_euclid(12) as u8 + 1).expect("month index in 1..=12");

    let mut day = date.day();
    let new_date = loop {
        match Date::from_calendar_date(year, month, day) {
            Ok(date) => break date,
            Err(_) => day -= 1,
        }
    };

    Timestamp::from_offset_datetime(datetime.replace_date(new_date))
}
