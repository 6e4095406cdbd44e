//! Prayer time points and the schedule API response.

use serde::Deserialize;
use serde_json::Value;

use super::ScheduleError;
use crate::types::TimeOfDay;

/// The six daily time points, in schedule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Self; 6] =
        [Self::Fajr, Self::Sunrise, Self::Dhuhr, Self::Asr, Self::Maghrib, Self::Isha];

    /// Ordinal position in the schedule (0..=5).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Translation key under the `prayers` group.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Fajr => "fajr",
            Self::Sunrise => "sunrise",
            Self::Dhuhr => "dhuhr",
            Self::Asr => "asr",
            Self::Maghrib => "maghrib",
            Self::Isha => "isha",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fajr => "Fajr",
            Self::Sunrise => "Sunrise",
            Self::Dhuhr => "Dhuhr",
            Self::Asr => "Asr",
            Self::Maghrib => "Maghrib",
            Self::Isha => "Isha",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePoint {
    pub prayer: Prayer,
    pub time: TimeOfDay,
}

/// Today's schedule as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    pub location: Option<String>,
    /// Human-readable date, shown in date-display elements.
    pub date: Option<String>,
    pub points: [TimePoint; 6],
}

/// Wire shape of `GET /vaktija/v1/{location}`.
#[derive(Debug, Deserialize)]
struct ScheduleResponse {
    vakat: Vec<String>,
    #[serde(default)]
    datum: Option<DateField>,
    #[serde(default)]
    lokacija: Option<String>,
}

/// `datum` is either one string or several calendar renderings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DateField {
    Single(String),
    Parts(Vec<String>),
}

impl DateField {
    fn into_display(self) -> Option<String> {
        let text = match self {
            Self::Single(text) => text,
            Self::Parts(parts) => parts
                .into_iter()
                .filter(|part| !part.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" / "),
        };
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

impl DailySchedule {
    /// Parses an API response. Any malformed time rejects the whole schedule.
    ///
    /// # Errors
    /// - Response shape does not match
    /// - Not exactly six times
    /// - A time is not `HH:MM`
    pub fn from_json(json: Value) -> Result<Self, ScheduleError> {
        let response: ScheduleResponse = serde_json::from_value(json)?;

        if response.vakat.len() != Prayer::ALL.len() {
            return Err(ScheduleError::WrongLength(response.vakat.len()));
        }

        let mut points = Prayer::ALL.map(|prayer| TimePoint { prayer, time: TimeOfDay::default() });
        for (point, text) in points.iter_mut().zip(&response.vakat) {
            point.time = text
                .parse()
                .map_err(|source| ScheduleError::InvalidTime { prayer: point.prayer, source })?;
        }

        Ok(Self {
            location: response.lokacija,
            date: response.datum.and_then(DateField::into_display),
            points,
        })
    }

    #[must_use]
    pub fn time_of(&self, prayer: Prayer) -> TimeOfDay {
        self.points.get(prayer.index()).map(|point| point.time).unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::test_utils::schedule_response;

    const TIMES: [&str; 6] = ["03:45", "05:20", "12:45", "16:30", "19:50", "21:15"];

    #[rstest]
    fn parses_vaktija_response() {
        let schedule = DailySchedule::from_json(schedule_response(TIMES)).unwrap();

        assert_that!(schedule.location.as_deref(), some(eq("Sarajevo")));
        assert_that!(
            schedule.date.as_deref(),
            some(eq("26. rebi'u-l-evvel 1447 / četvrtak, 18. septembar 2025"))
        );
        assert_that!(schedule.time_of(Prayer::Asr).to_string(), eq("16:30"));
        assert_that!(schedule.points[0].prayer, eq(Prayer::Fajr));
        assert_that!(schedule.points[5].time.to_string(), eq("21:15"));
    }

    #[rstest]
    fn accepts_single_date_and_missing_optional_fields() {
        let json = json!({ "vakat": TIMES, "datum": "18.09.2025" });

        let schedule = DailySchedule::from_json(json).unwrap();

        assert_that!(schedule.date.as_deref(), some(eq("18.09.2025")));
        assert_that!(schedule.location, none());
    }

    #[rstest]
    fn blank_date_is_dropped() {
        let json = json!({ "vakat": TIMES, "datum": ["", " "] });

        let schedule = DailySchedule::from_json(json).unwrap();

        assert_that!(schedule.date, none());
    }

    #[rstest]
    fn rejects_wrong_length() {
        let json = json!({ "vakat": ["03:45", "05:20"] });

        let result = DailySchedule::from_json(json);

        assert!(matches!(result, Err(ScheduleError::WrongLength(2))));
    }

    #[rstest]
    fn rejects_malformed_time() {
        let mut times = TIMES;
        times[3] = "4:30 PM";

        let result = DailySchedule::from_json(schedule_response(times));

        assert!(matches!(result, Err(ScheduleError::InvalidTime { prayer: Prayer::Asr, .. })));
    }

    #[rstest]
    fn rejects_missing_times_field() {
        let result = DailySchedule::from_json(json!({ "datum": "today" }));

        assert!(matches!(result, Err(ScheduleError::InvalidResponse(_))));
    }

    #[rstest]
    fn prayer_order_matches_index() {
        for (index, prayer) in Prayer::ALL.into_iter().enumerate() {
            assert_that!(prayer.index(), eq(index));
        }
    }
}
