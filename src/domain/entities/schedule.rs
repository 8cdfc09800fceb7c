use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::ALL
            .into_iter()
            .find(|frequency| frequency.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ScheduleError::InvalidFrequency(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("email address is required")]
    MissingEmail,
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
    #[error("invalid frequency: {0:?} (expected daily, weekly or monthly)")]
    InvalidFrequency(String),
    #[error("invalid day of week: {0:?}")]
    InvalidDay(String),
    #[error("invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTime(String),
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub frequency: String,
    pub email: String,
    pub day: String,
    pub time: String,
}

impl Default for ScheduleForm {
    fn default() -> Self {
        Self {
            frequency: Frequency::Weekly.as_str().to_string(),
            email: String::new(),
            day: weekday_name(Weekday::Mon).to_string(),
            time: "09:00".to_string(),
        }
    }
}

impl ScheduleForm {
    pub fn validate(&self) -> Result<ScheduleRequest, ScheduleError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ScheduleError::MissingEmail);
        }
        if !is_plausible_email(email) {
            return Err(ScheduleError::InvalidEmail(email.to_string()));
        }

        let frequency = self.frequency.parse::<Frequency>()?;
        let day = match frequency {
            Frequency::Weekly => Some(
                self.day
                    .trim()
                    .parse::<Weekday>()
                    .map_err(|_| ScheduleError::InvalidDay(self.day.clone()))?,
            ),
            Frequency::Daily | Frequency::Monthly => None,
        };
        let time = NaiveTime::parse_from_str(self.time.trim(), "%H:%M")
            .map_err(|_| ScheduleError::InvalidTime(self.time.clone()))?;

        Ok(ScheduleRequest {
            frequency,
            email: email.to_string(),
            day,
            time,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub frequency: Frequency,
    pub email: String,
    pub day: Option<Weekday>,
    pub time: NaiveTime,
}

impl ScheduleRequest {
    pub fn confirmation(&self) -> String {
        let time = self.time.format("%H:%M");
        match self.day {
            Some(day) => format!(
                "Report scheduled successfully! You will receive {} reports at {} every {} at {}.",
                self.frequency,
                self.email,
                weekday_name(day),
                time
            ),
            None => format!(
                "Report scheduled successfully! You will receive {} reports at {} at {}.",
                self.frequency, self.email, time
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(frequency: &str, email: &str, day: &str, time: &str) -> ScheduleForm {
        ScheduleForm {
            frequency: frequency.to_string(),
            email: email.to_string(),
            day: day.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn default_form_needs_only_an_email() {
        let mut draft = ScheduleForm::default();
        assert_eq!(draft.validate(), Err(ScheduleError::MissingEmail));

        draft.email = "ops@example.com".to_string();
        let request = draft.validate().expect("default form should validate");

        assert_eq!(request.frequency, Frequency::Weekly);
        assert_eq!(request.day, Some(Weekday::Mon));
        assert_eq!(request.time, NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"));
        assert_eq!(
            request.confirmation(),
            "Report scheduled successfully! You will receive weekly reports at ops@example.com every monday at 09:00."
        );
    }

    #[test]
    fn day_is_dropped_unless_weekly() {
        let request = form("monthly", "a@b.io", "friday", "18:30")
            .validate()
            .expect("monthly form should validate");

        assert_eq!(request.day, None);
        assert_eq!(
            request.confirmation(),
            "Report scheduled successfully! You will receive monthly reports at a@b.io at 18:30."
        );
    }

    #[test]
    fn malformed_fields_are_rejected() {
        assert!(matches!(
            form("weekly", "not-an-email", "monday", "09:00").validate(),
            Err(ScheduleError::InvalidEmail(_))
        ));
        assert!(matches!(
            form("hourly", "a@b.io", "monday", "09:00").validate(),
            Err(ScheduleError::InvalidFrequency(_))
        ));
        assert!(matches!(
            form("weekly", "a@b.io", "someday", "09:00").validate(),
            Err(ScheduleError::InvalidDay(_))
        ));
        assert!(matches!(
            form("daily", "a@b.io", "", "25:00").validate(),
            Err(ScheduleError::InvalidTime(_))
        ));
    }

    #[test]
    fn invalid_day_is_ignored_for_daily() {
        let request = form("daily", "a@b.io", "someday", "07:15").validate();
        assert!(request.is_ok(), "day only matters for weekly: {request:?}");
    }
}
