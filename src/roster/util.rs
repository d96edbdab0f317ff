use chrono::{Datelike, NaiveDate};

/// Jour de la semaine façon produit : 0=dimanche … 6=samedi.
pub(super) fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub(super) fn matches_weekly_off(weekly_off_day: Option<u8>, date: NaiveDate) -> bool {
    weekly_off_day == Some(day_of_week(date))
}
