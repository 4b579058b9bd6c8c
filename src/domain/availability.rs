use chrono::NaiveDate;

/// A member is on holiday while the stored end date lies strictly after
/// `today`. On the end date itself the member is back.
pub fn is_on_holiday(today: NaiveDate, on_holidays_till: Option<NaiveDate>) -> bool {
    on_holidays_till.is_some_and(|until| until > today)
}

pub fn is_available(today: NaiveDate, on_holidays_till: Option<NaiveDate>) -> bool {
    !is_on_holiday(today, on_holidays_till)
}
