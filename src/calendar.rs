/// Day resolution and the date <-> file name mapping
use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

const FILE_SUFFIX: &str = "-daily.md";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The day before `date`, rewound to Friday when it lands on a weekend
/// and `skip_weekends` is set.
pub fn previous_workday(date: NaiveDate, skip_weekends: bool) -> NaiveDate {
    let mut previous = date.pred_opt().unwrap_or(date);

    if skip_weekends {
        while is_weekend(previous) {
            previous = match previous.checked_sub_days(Days::new(1)) {
                Some(day) => day,
                None => break,
            };
        }
    }

    previous
}

/// Which day's note the cheat sheet should read
pub fn resolve_target(today: NaiveDate, show_today: bool, skip_weekends: bool) -> NaiveDate {
    if show_today {
        today
    } else {
        previous_workday(today, skip_weekends)
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `2026-01-30` -> `2026-01-30-daily.md`
pub fn file_name(date: NaiveDate) -> String {
    format!("{}{}", date.format(DATE_FORMAT), FILE_SUFFIX)
}

/// Inverse of [`file_name`]; `None` for anything that is not a day note
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let stem = name.strip_suffix(FILE_SUFFIX)?;
    NaiveDate::parse_from_str(stem, DATE_FORMAT).ok()
}

/// `2026-01-30 (Friday)`
pub fn day_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d (%A)").to_string()
}
