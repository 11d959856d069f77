use chrono::{Datelike, Local, NaiveDate};

/// Week-of-year used as the weekly pick key:
/// `ceil((days since Jan 1 + weekday of Jan 1 + 1) / 7)` with Sunday as
/// weekday 0. Weeks therefore start on Sunday and the week holding Jan 1 is
/// week 1. Changing this shifts every stored weekly key.
pub fn week_number(date: NaiveDate) -> u32 {
    let days_since_jan_1 = date.ordinal0();
    let jan_1_weekday = NaiveDate::from_yo_opt(date.year(), 1)
        .map(|jan_1| jan_1.weekday().num_days_from_sunday())
        .unwrap_or(0);

    (days_since_jan_1 + jan_1_weekday + 1).div_ceil(7)
}

/// Week number of today's local date.
pub fn current_week_number() -> u32 {
    week_number(Local::now().date_naive())
}

/// Shape of a Sunday-first month view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthGrid {
    pub first_day: NaiveDate,
    pub days_in_month: u32,
    /// Empty cells before the 1st in a Sunday-first row.
    pub leading_blanks: u32,
}

impl MonthGrid {
    /// `month` is 1-based. Returns `None` for an impossible year/month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let days_in_month = next_month.signed_duration_since(first_day).num_days() as u32;

        Some(Self {
            first_day,
            days_in_month,
            leading_blanks: first_day.weekday().num_days_from_sunday(),
        })
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_day.iter_days().take(self.days_in_month as usize)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{week_number, MonthGrid};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn week_number_golden_values() {
        // 2024-01-01 is a Monday.
        assert_eq!(week_number(date(2024, 3, 15)), 11);
        assert_eq!(week_number(date(2024, 1, 1)), 1);
        assert_eq!(week_number(date(2024, 1, 6)), 1);
        assert_eq!(week_number(date(2024, 1, 7)), 2);
        assert_eq!(week_number(date(2024, 12, 31)), 53);
    }

    #[test]
    fn week_number_when_year_starts_on_sunday() {
        // 2023-01-01 is a Sunday.
        assert_eq!(week_number(date(2023, 1, 1)), 1);
        assert_eq!(week_number(date(2023, 1, 7)), 1);
        assert_eq!(week_number(date(2023, 1, 8)), 2);
    }

    #[test]
    fn week_number_when_year_starts_on_saturday() {
        // 2022-01-01 is a Saturday, so Jan 2 already opens week 2.
        assert_eq!(week_number(date(2022, 1, 1)), 1);
        assert_eq!(week_number(date(2022, 1, 2)), 2);
    }

    #[test]
    fn month_grid_shape() {
        let february = MonthGrid::new(2024, 2).expect("valid month");
        assert_eq!(february.days_in_month, 29);
        // 2024-02-01 is a Thursday.
        assert_eq!(february.leading_blanks, 4);
        assert_eq!(february.days().last(), Some(date(2024, 2, 29)));

        let december = MonthGrid::new(2023, 12).expect("valid month");
        assert_eq!(december.days_in_month, 31);
        assert_eq!(december.leading_blanks, 5);

        assert!(MonthGrid::new(2024, 13).is_none());
    }
}
