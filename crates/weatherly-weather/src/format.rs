use chrono::NaiveDate;

/// Label for a forecast day: "Today", or the short weekday name ("Mon").
///
/// Dates that do not parse as ISO `YYYY-MM-DD` are returned as given.
pub fn format_day(iso_date: &str, is_today: bool) -> String {
    if is_today {
        return "Today".to_string();
    }

    match NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") {
        Ok(date) => date.format("%a").to_string(),
        Err(e) => {
            tracing::debug!("Unparseable forecast date {:?}: {}", iso_date, e);
            iso_date.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_label_ignores_date() {
        assert_eq!(format_day("2024-03-01", true), "Today");
        assert_eq!(format_day("garbage", true), "Today");
    }

    #[test]
    fn test_weekday_abbreviations() {
        // 2024-03-04 was a Monday
        let week = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        for (offset, expected) in week.iter().enumerate() {
            let date = format!("2024-03-{:02}", 4 + offset);
            assert_eq!(format_day(&date, false), *expected, "date {date}");
        }
    }

    #[test]
    fn test_unparseable_date_is_echoed() {
        assert_eq!(format_day("not-a-date", false), "not-a-date");
    }
}
