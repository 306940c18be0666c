/// Text processing utilities
pub mod text {
    /// Keep the first `max_chars` characters, appending an ellipsis when
    /// anything was cut. Counts characters, not bytes.
    pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
            None => text.to_string(),
        }
    }

    /// Collapse runs of whitespace so report lines stay on one line.
    pub fn single_line(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Time utilities
pub mod time {
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

    /// `dd/mm/yyyy`, the pt-BR short date.
    pub fn format_date_br(date: DateTime<Utc>) -> String {
        date.format("%d/%m/%Y").to_string()
    }

    pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
    }

    /// First instant after `date` ends; used as an exclusive upper bound.
    pub fn end_of_day_exclusive(date: NaiveDate) -> DateTime<Utc> {
        start_of_day(date) + Duration::days(1)
    }

    pub fn parse_iso_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
    }
}

#[cfg(test)]
mod tests {
    use super::text::*;
    use super::time::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn truncation_is_char_aware() {
        assert_eq!(truncate_with_ellipsis("ação", 2), "aç...");
        assert_eq!(truncate_with_ellipsis("curto", 100), "curto");
        assert_eq!(truncate_with_ellipsis("exato", 5), "exato");
    }

    #[test]
    fn single_line_collapses_whitespace() {
        assert_eq!(single_line("a\n  b\tc"), "a b c");
    }

    #[test]
    fn dates_render_day_first() {
        let date = Utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap();
        assert_eq!(format_date_br(date), "07/03/2024");
    }

    #[test]
    fn end_bound_is_next_midnight() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            end_of_day_exclusive(day),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(parse_iso_date("2024-01-31").unwrap(), day);
        assert!(parse_iso_date("31/01/2024").is_err());
    }
}
