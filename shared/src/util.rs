/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Render a stored date string for display.
///
/// Form submissions store dates as text. `YYYY-MM-DD` and RFC 3339 values
/// are rendered as `DD/MM/YYYY`; anything else is returned verbatim.
pub fn display_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let parsed = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().or_else(|| {
        chrono::DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|dt| dt.date_naive())
    });
    match parsed {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_plain() {
        assert_eq!(display_date("2025-03-09"), "09/03/2025");
    }

    #[test]
    fn test_display_date_rfc3339() {
        assert_eq!(display_date("2025-12-31T10:00:00Z"), "31/12/2025");
    }

    #[test]
    fn test_display_date_unparsable_is_verbatim() {
        assert_eq!(display_date("next friday"), "next friday");
        assert_eq!(display_date(""), "");
    }
}
