//! Formatting helpers shared by the UI and the log

use std::time::SystemTime;

/// Truncate to `max_width` characters, keeping the start
pub fn truncate_name(name: &str, max_width: usize) -> String {
    if name.chars().count() <= max_width {
        name.to_string()
    } else if max_width <= 1 {
        name.chars().take(max_width).collect()
    } else {
        let mut result: String = name.chars().take(max_width - 1).collect();
        result.push('…');
        result
    }
}

/// Truncate to `max_width` characters, keeping the end (the file name)
pub fn truncate_path(path: &str, max_width: usize) -> String {
    let char_count = path.chars().count();
    if char_count <= max_width {
        path.to_string()
    } else if max_width <= 1 {
        path.chars().skip(char_count - max_width).collect()
    } else {
        let mut result = String::from("…");
        result.extend(path.chars().skip(char_count - max_width + 1));
        result
    }
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// UTC calendar fields of a timestamp
struct Civil {
    year: i64,
    month: u32,
    day: u32,
    hour: u64,
    minute: u64,
    second: u64,
}

fn civil(time: SystemTime) -> Option<Civil> {
    let secs = time.duration_since(SystemTime::UNIX_EPOCH).ok()?.as_secs();
    let days = (secs / 86_400) as i64;
    let rem = secs % 86_400;

    // Days since 1970-01-01 to a proleptic Gregorian date, in 400-year eras
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);

    Some(Civil {
        year,
        month,
        day,
        hour: rem / 3600,
        minute: rem % 3600 / 60,
        second: rem % 60,
    })
}

/// "YYYY-MM-DD HH:MM" (UTC), dashes when unknown
pub fn format_date(time: Option<SystemTime>) -> String {
    match time.and_then(civil) {
        Some(c) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}",
            c.year, c.month, c.day, c.hour, c.minute
        ),
        None => "---------- --:--".to_string(),
    }
}

/// "YYYY-MM-DD HH:MM:SS" (UTC) for log lines
pub fn format_log_time(time: SystemTime) -> String {
    match civil(time) {
        Some(c) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            c.year, c.month, c.day, c.hour, c.minute, c.second
        ),
        None => "????-??-?? ??:??:??".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some(at(0))), "1970-01-01 00:00");
        // 2000-02-29 12:34:56, a leap day in a century year
        assert_eq!(format_date(Some(at(951_827_696))), "2000-02-29 12:34");
        assert_eq!(format_log_time(at(951_827_696)), "2000-02-29 12:34:56");
        // 2024-12-31 23:59:59
        assert_eq!(format_log_time(at(1_735_689_599)), "2024-12-31 23:59:59");
        assert_eq!(format_date(None), "---------- --:--");
    }

    #[test]
    fn test_truncation() {
        assert_eq!(truncate_name("document.txt", 20), "document.txt");
        assert_eq!(truncate_name("document.txt", 5), "docu…");
        assert_eq!(truncate_path("/home/user/file.txt", 9), "…file.txt");
        assert_eq!(truncate_path("файл", 4), "файл");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
