use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Formats a load percentage the way the status line shows it: whole
/// percent, no padding.
pub fn format_percent(load: f64) -> String {
    format!("{load:.0}%")
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_is_rendered_whole() {
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(43.85), "44%");
        assert_eq!(format_percent(100.0), "100%");
    }

    #[test]
    fn bytes_scale_through_the_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(8 * 1024), "8 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
        assert_eq!(format_bytes(4 * 1024 * 1024 * 1024), "4.0 GB");
    }

    #[test]
    fn truncation_appends_an_ellipsis() {
        assert_eq!(truncate_unicode("abcdef", 4), "abc\u{2026}");
        assert_eq!(truncate_unicode("abc", 4), "abc");
    }
}
