use chrono::{Datelike, NaiveDate};

/// Words kept when trimming a body into a search-result description.
pub const DESCRIPTION_WORD_COUNT: usize = 18;

/// Strip all markup from authored body content, leaving plain text.
pub fn strip_markup(html: &str) -> String {
    let cleaned = ammonia::Builder::empty().clean(html).to_string();
    // Collapse whitespace left behind by removed block elements.
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First `count` words of the text, with an ellipsis when truncated.
pub fn trim_words(text: &str, count: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= count {
        words.join(" ")
    } else {
        let mut trimmed = words[..count].join(" ");
        trimmed.push('…');
        trimmed
    }
}

/// Description for an event card: the curated excerpt when one exists,
/// otherwise the first words of the stripped body.
pub fn event_description(excerpt: Option<&str>, body: &str) -> String {
    match excerpt {
        Some(e) if !e.trim().is_empty() => e.trim().to_string(),
        _ => trim_words(&strip_markup(body), DESCRIPTION_WORD_COUNT),
    }
}

/// Split an event date into the (month, day) pair the calendar card shows:
/// abbreviated month name and zero-padded day.
pub fn event_month_day(date: NaiveDate) -> (String, String) {
    (
        date.format("%b").to_string(),
        format!("{:02}", date.day()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_markup_removes_tags_and_collapses_whitespace() {
        let html = "<p>Join us for the  <strong>annual</strong> lecture.</p>\n<p>All welcome.</p>";
        assert_eq!(strip_markup(html), "Join us for the annual lecture. All welcome.");
    }

    #[test]
    fn trim_words_leaves_short_text_untouched() {
        assert_eq!(trim_words("two words", 18), "two words");
    }

    #[test]
    fn trim_words_cuts_at_word_count_with_ellipsis() {
        let text = (1..=25).map(|i| i.to_string()).collect::<Vec<_>>().join(" ");
        let trimmed = trim_words(&text, 18);
        assert!(trimmed.ends_with("18…"), "got {trimmed}");
        assert_eq!(trimmed.split_whitespace().count(), 18);
    }

    #[test]
    fn description_prefers_curated_excerpt() {
        assert_eq!(
            event_description(Some("Hand-written summary."), "<p>ignored</p>"),
            "Hand-written summary."
        );
    }

    #[test]
    fn description_falls_back_to_trimmed_body() {
        let body = "<p>word ".repeat(30) + "</p>";
        let description = event_description(None, &body);
        assert_eq!(description.split_whitespace().count(), 18);
        assert!(description.ends_with('…'));
    }

    #[test]
    fn blank_excerpt_counts_as_absent() {
        assert_eq!(event_description(Some("   "), "<p>body text</p>"), "body text");
    }

    #[test]
    fn month_day_formatting() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 4).unwrap();
        assert_eq!(event_month_day(date), ("Sep".to_string(), "04".to_string()));
    }
}
