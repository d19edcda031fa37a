//! Deterministic placeholder narrative content.
//!
//! Keywords and news have no bearing on game logic; they are pure
//! functions of the week index and date so replays stay reproducible.

use chrono::NaiveDate;
use game_core::NewsItem;

const KEYWORDS_PER_WEEK: usize = 5;
const NEWS_PER_WEEK: usize = 3;

/// Placeholder keywords for a week
pub fn keywords(week_index: u32) -> Vec<String> {
    (1..=KEYWORDS_PER_WEEK)
        .map(|k| format!("Keyword {}-{}", week_index, k))
        .collect()
}

/// Placeholder news items for a week
pub fn news(base_date: NaiveDate, week_index: u32) -> Vec<NewsItem> {
    (1..=NEWS_PER_WEEK)
        .map(|k| NewsItem {
            title: format!("Week {} news {}", week_index, k),
            url: format!("https://example.com/news/{}/{}", week_index, k),
            summary: format!("{} related summary {}", base_date, k),
        })
        .collect()
}

/// One-line digest shown in the highlights block
pub fn weekly_summary(start_date: NaiveDate) -> String {
    format!("{} weekly keyword digest", start_date)
}
