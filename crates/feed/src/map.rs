use brand_site_core::{FALLBACK_LINK, FEED_FALLBACK_TITLE, FeedItem};
use chrono::{DateTime, FixedOffset, Locale};
use scraper::Html;

use crate::parse::{FeedEntry, ParsedFeed};

/// Reshape parsed entries into frontend items, applying every fallback.
///
/// `now` stands in for entries without a usable publication date.
pub fn map_entries(
    feed: &ParsedFeed,
    default_source: &str,
    now: DateTime<FixedOffset>,
) -> Vec<FeedItem> {
    let source = feed
        .title
        .clone()
        .unwrap_or_else(|| default_source.to_string());

    feed.entries
        .iter()
        .enumerate()
        .map(|(index, entry)| map_entry(entry, index, &source, now))
        .collect()
}

fn map_entry(
    entry: &FeedEntry,
    index: usize,
    source: &str,
    now: DateTime<FixedOffset>,
) -> FeedItem {
    let id = entry
        .guid
        .clone()
        .or_else(|| entry.link.clone())
        .unwrap_or_else(|| format!("item-{}", index));

    let description = entry
        .description
        .as_deref()
        .or(entry.content.as_deref())
        .or(entry.summary.as_deref())
        .map(flatten_markup)
        .unwrap_or_default();

    let published = entry
        .published
        .as_deref()
        .and_then(parse_feed_date)
        .unwrap_or(now);

    FeedItem {
        id,
        title: entry
            .title
            .clone()
            .unwrap_or_else(|| FEED_FALLBACK_TITLE.to_string()),
        description,
        link: entry
            .link
            .clone()
            .unwrap_or_else(|| FALLBACK_LINK.to_string()),
        date: format_german_date(&published),
        source: source.to_string(),
    }
}

/// `pubDate` is RFC 2822 in RSS; Atom timestamps arrive as RFC 3339.
fn parse_feed_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}

/// "Veröffentlicht: 5. März 2024"
pub fn format_german_date(date: &DateTime<FixedOffset>) -> String {
    format!(
        "Veröffentlicht: {}",
        date.format_localized("%-d. %B %Y", Locale::de_DE)
    )
}

/// Reduce an HTML fragment to its text content with collapsed whitespace.
fn flatten_markup(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 12, 24, 12, 0, 0)
            .unwrap()
    }

    fn feed(entries: Vec<FeedEntry>) -> ParsedFeed {
        ParsedFeed {
            title: Some("Morgenpost".to_string()),
            entries,
        }
    }

    #[test]
    fn test_id_falls_back_to_link() {
        let entry = FeedEntry {
            link: Some("https://x/y".to_string()),
            ..FeedEntry::default()
        };
        let items = map_entries(&feed(vec![entry]), "FUNKE", now());
        assert_eq!(items[0].id, "https://x/y");
        assert_eq!(items[0].link, "https://x/y");
    }

    #[test]
    fn test_id_prefers_guid_then_synthetic_index() {
        let entries = vec![
            FeedEntry {
                guid: Some("g-1".to_string()),
                link: Some("https://x/1".to_string()),
                ..FeedEntry::default()
            },
            FeedEntry::default(),
        ];
        let items = map_entries(&feed(entries), "FUNKE", now());
        assert_eq!(items[0].id, "g-1");
        assert_eq!(items[1].id, "item-1");
    }

    #[test]
    fn test_missing_fields_use_fallbacks() {
        let parsed = ParsedFeed {
            title: None,
            entries: vec![FeedEntry::default()],
        };
        let items = map_entries(&parsed, "FUNKE Mediengruppe", now());
        let item = &items[0];

        assert_eq!(item.title, "Kein Titel");
        assert_eq!(item.link, "#");
        assert_eq!(item.description, "");
        assert_eq!(item.source, "FUNKE Mediengruppe");
        assert_eq!(item.date, "Veröffentlicht: 24. Dezember 2025");
    }

    #[test]
    fn test_description_chain_and_markup() {
        let entries = vec![
            FeedEntry {
                description: Some("<p>Kurz <b>gesagt</b> &amp; klar</p>".to_string()),
                content: Some("ignored".to_string()),
                ..FeedEntry::default()
            },
            FeedEntry {
                content: Some("<div>\n  Volltext\n</div>".to_string()),
                ..FeedEntry::default()
            },
            FeedEntry {
                summary: Some("Zusammenfassung".to_string()),
                ..FeedEntry::default()
            },
        ];
        let items = map_entries(&feed(entries), "FUNKE", now());
        assert_eq!(items[0].description, "Kurz gesagt & klar");
        assert_eq!(items[1].description, "Volltext");
        assert_eq!(items[2].description, "Zusammenfassung");
    }

    #[test]
    fn test_date_formats() {
        let entries = vec![
            FeedEntry {
                published: Some("Tue, 05 Mar 2024 10:00:00 +0100".to_string()),
                ..FeedEntry::default()
            },
            FeedEntry {
                published: Some("2024-01-02T08:30:00+00:00".to_string()),
                ..FeedEntry::default()
            },
            FeedEntry {
                published: Some("gestern".to_string()),
                ..FeedEntry::default()
            },
        ];
        let items = map_entries(&feed(entries), "FUNKE", now());
        assert_eq!(items[0].date, "Veröffentlicht: 5. März 2024");
        assert_eq!(items[1].date, "Veröffentlicht: 2. Januar 2024");
        assert_eq!(items[2].date, "Veröffentlicht: 24. Dezember 2025");
    }

    #[test]
    fn test_source_from_channel_title() {
        let items = map_entries(&feed(vec![FeedEntry::default()]), "FUNKE", now());
        assert_eq!(items[0].source, "Morgenpost");
    }
}
