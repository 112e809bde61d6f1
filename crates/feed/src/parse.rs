//! Feed document parsing.
//!
//! RSS 2.0 is tried first, Atom second. Both are reduced to the same
//! [`ParsedFeed`] shape so the field mapping does not care which format the
//! publisher serves.

use crate::FeedError;

/// Format-neutral view of a feed document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    /// Channel (RSS) or feed (Atom) title
    pub title: Option<String>,
    pub entries: Vec<FeedEntry>,
}

/// One raw item as it appeared in the feed, before any fallback is applied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    /// `content:encoded` in RSS, `<content>` in Atom
    pub content: Option<String>,
    /// Atom `<summary>`
    pub summary: Option<String>,
    /// Raw `pubDate` (RFC 2822) or Atom timestamp (RFC 3339)
    pub published: Option<String>,
    pub guid: Option<String>,
}

pub fn parse_feed(bytes: &[u8]) -> Result<ParsedFeed, FeedError> {
    match rss::Channel::read_from(bytes) {
        Ok(channel) => Ok(from_rss(&channel)),
        Err(rss_err) => match atom_syndication::Feed::read_from(bytes) {
            Ok(feed) => Ok(from_atom(&feed)),
            Err(atom_err) => Err(FeedError::Parse(format!(
                "not RSS ({}) and not Atom ({})",
                rss_err, atom_err
            ))),
        },
    }
}

fn from_rss(channel: &rss::Channel) -> ParsedFeed {
    let entries = channel
        .items()
        .iter()
        .map(|item| FeedEntry {
            title: non_empty(item.title()),
            link: non_empty(item.link()),
            description: non_empty(item.description()),
            content: non_empty(item.content()),
            summary: None,
            published: non_empty(item.pub_date()),
            guid: item.guid().and_then(|g| non_empty(Some(g.value()))),
        })
        .collect();

    ParsedFeed {
        title: non_empty(Some(channel.title())),
        entries,
    }
}

fn from_atom(feed: &atom_syndication::Feed) -> ParsedFeed {
    let entries = feed
        .entries()
        .iter()
        .map(|entry| {
            let link = entry
                .links()
                .iter()
                .find(|l| l.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|l| l.href());

            let published = entry
                .published()
                .copied()
                .unwrap_or_else(|| *entry.updated());

            FeedEntry {
                title: non_empty(Some(entry.title().value.as_str())),
                link: non_empty(link),
                description: None,
                content: entry.content().and_then(|c| non_empty(c.value())),
                summary: entry.summary().and_then(|s| non_empty(Some(s.value.as_str()))),
                published: Some(published.to_rfc3339()),
                guid: non_empty(Some(entry.id())),
            }
        })
        .collect();

    ParsedFeed {
        title: non_empty(Some(feed.title().value.as_str())),
        entries,
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
