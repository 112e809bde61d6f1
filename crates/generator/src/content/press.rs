use brand_site_core::config::Defaults;
use brand_site_core::{FALLBACK_LINK, PressArticle, Result, SiteConfig};
use serde::Deserialize;

use crate::assemble::{Assembled, Rejected, partition, sort_by_date_desc};
use crate::frontmatter::{ContentRecord, scalar_string};
use crate::normalize::{
    PRESS_EXCERPT_BUDGET, markdown_to_text, non_blank, normalize_asset_path, parse_content_date,
    truncate,
};
use crate::reader::read_markdown_dir;

pub const CONTENT_DIR: &str = "press";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PressFrontmatter {
    #[serde(deserialize_with = "scalar_string")]
    slug: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    date: Option<String>,
    #[serde(alias = "source", alias = "outlet", deserialize_with = "scalar_string")]
    publication: Option<String>,
    #[serde(alias = "url", deserialize_with = "scalar_string")]
    link: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    image: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    excerpt: Option<String>,
}

pub fn normalize(
    record: &ContentRecord,
    defaults: &Defaults,
) -> std::result::Result<PressArticle, Rejected> {
    let fm: PressFrontmatter = record
        .deserialize()
        .map_err(|err| Rejected::new(&record.source_path, err.to_string()))?;

    let title =
        non_blank(fm.title).ok_or_else(|| Rejected::missing_field(&record.source_path, "title"))?;
    let raw_date =
        non_blank(fm.date).ok_or_else(|| Rejected::missing_field(&record.source_path, "date"))?;
    let date = parse_content_date(&raw_date).ok_or_else(|| {
        Rejected::new(
            &record.source_path,
            format!("unparseable date '{}'", raw_date),
        )
    })?;

    let excerpt = non_blank(fm.excerpt).unwrap_or_else(|| markdown_to_text(&record.body));

    Ok(PressArticle {
        slug: non_blank(fm.slug).unwrap_or_else(|| record.file_stem()),
        title,
        date,
        publication: non_blank(fm.publication).unwrap_or_default(),
        link: non_blank(fm.link).unwrap_or_else(|| FALLBACK_LINK.to_string()),
        image: normalize_asset_path(
            &non_blank(fm.image).unwrap_or_else(|| defaults.press_image.clone()),
        ),
        excerpt: truncate(&excerpt, PRESS_EXCERPT_BUDGET),
    })
}

/// Press articles, newest first
pub fn collect(config: &SiteConfig) -> Result<Assembled<PressArticle>> {
    let records = read_markdown_dir(&config.content_dir().join(CONTENT_DIR))?;
    let results = records
        .into_iter()
        .map(|r| r.and_then(|record| normalize(&record, &config.defaults)));

    let mut assembled = partition(results, "press");
    sort_by_date_desc(&mut assembled.items, |a| a.date);
    Ok(assembled)
}
