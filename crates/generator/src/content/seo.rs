use brand_site_core::config::SeoDefaults;
use brand_site_core::{PageSeo, Result, SiteConfig};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::assemble::{Assembled, Rejected, partition};
use crate::frontmatter::{ContentRecord, scalar_string};
use crate::normalize::{is_absolute_url, non_blank, normalize_asset_path};
use crate::reader::read_markdown_dir;

pub const CONTENT_DIR: &str = "seo";

/// Key of the entry that always carries the site-wide defaults
pub const DEFAULT_PAGE: &str = "default";

/// Page name to SEO metadata, emitted as one JSON object
pub type SeoMap = BTreeMap<String, PageSeo>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Keywords {
    List(Vec<String>),
    Comma(String),
}

impl Keywords {
    fn into_vec(self) -> Vec<String> {
        let raw = match self {
            Keywords::List(list) => list,
            Keywords::Comma(s) => s.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SeoFrontmatter {
    #[serde(deserialize_with = "scalar_string")]
    page: Option<String>,
    /// Route of the page, e.g. `/speaking`
    #[serde(deserialize_with = "scalar_string")]
    path: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    description: Option<String>,
    keywords: Option<Keywords>,
    #[serde(alias = "og_image", alias = "image", deserialize_with = "scalar_string")]
    og_image: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    canonical: Option<String>,
}

/// Entry built purely from the configured defaults
pub fn default_entry(seo: &SeoDefaults) -> PageSeo {
    PageSeo {
        title: seo.title.clone(),
        description: seo.description.clone(),
        keywords: seo.keywords.clone(),
        og_image: normalize_asset_path(&seo.og_image),
        canonical: format!("{}/", seo.site_url),
    }
}

/// Map holding only the `default` entry; the fallback when no SEO content exists
pub fn default_map(seo: &SeoDefaults) -> SeoMap {
    SeoMap::from([(DEFAULT_PAGE.to_string(), default_entry(seo))])
}

pub fn normalize(
    record: &ContentRecord,
    seo: &SeoDefaults,
) -> std::result::Result<(String, PageSeo), Rejected> {
    let fm: SeoFrontmatter = record
        .deserialize()
        .map_err(|err| Rejected::new(&record.source_path, err.to_string()))?;

    let page = non_blank(fm.page).unwrap_or_else(|| record.file_stem());
    let path = non_blank(fm.path).unwrap_or_else(|| route_for(&page));
    let path = normalize_asset_path(&path);

    let keywords = fm
        .keywords
        .map(Keywords::into_vec)
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| seo.keywords.clone());

    let entry = PageSeo {
        title: non_blank(fm.title).unwrap_or_else(|| seo.title.clone()),
        description: non_blank(fm.description).unwrap_or_else(|| seo.description.clone()),
        keywords,
        og_image: normalize_asset_path(
            &non_blank(fm.og_image).unwrap_or_else(|| seo.og_image.clone()),
        ),
        canonical: non_blank(fm.canonical).unwrap_or_else(|| {
            if is_absolute_url(&path) {
                path.clone()
            } else {
                format!("{}{}", seo.site_url, path)
            }
        }),
    };

    Ok((page, entry))
}

fn route_for(page: &str) -> String {
    match page {
        "home" | "index" | DEFAULT_PAGE => "/".to_string(),
        other => format!("/{}", other),
    }
}

/// Per-page SEO entries plus the `default` entry; duplicate page keys are
/// rejected in favour of the first file that defines them.
pub fn collect(config: &SiteConfig) -> Result<Assembled<(String, PageSeo)>> {
    let records = read_markdown_dir(&config.content_dir().join(CONTENT_DIR))?;

    let mut seen = std::collections::HashSet::new();
    let results = records
        .into_iter()
        .map(|r| -> std::result::Result<(String, PageSeo), Rejected> {
            let record = r?;
            let (page, entry) = normalize(&record, &config.seo)?;
            if seen.insert(page.clone()) {
                Ok((page, entry))
            } else {
                Err(Rejected::new(
                    &record.source_path,
                    format!("duplicate SEO entry for page '{}'", page),
                ))
            }
        });

    Ok(partition(results, "seo"))
}

/// Fold assembled entries into the emitted map, filling in `default`.
pub fn into_map(entries: Vec<(String, PageSeo)>, seo: &SeoDefaults) -> SeoMap {
    let mut map = default_map(seo);
    map.extend(entries);
    map
}
