use brand_site_core::{FALLBACK_LINK, PartnerLogo, Result, SiteConfig};
use serde::Deserialize;

use crate::assemble::{Assembled, Rejected, partition, sort_by_order};
use crate::frontmatter::{ContentRecord, scalar_string};
use crate::normalize::{non_blank, normalize_asset_path, order_from_yaml};
use crate::reader::read_markdown_dir;

pub const CONTENT_DIR: &str = "logos";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LogoFrontmatter {
    #[serde(deserialize_with = "scalar_string")]
    name: Option<String>,
    #[serde(alias = "image", deserialize_with = "scalar_string")]
    logo: Option<String>,
    #[serde(alias = "link", deserialize_with = "scalar_string")]
    url: Option<String>,
    order: Option<serde_yaml::Value>,
}

pub fn normalize(record: &ContentRecord) -> std::result::Result<PartnerLogo, Rejected> {
    let fm: LogoFrontmatter = record
        .deserialize()
        .map_err(|err| Rejected::new(&record.source_path, err.to_string()))?;

    let name =
        non_blank(fm.name).ok_or_else(|| Rejected::missing_field(&record.source_path, "name"))?;
    let logo =
        non_blank(fm.logo).ok_or_else(|| Rejected::missing_field(&record.source_path, "logo"))?;

    Ok(PartnerLogo {
        name,
        logo: normalize_asset_path(&logo),
        url: non_blank(fm.url).unwrap_or_else(|| FALLBACK_LINK.to_string()),
        order: order_from_yaml(fm.order.as_ref()),
    })
}

pub fn collect(config: &SiteConfig) -> Result<Assembled<PartnerLogo>> {
    let records = read_markdown_dir(&config.content_dir().join(CONTENT_DIR))?;
    let results = records.into_iter().map(|r| r.and_then(|record| normalize(&record)));

    let mut assembled = partition(results, "logos");
    sort_by_order(&mut assembled.items, |l| l.order);
    Ok(assembled)
}
