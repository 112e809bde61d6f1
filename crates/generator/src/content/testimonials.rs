use brand_site_core::config::Defaults;
use brand_site_core::{Result, SiteConfig, Testimonial};
use serde::Deserialize;

use crate::assemble::{Assembled, Rejected, partition, sort_by_order};
use crate::frontmatter::{ContentRecord, scalar_string};
use crate::normalize::{non_blank, normalize_optional_asset, order_from_yaml};
use crate::reader::read_markdown_dir;

pub const CONTENT_DIR: &str = "testimonials";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TestimonialFrontmatter {
    #[serde(deserialize_with = "scalar_string")]
    author: Option<String>,
    #[serde(alias = "role", deserialize_with = "scalar_string")]
    position: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    company: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    quote: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    image: Option<String>,
    order: Option<serde_yaml::Value>,
}

/// The quote comes from the `quote` field, or from the body when that is absent.
pub fn normalize(record: &ContentRecord, defaults: &Defaults) -> std::result::Result<Testimonial, Rejected> {
    let fm: TestimonialFrontmatter = record
        .deserialize()
        .map_err(|err| Rejected::new(&record.source_path, err.to_string()))?;

    let author = non_blank(fm.author)
        .ok_or_else(|| Rejected::missing_field(&record.source_path, "author"))?;
    let quote = non_blank(fm.quote)
        .or_else(|| non_blank(Some(record.body.clone())))
        .ok_or_else(|| Rejected::missing_field(&record.source_path, "quote"))?;

    Ok(Testimonial {
        author,
        position: non_blank(fm.position),
        company: non_blank(fm.company),
        quote,
        image: normalize_optional_asset(non_blank(fm.image).or_else(|| defaults.testimonial_image.clone())),
        order: order_from_yaml(fm.order.as_ref()),
    })
}

/// Testimonials sorted by ascending `order`
pub fn collect(config: &SiteConfig) -> Result<Assembled<Testimonial>> {
    let records = read_markdown_dir(&config.content_dir().join(CONTENT_DIR))?;
    let results = records
        .into_iter()
        .map(|r| r.and_then(|record| normalize(&record, &config.defaults)));

    let mut assembled = partition(results, "testimonials");
    sort_by_order(&mut assembled.items, |t| t.order);
    Ok(assembled)
}
