use brand_site_core::config::Defaults;
use brand_site_core::{About, Error, Result, SiteConfig};
use serde::Deserialize;

use crate::frontmatter::{ContentRecord, scalar_string};
use crate::normalize::{
    ABOUT_EXCERPT_BUDGET, markdown_to_html, markdown_to_text, non_blank, normalize_asset_path,
    truncate,
};
use crate::reader::read_markdown_file;

pub const CONTENT_FILE: &str = "about.md";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AboutFrontmatter {
    #[serde(deserialize_with = "scalar_string")]
    title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    subtitle: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    image: Option<String>,
    #[serde(alias = "image_alt", deserialize_with = "scalar_string")]
    image_alt: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    excerpt: Option<String>,
    #[serde(alias = "cta_text", deserialize_with = "scalar_string")]
    cta_text: Option<String>,
    #[serde(alias = "cta_link", deserialize_with = "scalar_string")]
    cta_link: Option<String>,
}

/// About section used when `about.md` does not exist
pub fn fallback(defaults: &Defaults) -> About {
    About {
        title: defaults.site_name.clone(),
        subtitle: String::new(),
        image: normalize_asset_path(&defaults.about_image),
        image_alt: defaults.site_name.clone(),
        content: String::new(),
        excerpt: String::new(),
        cta_text: defaults.cta_text.clone(),
        cta_link: defaults.cta_link.clone(),
    }
}

/// A missing title is an authoring error, not a skippable record: there is
/// only one about page.
pub fn normalize(record: &ContentRecord, defaults: &Defaults) -> Result<About> {
    let fm: AboutFrontmatter = record.deserialize()?;

    let title = non_blank(fm.title).ok_or_else(|| {
        Error::InvalidData(format!(
            "{}: missing required field 'title'",
            record.source_path.display()
        ))
    })?;

    let excerpt = non_blank(fm.excerpt).unwrap_or_else(|| markdown_to_text(&record.body));

    Ok(About {
        subtitle: non_blank(fm.subtitle).unwrap_or_default(),
        image: normalize_asset_path(
            &non_blank(fm.image).unwrap_or_else(|| defaults.about_image.clone()),
        ),
        image_alt: non_blank(fm.image_alt).unwrap_or_else(|| title.clone()),
        content: markdown_to_html(&record.body),
        excerpt: truncate(&excerpt, ABOUT_EXCERPT_BUDGET),
        cta_text: non_blank(fm.cta_text).unwrap_or_else(|| defaults.cta_text.clone()),
        cta_link: non_blank(fm.cta_link).unwrap_or_else(|| defaults.cta_link.clone()),
        title,
    })
}

pub fn collect(config: &SiteConfig) -> Result<About> {
    let record = read_markdown_file(&config.content_dir().join(CONTENT_FILE))?;
    normalize(&record, &config.defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_about() {
        let record = ContentRecord::parse(
            "about.md",
            "---\ntitle: Über mich\nimage: images/me.jpg\nctaText: Buchen\n---\n\nIch bin **Speakerin**.\n",
        )
        .unwrap();
        let about = normalize(&record, &Defaults::default()).unwrap();

        assert_eq!(about.title, "Über mich");
        assert_eq!(about.subtitle, "");
        assert_eq!(about.image, "/images/me.jpg");
        assert_eq!(about.image_alt, "Über mich");
        assert_eq!(about.content, "<p>Ich bin <strong>Speakerin</strong>.</p>\n");
        assert_eq!(about.excerpt, "Ich bin Speakerin.");
        assert_eq!(about.cta_text, "Buchen");
        assert_eq!(about.cta_link, "/#contact");
    }

    #[test]
    fn test_missing_title_is_error() {
        let record = ContentRecord::parse("about.md", "---\nsubtitle: x\n---\nBody").unwrap();
        let err = normalize(&record, &Defaults::default()).unwrap_err();
        assert!(err.to_string().contains("missing required field 'title'"));
    }

    #[test]
    fn test_fallback_uses_defaults() {
        let about = fallback(&Defaults::default());
        assert_eq!(about.title, "Personal Brand");
        assert_eq!(about.image, "/images/about.jpg");
        assert_eq!(about.content, "");
    }
}
