use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "site.toml";

/// Validated site configuration passed explicitly into every pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Project root; all configured paths are relative to it
    pub root: PathBuf,
    pub paths: PathsConfig,
    pub defaults: Defaults,
    pub seo: SeoDefaults,
    pub feed: FeedConfig,
}

/// Content and output locations, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub public_dir: PathBuf,
}

/// Fallback values substituted when content omits them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    pub site_name: String,
    pub about_image: String,
    pub testimonial_image: Option<String>,
    pub press_image: String,
    pub cta_text: String,
    pub cta_link: String,
}

/// Site-wide SEO fallbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoDefaults {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: String,
    pub site_url: String,
}

/// External news feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub source_name: String,
    /// Items returned by the live endpoint
    pub api_limit: usize,
    /// Items stored in the build-time cache
    pub cache_limit: usize,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("public/data"),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            site_name: "Personal Brand".to_string(),
            about_image: "/images/about.jpg".to_string(),
            testimonial_image: None,
            press_image: "/images/press-placeholder.jpg".to_string(),
            cta_text: "Kontakt aufnehmen".to_string(),
            cta_link: "/#contact".to_string(),
        }
    }
}

impl Default for SeoDefaults {
    fn default() -> Self {
        Self {
            title: "Speaker, Autor & Coach".to_string(),
            description: "Vorträge, Bücher und Coaching für Menschen und Organisationen im Wandel."
                .to_string(),
            keywords: vec![
                "Speaker".to_string(),
                "Autor".to_string(),
                "Coach".to_string(),
            ],
            og_image: "/images/og-image.jpg".to_string(),
            site_url: "https://example.com".to_string(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "https://example.com/feed.xml".to_string(),
            source_name: "FUNKE Mediengruppe".to_string(),
            api_limit: 10,
            cache_limit: 20,
        }
    }
}

impl SiteConfig {
    /// Built-in configuration rooted at `root`
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            paths: PathsConfig::default(),
            defaults: Defaults::default(),
            seo: SeoDefaults::default(),
            feed: FeedConfig::default(),
        }
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.paths.content_dir)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.paths.output_dir)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join(&self.paths.public_dir)
    }
}

/// Raw TOML configuration structure
/// Every section is optional; missing values fall back to the built-in defaults
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    paths: RawPaths,
    #[serde(default)]
    defaults: RawDefaults,
    #[serde(default)]
    seo: RawSeo,
    #[serde(default)]
    feed: RawFeed,
}

#[derive(Debug, Default, Deserialize)]
struct RawPaths {
    content_dir: Option<String>,
    output_dir: Option<String>,
    public_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDefaults {
    site_name: Option<String>,
    about_image: Option<String>,
    testimonial_image: Option<String>,
    press_image: Option<String>,
    cta_text: Option<String>,
    cta_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSeo {
    title: Option<String>,
    description: Option<String>,
    keywords: Option<Vec<String>>,
    og_image: Option<String>,
    site_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFeed {
    url: Option<String>,
    source_name: Option<String>,
    api_limit: Option<usize>,
    cache_limit: Option<usize>,
}

/// Load `site.toml` from a project directory, or the built-in defaults if the
/// file does not exist
pub fn load_site_config<P: AsRef<Path>>(project_dir: P) -> Result<SiteConfig> {
    let project_dir = project_dir.as_ref();
    let path = project_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(SiteConfig::with_root(project_dir));
    }
    let content = fs::read_to_string(&path)?;
    parse_site_toml_str(&content, project_dir)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str<P: Into<PathBuf>>(content: &str, root: P) -> Result<SiteConfig> {
    let raw: RawConfig = toml::from_str(content)?;
    let mut config = SiteConfig::with_root(root);

    if let Some(dir) = raw.paths.content_dir {
        config.paths.content_dir = validate_path(&dir, "paths.content_dir")?;
    }
    if let Some(dir) = raw.paths.output_dir {
        config.paths.output_dir = validate_path(&dir, "paths.output_dir")?;
    }
    if let Some(dir) = raw.paths.public_dir {
        config.paths.public_dir = validate_path(&dir, "paths.public_dir")?;
    }

    let defaults = &mut config.defaults;
    if let Some(v) = raw.defaults.site_name {
        defaults.site_name = v;
    }
    if let Some(v) = raw.defaults.about_image {
        defaults.about_image = v;
    }
    if raw.defaults.testimonial_image.is_some() {
        defaults.testimonial_image = raw.defaults.testimonial_image;
    }
    if let Some(v) = raw.defaults.press_image {
        defaults.press_image = v;
    }
    if let Some(v) = raw.defaults.cta_text {
        defaults.cta_text = v;
    }
    if let Some(v) = raw.defaults.cta_link {
        defaults.cta_link = v;
    }

    let seo = &mut config.seo;
    if let Some(v) = raw.seo.title {
        seo.title = v;
    }
    if let Some(v) = raw.seo.description {
        seo.description = v;
    }
    if let Some(v) = raw.seo.keywords {
        seo.keywords = v;
    }
    if let Some(v) = raw.seo.og_image {
        seo.og_image = v;
    }
    if let Some(v) = raw.seo.site_url {
        seo.site_url = v.trim_end_matches('/').to_string();
    }

    let feed = &mut config.feed;
    if let Some(url) = raw.feed.url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::ConfigParse(format!(
                "feed.url must be an http(s) URL, got '{}'",
                url
            )));
        }
        feed.url = url;
    }
    if let Some(v) = raw.feed.source_name {
        feed.source_name = v;
    }
    if let Some(limit) = raw.feed.api_limit {
        feed.api_limit = validate_limit(limit, "feed.api_limit")?;
    }
    if let Some(limit) = raw.feed.cache_limit {
        feed.cache_limit = validate_limit(limit, "feed.cache_limit")?;
    }

    Ok(config)
}

fn validate_limit(limit: usize, field_name: &str) -> Result<usize> {
    if limit == 0 {
        return Err(Error::ConfigParse(format!(
            "'{}' must be greater than zero",
            field_name
        )));
    }
    Ok(limit)
}

/// Validate and convert a path string to PathBuf.
///
/// Configured directories must stay inside the project, so this rejects:
/// - Absolute paths (starting with `/` or Windows drive letters)
/// - Paths containing parent directory references (`..`)
/// - Empty paths
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    Ok(path.to_path_buf())
}
