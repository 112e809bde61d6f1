use brand_site_core::SiteConfig;
use brand_site_feed::{FeedError, FeedSource};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::assemble::{Assembled, Rejected};
use crate::content::{about, feed, logos, press, seo, stats, testimonials};
use crate::emit::JsonEmitter;

/// The independent content pipelines, one output file each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    About,
    Testimonials,
    Press,
    Logos,
    Seo,
    Stats,
    Feed,
}

impl ContentKind {
    pub const ALL: [ContentKind; 7] = [
        ContentKind::About,
        ContentKind::Testimonials,
        ContentKind::Press,
        ContentKind::Logos,
        ContentKind::Seo,
        ContentKind::Stats,
        ContentKind::Feed,
    ];

    /// Pipelines that read only local content
    pub const LOCAL: [ContentKind; 6] = [
        ContentKind::About,
        ContentKind::Testimonials,
        ContentKind::Press,
        ContentKind::Logos,
        ContentKind::Seo,
        ContentKind::Stats,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContentKind::About => "about",
            ContentKind::Testimonials => "testimonials",
            ContentKind::Press => "press",
            ContentKind::Logos => "logos",
            ContentKind::Seo => "seo",
            ContentKind::Stats => "stats",
            ContentKind::Feed => "feed",
        }
    }

    pub fn output_file(self) -> &'static str {
        match self {
            ContentKind::About => "about.json",
            ContentKind::Testimonials => "testimonials.json",
            ContentKind::Press => "press.json",
            ContentKind::Logos => "partner-logos.json",
            ContentKind::Seo => "seo.json",
            ContentKind::Stats => "social-stats.json",
            ContentKind::Feed => "feed.json",
        }
    }

    /// Structural errors in these pipelines fail the build
    pub fn is_fatal(self) -> bool {
        matches!(self, ContentKind::About | ContentKind::Press)
    }

    /// What gets written when the source is unavailable
    pub fn fallback(self, config: &SiteConfig) -> Value {
        match self {
            ContentKind::About => to_json(&about::fallback(&config.defaults)),
            ContentKind::Seo => to_json(&seo::default_map(&config.seo)),
            _ => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Content(#[from] brand_site_core::Error),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error("{0} needs a feed source")]
    NeedsFeedSource(ContentKind),
}

impl BuildError {
    pub fn is_source_missing(&self) -> bool {
        matches!(self, BuildError::Content(err) if err.is_not_found())
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{kind} pipeline failed: {source}")]
    Fatal {
        kind: ContentKind,
        #[source]
        source: BuildError,
    },
    #[error("{kind} pipeline could not write {file}: {source}")]
    Emit {
        kind: ContentKind,
        file: &'static str,
        #[source]
        source: brand_site_core::Error,
    },
}

impl PipelineError {
    pub fn kind(&self) -> ContentKind {
        match self {
            PipelineError::Fatal { kind, .. } | PipelineError::Emit { kind, .. } => *kind,
        }
    }

    /// Whether the build as a whole should fail
    pub fn is_fatal(&self) -> bool {
        match self {
            PipelineError::Fatal { .. } => true,
            PipelineError::Emit { kind, .. } => kind.is_fatal(),
        }
    }
}

/// Output of one pipeline before it is written
#[derive(Debug, Clone, PartialEq)]
pub struct Built {
    pub value: Value,
    pub count: usize,
    pub rejected: Vec<Rejected>,
}

impl Built {
    fn from_assembled<T: Serialize>(assembled: Assembled<T>) -> Self {
        Self {
            count: assembled.items.len(),
            value: to_json(&assembled.items),
            rejected: assembled.rejected,
        }
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub kind: ContentKind,
    pub output: PathBuf,
    pub count: usize,
    pub rejected: Vec<Rejected>,
    /// Set when the fallback was written instead of real content
    pub fallback_reason: Option<String>,
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Value {
    // Serializing plain data structs with string keys cannot fail
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Build a local pipeline's output without writing anything
pub fn build_local(kind: ContentKind, config: &SiteConfig) -> Result<Built, BuildError> {
    let built = match kind {
        ContentKind::About => Built {
            value: to_json(&about::collect(config)?),
            count: 1,
            rejected: Vec::new(),
        },
        ContentKind::Testimonials => Built::from_assembled(testimonials::collect(config)?),
        ContentKind::Press => Built::from_assembled(press::collect(config)?),
        ContentKind::Logos => Built::from_assembled(logos::collect(config)?),
        ContentKind::Seo => {
            let assembled = seo::collect(config)?;
            let map = seo::into_map(assembled.items, &config.seo);
            Built {
                count: map.len(),
                value: to_json(&map),
                rejected: assembled.rejected,
            }
        }
        ContentKind::Stats => Built::from_assembled(stats::collect(config)?),
        ContentKind::Feed => return Err(BuildError::NeedsFeedSource(kind)),
    };
    Ok(built)
}

pub async fn build(
    kind: ContentKind,
    config: &SiteConfig,
    feed_source: &dyn FeedSource,
) -> Result<Built, BuildError> {
    match kind {
        ContentKind::Feed => {
            let items = feed::collect(config, feed_source).await?;
            Ok(Built {
                count: items.len(),
                value: to_json(&items),
                rejected: Vec::new(),
            })
        }
        _ => build_local(kind, config),
    }
}

/// Run one pipeline end to end and write its output file.
///
/// A missing source always degrades to the fallback output. Any other build
/// error is fatal for about/press and degrades to the fallback elsewhere.
pub async fn run_pipeline(
    kind: ContentKind,
    config: &SiteConfig,
    feed_source: &dyn FeedSource,
) -> Result<PipelineReport, PipelineError> {
    let emitter = JsonEmitter::new(config.output_dir());
    let file = kind.output_file();

    let (value, count, rejected, fallback_reason) = match build(kind, config, feed_source).await {
        Ok(built) => (built.value, built.count, built.rejected, None),
        Err(err) if err.is_source_missing() => {
            tracing::warn!(%kind, error = %err, "content source missing, writing fallback");
            (kind.fallback(config), 0, Vec::new(), Some(err.to_string()))
        }
        Err(err) if kind.is_fatal() => {
            return Err(PipelineError::Fatal { kind, source: err });
        }
        Err(err) => {
            tracing::warn!(%kind, error = %err, "pipeline failed, writing fallback");
            (kind.fallback(config), 0, Vec::new(), Some(err.to_string()))
        }
    };

    let output = emitter
        .write(file, &value)
        .map_err(|source| PipelineError::Emit { kind, file, source })?;

    tracing::info!(
        %kind,
        items = count,
        skipped = rejected.len(),
        output = %output.display(),
        "generated"
    );

    Ok(PipelineReport {
        kind,
        output,
        count,
        rejected,
        fallback_reason,
    })
}
