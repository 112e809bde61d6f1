// Dry-run validation of a site project: every local pipeline is built
// without writing, and referenced images are checked on disk.

use brand_site_core::SiteConfig;
use brand_site_generator::content::{logos, press, seo, testimonials};
use brand_site_generator::{ContentKind, build_local};
use serde_json::Value;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

const PLACEHOLDER_FEED_HOST: &str = "example.com";

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate_project(config: &SiteConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut assets = BTreeSet::new();

    for kind in ContentKind::LOCAL {
        match build_local(kind, config) {
            Ok(built) => {
                report
                    .info
                    .push(format!("{}: {} item(s)", kind, built.count));
                for rejected in &built.rejected {
                    report.warnings.push(format!("{}: skipped {}", kind, rejected));
                }
                collect_assets(kind, &built.value, &mut assets);
            }
            Err(err) if kind.is_fatal() && !err.is_source_missing() => {
                report.errors.push(format!("{}: {}", kind, err));
            }
            Err(err) => {
                report
                    .warnings
                    .push(format!("{}: fallback will be written ({})", kind, err));
            }
        }
    }

    check_assets(&config.public_dir(), &assets, &mut report);
    report_ignored_files(&config.content_dir(), &mut report);

    if config.feed.url.contains(PLACEHOLDER_FEED_HOST) {
        report.warnings.push(format!(
            "feed: url '{}' looks like a placeholder",
            config.feed.url
        ));
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validation finished"
    );
    report
}

/// Site-relative image paths referenced by one pipeline's output
fn collect_assets(kind: ContentKind, value: &Value, assets: &mut BTreeSet<String>) {
    let mut push = |v: &Value| {
        if let Some(path) = v.as_str()
            && path.starts_with('/')
            && !path.starts_with("//")
        {
            assets.insert(path.to_string());
        }
    };

    match kind {
        ContentKind::About => push(&value["image"]),
        ContentKind::Testimonials | ContentKind::Press => {
            for item in value.as_array().into_iter().flatten() {
                push(&item["image"]);
            }
        }
        ContentKind::Logos => {
            for item in value.as_array().into_iter().flatten() {
                push(&item["logo"]);
            }
        }
        ContentKind::Seo => {
            for entry in value.as_object().into_iter().flat_map(|m| m.values()) {
                push(&entry["ogImage"]);
            }
        }
        ContentKind::Stats | ContentKind::Feed => {}
    }
}

fn check_assets(public_dir: &Path, assets: &BTreeSet<String>, report: &mut ValidationReport) {
    for asset in assets {
        let path = public_dir.join(asset.trim_start_matches('/'));
        if !path.is_file() {
            report
                .warnings
                .push(format!("missing asset: {} (expected at {})", asset, path.display()));
            continue;
        }

        let is_raster = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| RASTER_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if !is_raster {
            continue;
        }

        match image::image_dimensions(&path) {
            Ok((width, height)) => report
                .info
                .push(format!("asset {}: {}x{}", asset, width, height)),
            Err(err) => report
                .errors
                .push(format!("unreadable image {}: {}", asset, err)),
        }
    }
}

/// Non-Markdown files in content folders are silently ignored by the
/// pipelines; surface them so authors notice typos like `.markdown`.
fn report_ignored_files(content_dir: &Path, report: &mut ValidationReport) {
    for dir in [
        testimonials::CONTENT_DIR,
        press::CONTENT_DIR,
        logos::CONTENT_DIR,
        seo::CONTENT_DIR,
    ] {
        for entry in WalkDir::new(content_dir.join(dir))
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .flatten()
        {
            let path = entry.path();
            let is_md = path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("md"))
                .unwrap_or(false);
            if entry.file_type().is_file() && !is_md {
                report
                    .info
                    .push(format!("ignored file: {}", path.display()));
            }
        }
    }
}
