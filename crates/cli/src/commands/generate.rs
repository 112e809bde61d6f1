use anyhow::{Context, Result};
use brand_site_core::{SiteConfig, load_site_config};
use brand_site_feed::{FeedSource, HttpFeedSource};
use brand_site_generator::{ContentKind, PipelineReport, run_pipeline};
use std::path::PathBuf;

/// Generate the frontend JSON files for the given pipelines
pub async fn run(project: PathBuf, kinds: &[ContentKind]) -> Result<()> {
    if !project.is_dir() {
        anyhow::bail!(
            "Project directory does not exist: {}\nRun 'brand-site init {}' first",
            project.display(),
            project.display()
        );
    }

    let config = load_site_config(&project)
        .with_context(|| format!("Failed to load site.toml in {}", project.display()))?;
    let feed = HttpFeedSource::new(config.feed.url.clone()).context("Failed to build feed client")?;

    println!("Generating content for {}", project.display());
    let reports = generate(&config, kinds, &feed).await?;

    for report in &reports {
        match &report.fallback_reason {
            Some(reason) => println!("  ⚠ {:<13} fallback ({})", report.kind, reason),
            None => println!("  ✓ {:<13} {} item(s)", report.kind, report.count),
        }
        for rejected in &report.rejected {
            println!("      skipped {}", rejected);
        }
    }
    println!("Output: {}", config.output_dir().display());

    Ok(())
}

/// Run pipelines in order. Non-fatal failures are logged and the run
/// continues; the first fatal failure is returned after all pipelines ran.
pub async fn generate(
    config: &SiteConfig,
    kinds: &[ContentKind],
    feed: &dyn FeedSource,
) -> Result<Vec<PipelineReport>> {
    let mut reports = Vec::with_capacity(kinds.len());
    let mut fatal = None;

    for &kind in kinds {
        match run_pipeline(kind, config, feed).await {
            Ok(report) => reports.push(report),
            Err(err) if err.is_fatal() => {
                tracing::error!(%kind, error = %err, "pipeline failed");
                fatal.get_or_insert(err);
            }
            Err(err) => {
                tracing::warn!(%kind, error = %err, "pipeline failed, continuing");
            }
        }
    }

    match fatal {
        Some(err) => Err(err).context("Content generation failed"),
        None => Ok(reports),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn write(root: &std::path::Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    async fn unavailable_feed() -> (MockServer, HttpFeedSource) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let source = HttpFeedSource::new(format!("{}/feed.xml", server.uri())).unwrap();
        (server, source)
    }

    #[tokio::test]
    async fn test_generate_all_on_empty_project_writes_every_file() {
        let dir = TempDir::new().unwrap();
        let config = SiteConfig::with_root(dir.path());
        let (_server, feed) = unavailable_feed().await;

        let reports = generate(&config, &ContentKind::ALL, &feed).await.unwrap();
        assert_eq!(reports.len(), ContentKind::ALL.len());
        for kind in ContentKind::ALL {
            assert!(config.output_dir().join(kind.output_file()).is_file());
        }
    }

    #[tokio::test]
    async fn test_fatal_pipeline_fails_but_others_still_run() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "content/about.md", "---\nsubtitle: no title\n---\n");
        let config = SiteConfig::with_root(dir.path());
        let (_server, feed) = unavailable_feed().await;

        let kinds = [ContentKind::About, ContentKind::Logos];
        let err = generate(&config, &kinds, &feed).await.unwrap_err();
        assert!(err.to_string().contains("Content generation failed"));
        assert!(!config.output_dir().join("about.json").exists());
        assert!(config.output_dir().join("partner-logos.json").exists());
    }

    #[tokio::test]
    async fn test_run_rejects_missing_project() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(run(missing, &[ContentKind::Stats]).await.is_err());
    }
}
