use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use brand_site_core::{SiteConfig, load_site_config};
use brand_site_feed::{FeedSource, HttpFeedSource, live_feed_response};
use brand_site_generator::ContentKind;
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::generate::generate;

pub const FEED_ROUTE: &str = "/api/getFunkeFeed";
pub const NETLIFY_FEED_ROUTE: &str = "/.netlify/functions/getFunkeFeed";

#[derive(Clone)]
struct AppState {
    config: Arc<SiteConfig>,
    feed: Arc<dyn FeedSource>,
}

/// Start the local server.
///
/// Generates all data once, serves `public/` and the live feed endpoint,
/// and regenerates whenever files under the content directory change.
pub async fn run(path: PathBuf, port: u16) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!(
            "Project directory does not exist: {}\nRun 'brand-site init {}' first",
            path.display(),
            path.display()
        );
    }

    let config = Arc::new(
        load_site_config(&path)
            .with_context(|| format!("Failed to load site.toml in {}", path.display()))?,
    );
    let feed: Arc<dyn FeedSource> = Arc::new(
        HttpFeedSource::new(config.feed.url.clone()).context("Failed to build feed client")?,
    );

    println!("Starting server for {}", path.display());
    if let Err(err) = generate(&config, &ContentKind::ALL, feed.as_ref()).await {
        tracing::warn!(error = %format!("{:#}", err), "initial generation failed");
    }

    let content_dir = config.content_dir();
    std::fs::create_dir_all(&content_dir)
        .with_context(|| format!("Failed to create {}", content_dir.display()))?;

    let watcher_config = config.clone();
    let watcher_feed = feed.clone();
    tokio::spawn(async move {
        if let Err(e) = watch_content(content_dir, watcher_config, watcher_feed).await {
            tracing::error!(error = %e, "file watcher stopped");
        }
    });

    let app = router(config, feed);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("   ✓ Serving at http://{}", addr);
    println!("   ✓ Live feed at http://{}{}", addr, FEED_ROUTE);
    println!("\n   Press Ctrl+C to stop");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Routes for the live feed endpoint, with `public/` as the fallback
pub fn router(config: Arc<SiteConfig>, feed: Arc<dyn FeedSource>) -> Router {
    let public_dir = config.public_dir();
    Router::new()
        .route(FEED_ROUTE, get(feed_handler))
        .route(NETLIFY_FEED_ROUTE, get(feed_handler))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { config, feed })
}

async fn feed_handler(State(state): State<AppState>) -> Response {
    let response = live_feed_response(state.feed.as_ref(), &state.config.feed).await;
    let status =
        StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(response.body),
    )
        .into_response()
}

/// Regenerate every pipeline after content changes
async fn watch_content(
    content_dir: PathBuf,
    config: Arc<SiteConfig>,
    feed: Arc<dyn FeedSource>,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;
    watcher.watch(&content_dir, RecursiveMode::Recursive)?;

    while let Some(event) = rx.recv().await {
        if !is_content_change(&event) {
            continue;
        }
        // One save usually fires several events
        while rx.try_recv().is_ok() {}

        println!("   📝 Content changed, regenerating...");
        if let Err(err) = generate(&config, &ContentKind::ALL, feed.as_ref()).await {
            tracing::warn!(error = %format!("{:#}", err), "regeneration failed");
        }
    }

    Ok(())
}

fn is_content_change(event: &NotifyEvent) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| {
        let filename = p.file_name().unwrap_or_default().to_string_lossy();
        !filename.starts_with('.') && !filename.ends_with('~')
    })
}
