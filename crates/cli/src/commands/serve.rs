use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri, header},
    response::{
        Html, IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::get,
};
use chrono::Utc;
use inkpress_client::{WorkspaceSource, load_workspace};
use inkpress_core::{Route, SiteConfig, build_sitemap};
use inkpress_generator::{PageStatus, RenderOptions, render_route, render_sitemap_xml, site_locale};
use notify::{Event as NotifyEvent, EventKind, RecursiveMode, Watcher};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use super::{load_site_config, workspace_source};

#[derive(Clone)]
pub struct AppState {
    source: Arc<dyn WorkspaceSource>,
    config: Arc<SiteConfig>,
    live_reload: bool,
    reload_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(source: Arc<dyn WorkspaceSource>, config: SiteConfig, live_reload: bool) -> Self {
        let (reload_tx, _) = broadcast::channel::<()>(100);
        Self {
            source,
            config: Arc::new(config),
            live_reload,
            reload_tx,
        }
    }
}

/// Serve the site, rendering every request from a fresh workspace fetch.
///
/// This command:
/// - Validates and loads site.toml
/// - Serves the catch-all route surface and /sitemap.xml
/// - With a JSON snapshot, watches the site directory and the snapshot and
///   triggers hot reload in open browsers
pub async fn run(path: PathBuf, port: u16, from_json: Option<PathBuf>) -> Result<()> {
    println!("📰 Starting preview server...");
    println!("   Site: {}", path.display());

    let config = load_site_config(&path)?;
    println!("   ✓ Workspace: {}", config.api.workspace_id);

    let mut watch_paths = vec![path.clone()];
    if let Some(snapshot) = &from_json {
        println!("   ✓ Snapshot: {}", snapshot.display());
        watch_paths.push(snapshot.clone());
    }

    let live_reload = from_json.is_some();
    let source = workspace_source(&config, from_json)?;
    let state = AppState::new(source, config, live_reload);

    if live_reload {
        let watcher_tx = state.reload_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_files(watch_paths, watcher_tx).await {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let app = router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("\n🚀 Preview ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Routes: the reload stream, the sitemap, and a catch-all for pages
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/_reload", get(sse_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Watch for file changes and trigger reload
async fn watch_files(paths: Vec<PathBuf>, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut watcher =
        notify::recommended_watcher(move |res: Result<NotifyEvent, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })?;

    for path in &paths {
        watcher.watch(path, RecursiveMode::Recursive)?;
    }

    while let Some(event) = rx.recv().await {
        match event.kind {
            EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_) => {
                // Filter out temporary files and hidden files
                if event.paths.iter().any(|p| {
                    let filename = p.file_name().unwrap_or_default().to_string_lossy();
                    !filename.starts_with('.') && !filename.ends_with('~')
                }) {
                    println!("   📝 File changed, reloading...");
                    let _ = reload_tx.send(());
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// SSE endpoint for hot reload
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    let mut rx = state.reload_tx.subscribe();

    let stream = async_stream::stream! {
        loop {
            if rx.recv().await.is_ok() {
                yield Ok(Event::default().data("reload"));
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn sitemap_handler(State(state): State<AppState>) -> Response {
    let data = load_workspace(state.source.as_ref()).await;
    let entries = build_sitemap(data.as_ref(), &state.config.site.url, Utc::now());
    (
        [(header::CONTENT_TYPE, "application/xml")],
        render_sitemap_xml(&entries),
    )
        .into_response()
}

/// Catch-all page handler
async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let route = Route::from_path(uri.path());
    tracing::debug!(path = uri.path(), ?route, "Rendering");

    let data = load_workspace(state.source.as_ref()).await;
    let options = RenderOptions {
        locale: site_locale(data.as_ref(), &state.config),
        live_reload: state.live_reload,
    };
    let page = render_route(data.as_ref(), &route, options);

    let status = match page.status {
        PageStatus::Ok => StatusCode::OK,
        PageStatus::NotFound => StatusCode::NOT_FOUND,
        PageStatus::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Html(page.html)).into_response()
}
