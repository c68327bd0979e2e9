//! Dev/preview server
//!
//! Serves the generated site, resolves post pages missing from the
//! static set against the content API on first request, and hosts the
//! preview-mode session. Post pages get the comment widget script
//! attached at serve time, keyed by post uid.

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::services::ServeDir;

use crate::comments::Mount;
use crate::content::loader::PostLoader;
use crate::generator::Generator;
use crate::helpers::inject_before_body_end;
use crate::Starlog;

/// Server state
struct ServerState {
    app: Starlog,
    generator: Generator,
    /// Preview ref of the active preview session, if any
    preview_ref: RwLock<Option<String>>,
    /// Comment widget attachment, at most one script node at a time
    mount: Mutex<Mount>,
}

/// Start the server
pub async fn start(app: &Starlog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        app: app.clone(),
        generator: Generator::new(app)?,
        preview_ref: RwLock::new(None),
        mount: Mutex::new(Mount::new(app.config.comments.clone())),
    });

    let router = Router::new()
        .route("/api/preview", get(preview_handler))
        .route("/api/exit-preview", get(exit_preview_handler))
        .fallback(fallback_handler)
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

#[derive(Deserialize)]
struct PreviewParams {
    token: String,
    slug: String,
}

/// Enter preview mode: store the preview ref and redirect to the post
async fn preview_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<PreviewParams>,
) -> Redirect {
    tracing::info!("Preview session started for {}", params.slug);
    *state.preview_ref.write().await = Some(params.token);
    Redirect::temporary(&format!("/post/{}/", params.slug))
}

/// Leave preview mode: clear the session and redirect to the site root
async fn exit_preview_handler(State(state): State<Arc<ServerState>>) -> Redirect {
    if state.preview_ref.write().await.take().is_some() {
        tracing::info!("Preview session cleared");
    }
    Redirect::temporary("/")
}

/// Fallback handler: post pages get widget attachment and on-demand
/// rendering; everything else is served from the public directory
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    if let Some(uid) = post_uid_from_path(&path) {
        return serve_post(&state, &uid).await;
    }

    let mut service = ServeDir::new(&state.app.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Serve a post page, attaching the comment widget for its uid
async fn serve_post(state: &Arc<ServerState>, uid: &str) -> Response {
    let preview_ref = state.preview_ref.read().await.clone();
    let page_path = state
        .app
        .public_dir
        .join("post")
        .join(uid)
        .join("index.html");

    let html = if preview_ref.is_none() && page_path.exists() {
        match tokio::fs::read_to_string(&page_path).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to read {:?}: {}", page_path, e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
            }
        }
    } else {
        // Not in the pre-rendered set (or previewing a draft revision):
        // resolve against the content API on this request.
        match render_on_demand(state, uid, preview_ref.as_deref()).await {
            Ok(Some(html)) => html,
            Ok(None) => return (StatusCode::NOT_FOUND, "Not found").into_response(),
            Err(e) => {
                tracing::error!("Failed to render post {}: {}", uid, e);
                return (StatusCode::BAD_GATEWAY, "Content source unavailable").into_response();
            }
        }
    };

    if !state.app.config.comments.is_enabled() {
        return Html(html).into_response();
    }

    // Attach the widget for this post; whatever script node the previous
    // post left behind is removed first.
    let script = state.mount.lock().await.attach(uid).html.clone();
    Html(inject_before_body_end(&html, &script)).into_response()
}

/// Render a post straight from the content API
///
/// Published posts rendered this way are persisted into the public
/// directory so later requests are static; preview renders are not.
async fn render_on_demand(
    state: &Arc<ServerState>,
    uid: &str,
    preview_ref: Option<&str>,
) -> Result<Option<String>> {
    let client = state.app.cms_client();
    let loader = PostLoader::new(&client, &state.app.config);

    let Some(post) = loader.resolve(uid, preview_ref).await? else {
        return Ok(None);
    };
    let (previous, next) = loader.neighbors(&post).await?;

    let preview = preview_ref.is_some();
    let html = state
        .generator
        .render_post_page(&post, previous.as_ref(), next.as_ref(), preview)?;

    if !preview {
        let page_path = state
            .app
            .public_dir
            .join("post")
            .join(uid)
            .join("index.html");
        if let Some(parent) = page_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&page_path, &html)?;
        tracing::info!("Rendered fallback page for {}", uid);
    }

    Ok(Some(html))
}

/// Extract a post uid from a request path like `/post/<uid>/`
fn post_uid_from_path(path: &str) -> Option<String> {
    let rest = path.strip_prefix("/post/")?;
    let uid = rest
        .trim_end_matches('/')
        .trim_end_matches("index.html")
        .trim_end_matches('/');
    if uid.is_empty() || uid.contains('/') || uid.contains('.') {
        None
    } else {
        Some(uid.to_string())
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
