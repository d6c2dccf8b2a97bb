//! Thin HTTP shell over the search engine: JSON results at `/search`, a
//! minimal HTML page at `/`.

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use seine_search::SearchEngine;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

pub async fn run(engine: SearchEngine, addr: SocketAddr) -> Result<()> {
    let app = Router::new()
        .route("/", get(home))
        .route("/search", get(search))
        .with_state(Arc::new(engine));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "serving query interface");
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
}

async fn search(
    State(engine): State<Arc<SearchEngine>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    match engine.search(&query).await {
        Ok(hits) => Json(hits).into_response(),
        Err(error) => {
            error!(%error, query = %query, "search failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "search failed").into_response()
        }
    }
}

async fn home(
    State(engine): State<Arc<SearchEngine>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let mut page = String::from(
        "<!doctype html><html><head><title>Seine</title></head><body>\
         <h1>Seine</h1>\
         <form action=\"/\" method=\"get\">\
         <input type=\"text\" name=\"q\" size=\"60\">\
         <input type=\"submit\" value=\"Search\">\
         </form>",
    );

    if let Some(query) = params.q.as_deref().filter(|q| !q.trim().is_empty()) {
        match engine.search(query).await {
            Ok(hits) if hits.is_empty() => {
                page.push_str("<p>No results.</p>");
            }
            Ok(hits) => {
                page.push_str("<ol>");
                for hit in &hits {
                    page.push_str(&format!(
                        "<li><a href=\"{url}\">{title}</a> ({score})<br>\
                         <small>{keywords}</small></li>",
                        url = escape(&hit.url),
                        title = escape(&hit.title),
                        score = hit.normalized_score,
                        keywords = escape(&hit.keywords_display()),
                    ));
                }
                page.push_str("</ol>");
            }
            Err(error) => {
                error!(%error, query, "search failed");
                return (StatusCode::INTERNAL_SERVER_ERROR, "search failed").into_response();
            }
        }
    }

    page.push_str("</body></html>");
    Html(page).into_response()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("<b>&\"</b>"), "&lt;b&gt;&amp;&quot;&lt;/b&gt;");
    }
}
