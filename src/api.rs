// src/api.rs
use std::fmt::Write as _;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::enrich::enrich_all;
use crate::ingest::fetch_news;
use crate::ingest::types::{FeedProvider, Labeled, NewsItem};
use crate::models::Models;
use crate::search::semantic_search_at;
use crate::summarize::{strip_html, summarize};
use crate::telemetry::anon_id;

pub const STATIC_DIR: &str = "ui/static";
/// Items shown when a query matches nothing.
pub const FALLBACK_ITEMS: usize = 6;
pub const FALLBACK_MESSAGE: &str = "No directly related news found. Showing top general news.";

#[derive(Clone)]
pub struct AppState {
    pub models: Models,
    pub providers: Arc<Vec<Box<dyn FeedProvider>>>,
    pub per_feed_limit: usize,
}

impl AppState {
    pub fn new(models: Models, providers: Vec<Box<dyn FeedProvider>>, per_feed_limit: usize) -> Self {
        Self {
            models,
            providers: Arc::new(providers),
            per_feed_limit,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/news", get(news_json))
        .route("/", get(news_html))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct NewsQuery {
    #[serde(default)]
    pub q: String,
}

/// One rendered news card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub url: String,
    pub source: String,
    pub date: String,
    pub image: String,
    pub summary: String,
    pub sentiment: Option<Labeled>,
    pub event_type: Option<Labeled>,
    pub relevance: f32,
    pub is_latest: bool,
}

impl From<NewsItem> for Card {
    fn from(it: NewsItem) -> Self {
        Self {
            summary: strip_html(&summarize(&it.summary)),
            title: it.title,
            url: it.url,
            source: it.source,
            date: it.date,
            image: it.image,
            sentiment: it.sentiment,
            event_type: it.event_type,
            relevance: it.relevance,
            is_latest: it.is_latest,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsPage {
    pub query: String,
    pub count: usize,
    pub fallback: bool,
    pub message: Option<String>,
    pub fetched_at: String,
    pub items: Vec<Card>,
}

/// Fetch, rank, and summarize. An empty ranking falls back to the first
/// [`FALLBACK_ITEMS`] fetched items, enriched with the same query.
pub async fn build_page(state: &AppState, query: &str) -> NewsPage {
    let now = time::OffsetDateTime::now_utc();
    let items = fetch_news(&state.providers, state.per_feed_limit).await;
    let ranked = semantic_search_at(&state.models, &items, query, now).await;

    let (fallback, results) = if ranked.is_empty() {
        let head: Vec<NewsItem> = items.into_iter().take(FALLBACK_ITEMS).collect();
        (true, enrich_all(&state.models, head, query, now).await)
    } else {
        (false, ranked)
    };

    tracing::info!(
        target: "api",
        query_id = %anon_id(query),
        results = results.len(),
        fallback,
        "news page built"
    );

    let cards: Vec<Card> = results.into_iter().map(Card::from).collect();
    NewsPage {
        query: query.to_string(),
        count: cards.len(),
        fallback,
        message: fallback.then(|| FALLBACK_MESSAGE.to_string()),
        fetched_at: chrono::Utc::now().to_rfc3339(),
        items: cards,
    }
}

async fn news_json(State(state): State<AppState>, Query(q): Query<NewsQuery>) -> Json<NewsPage> {
    Json(build_page(&state, &q.q).await)
}

async fn news_html(State(state): State<AppState>, Query(q): Query<NewsQuery>) -> Html<String> {
    Html(render_page(&build_page(&state, &q.q).await))
}

fn badge(out: &mut String, class: &str, l: &Option<Labeled>) {
    if let Some(l) = l {
        let _ = write!(
            out,
            r#"<span class="badge {class}">{} ({:.2})</span>"#,
            html_escape::encode_text(&l.label),
            l.score
        );
    }
}

/// Server-rendered card grid. Every interpolated value is escaped.
pub fn render_page(page: &NewsPage) -> String {
    use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

    let mut out = String::with_capacity(4096);
    out.push_str(
        "<!doctype html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>AI-Powered Tech News</title>\
         <link rel=\"stylesheet\" href=\"/static/style.css\"></head><body>\n\
         <h1>AI-Powered Tech News</h1>\n",
    );
    let _ = writeln!(
        out,
        "<form method=\"get\" action=\"/\"><input type=\"text\" name=\"q\" value=\"{}\" \
         placeholder=\"Search news...\"><button type=\"submit\">Search</button></form>",
        attr(&page.query)
    );

    match &page.message {
        Some(msg) => {
            let _ = writeln!(out, "<p class=\"warning\">{}</p>", text(msg));
        }
        None => {
            let _ = writeln!(out, "<p class=\"found\">Found {} related news items</p>", page.count);
        }
    }

    out.push_str("<div class=\"grid\">\n");
    for c in &page.items {
        out.push_str("<div class=\"card\">");
        let _ = write!(
            out,
            "<img src=\"{}\" alt=\"\"><h3><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></h3>",
            attr(&c.image),
            attr(&c.url),
            text(&c.title)
        );
        let _ = write!(
            out,
            "<p class=\"meta\">{} | {}</p>",
            text(&c.source),
            text(&c.date)
        );
        if c.is_latest {
            out.push_str("<span class=\"badge latest\">latest</span>");
        }
        badge(&mut out, "sentiment", &c.sentiment);
        badge(&mut out, "event", &c.event_type);
        let _ = write!(out, "<p class=\"summary\">{}</p>", text(&c.summary));
        out.push_str("</div>\n");
    }
    out.push_str("</div>\n</body></html>\n");
    out
}

/* ---- Tests ---- */
