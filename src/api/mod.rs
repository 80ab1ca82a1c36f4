//! JSON-over-HTTP front end. Handlers only translate between requests and
//! [`Session`] calls.

use std::path::PathBuf;

use actix_web::{HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

use crate::document::parser::load_documents_lenient;
use crate::engine::{DateRange, SearchResult};
use crate::session::{Session, Stats};
use crate::summarizer;

const SNIPPET_CHARS: usize = 150;

pub struct AppState {
    pub session: Session,
    /// Directory re-read by `/reload`.
    pub data_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub author: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub score: f64,
    pub snippet: String,
}

impl From<&SearchResult> for SearchHit {
    fn from(result: &SearchResult) -> Self {
        let doc = &result.document;
        let mut snippet: String = doc.content.chars().take(SNIPPET_CHARS).collect();
        if doc.content.chars().nth(SNIPPET_CHARS).is_some() {
            snippet.push_str("...");
        }
        SearchHit {
            id: doc.id.clone(),
            title: doc.title.clone(),
            author: doc.author.clone(),
            date: doc.date.clone(),
            category: doc.category.clone(),
            score: result.score,
            snippet,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub content: Option<String>,
    pub ids: Option<Vec<String>>,
    pub sentence_count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub available: bool,
}

fn error_body(message: impl ToString) -> serde_json::Value {
    json!({ "error": message.to_string() })
}

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("News Search API")
}

#[post("/search")]
async fn search(request: web::Json<SearchRequest>, state: web::Data<AppState>) -> HttpResponse {
    let range = match DateRange::parse(request.from_date.as_deref(), request.to_date.as_deref()) {
        Ok(range) => range,
        Err(err) => {
            warn!(error = %err, "rejected search request");
            return HttpResponse::BadRequest().json(error_body(err));
        }
    };
    let limit = request.limit.unwrap_or(state.session.config().top_k);

    let hits: Vec<SearchHit> = state
        .session
        .search_in(&request.query, &range, limit)
        .iter()
        .map(SearchHit::from)
        .collect();
    HttpResponse::Ok().json(hits)
}

#[get("/documents/{id}")]
async fn document(path: web::Path<String>, state: web::Data<AppState>) -> HttpResponse {
    let id = path.into_inner();
    match state.session.document(&id) {
        Some(doc) => HttpResponse::Ok().json(&*doc),
        None => HttpResponse::NotFound().json(error_body(format!("no document `{id}`"))),
    }
}

#[post("/summarize")]
async fn summarize(request: web::Json<SummarizeRequest>, state: web::Data<AppState>) -> HttpResponse {
    let session = &state.session;
    let sentence_count = request
        .sentence_count
        .unwrap_or(session.config().summary_sentences);

    let summary = match (&request.content, &request.ids) {
        (Some(content), _) => summarizer::extract(content, sentence_count, session.normalizer()),
        (None, Some(ids)) => session.summarize_documents(ids, sentence_count),
        (None, None) => {
            return HttpResponse::BadRequest().json(error_body("either `content` or `ids` is required"));
        }
    };

    HttpResponse::Ok().json(SummarizeResponse {
        available: summary.is_available(),
        summary: summary.to_string(),
    })
}

#[get("/stats")]
async fn stats(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.session.stats())
}

#[post("/reload")]
async fn reload(state: web::Data<AppState>) -> HttpResponse {
    let worker_state = state.clone();
    let outcome = web::block(move || -> crate::Result<Stats> {
        let (corpus, _rejected) = load_documents_lenient(&worker_state.data_dir)?;
        Ok(worker_state.session.reload(corpus))
    })
    .await;

    match outcome {
        Ok(Ok(reloaded)) => HttpResponse::Ok().json(reloaded),
        Ok(Err(err)) => {
            error!(error = %err, "reload failed");
            HttpResponse::InternalServerError().json(error_body(err))
        }
        Err(err) => {
            error!(error = %err, "reload worker failed");
            HttpResponse::InternalServerError().json(error_body(err))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(hello)
        .service(search)
        .service(document)
        .service(summarize)
        .service(stats)
        .service(reload);
}
