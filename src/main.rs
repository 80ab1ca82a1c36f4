use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use news_search::api::{self, AppState};
use news_search::stemer::StemmingPolicy;
use news_search::{EngineConfig, Session, load_documents_lenient};

#[derive(Parser)]
#[command(name = "news-search")]
#[command(about = "Search and summarize a directory of news articles", long_about = None)]
struct Args {
    /// Directory of `*.json` article records
    #[arg(long, default_value = "data")]
    data: PathBuf,
    /// Stopword list, one word per line (built-in Vietnamese list if omitted)
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Index surface forms without stemming
    #[arg(long, default_value_t = false)]
    no_stem: bool,
    /// Results per query when the request gives no limit
    #[arg(long, default_value_t = news_search::config::DEFAULT_TOP_K)]
    top_k: usize,
    /// Sentences per summary when the request gives no count
    #[arg(long, default_value_t = news_search::config::DEFAULT_SUMMARY_SENTENCES)]
    summary_sentences: usize,
    /// Also write the vocabulary and weight matrix to this JSON file
    #[arg(long)]
    export_index: Option<PathBuf>,
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let config = EngineConfig {
        stopwords_path: args.stopwords.clone(),
        stemming: if args.no_stem { StemmingPolicy::None } else { StemmingPolicy::Porter },
        top_k: args.top_k,
        summary_sentences: args.summary_sentences,
    };

    let (corpus, rejected) = load_documents_lenient(&args.data)
        .with_context(|| format!("loading documents from {}", args.data.display()))?;
    if !rejected.is_empty() {
        info!(rejected = rejected.len(), "some records were not indexed");
    }

    let session = Session::new(config, corpus).context("building search session")?;
    if let Some(path) = &args.export_index {
        session
            .snapshot()
            .index()
            .export_json(path)
            .with_context(|| format!("exporting index to {}", path.display()))?;
    }

    let state = web::Data::new(AppState {
        session,
        data_dir: args.data.clone(),
    });

    info!(host = %args.host, port = args.port, "server listening");
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await?;

    Ok(())
}
