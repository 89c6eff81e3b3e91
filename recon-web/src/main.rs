//! Servidor web Axum para extração de pessoas e lugares com avaliação rápida

use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Form, Router,
};
use recon_core::{
    corpus::demo_texts, evaluate, AnnotatedToken, Engine, EngineConfig, Extraction,
    WEB_GOLD_PERSONS,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

/// Variável de ambiente com o endereço do servidor
const ENV_BIND: &str = "RECON_BIND";
const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Estado compartilhado da aplicação
struct AppState {
    engine: Engine,
}

#[derive(Deserialize)]
struct AnalyzeForm {
    #[serde(default)]
    input_text: String,
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    persons: Vec<String>,
    places: Vec<String>,
    precision: f64,
    recall: f64,
    tokens: Vec<AnnotatedToken>,
    service: String,
    degraded: bool,
}

/// Linha da tabela de tokens
struct TokenRow {
    text: String,
    pos: &'static str,
    label: &'static str,
    relation: String,
    head: String,
}

/// Resultado já formatado para a página
struct ResultView {
    persons: Vec<String>,
    places: Vec<String>,
    precision: String,
    recall: String,
    tokens: Vec<TokenRow>,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    input_text: String,
    warning: Option<String>,
    result: Option<ResultView>,
    service: String,
    fallback: Option<String>,
}

impl IndexTemplate {
    fn new(engine: &Engine) -> Self {
        Self {
            input_text: String::new(),
            warning: None,
            result: None,
            service: engine.service_name().to_string(),
            fallback: engine.fallback_reason().map(str::to_string),
        }
    }
}

impl ResultView {
    fn from_extraction(extraction: Extraction) -> Self {
        let (precision, recall) = evaluate(&extraction.persons, &WEB_GOLD_PERSONS);
        let document = &extraction.document;
        let tokens = document
            .tokens
            .iter()
            .map(|token| {
                let (relation, head) = match &token.dependency {
                    Some(dep) => (
                        dep.relation.clone(),
                        document
                            .tokens
                            .get(dep.head)
                            .map(|h| h.text().to_string())
                            .unwrap_or_default(),
                    ),
                    None => ("-".to_string(), "-".to_string()),
                };
                TokenRow {
                    text: token.text().to_string(),
                    pos: token.pos.name(),
                    label: token.entity_label.map(|l| l.name()).unwrap_or("-"),
                    relation,
                    head,
                }
            })
            .collect();

        Self {
            persons: extraction.persons,
            places: extraction.places,
            precision: format!("{:.2}", precision),
            recall: format!("{:.2}", recall),
            tokens,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::from_env()?;
    let engine = Engine::from_config(&config);
    if let Some(reason) = engine.fallback_reason() {
        warn!(%reason, "servidor em modo degradado");
    }
    let state = Arc::new(AppState { engine });

    let bind = std::env::var(ENV_BIND).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("🚀 Servidor de reconciliação iniciado em http://{}", bind);
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler).post(form_handler))
        .route("/analyze", post(analyze_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(cors)
        .with_state(state)
}

fn render(template: IndexTemplate) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!(%err, "falha ao renderizar template");
            (StatusCode::INTERNAL_SERVER_ERROR, "Erro ao renderizar a página").into_response()
        }
    }
}

/// Retorna a página principal com o formulário vazio
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    render(IndexTemplate::new(&state.engine))
}

/// Formulário enviado: extrai, avalia e lista os tokens
async fn form_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AnalyzeForm>,
) -> Response {
    let mut page = IndexTemplate::new(&state.engine);

    if form.input_text.trim().is_empty() {
        page.warning = Some("Digite algum texto para analisar.".to_string());
        return render(page);
    }

    info!("Analisando formulário: {} chars", form.input_text.len());
    let extraction = state.engine.analyze(&form.input_text);
    page.result = Some(ResultView::from_extraction(extraction));
    page.input_text = form.input_text;
    render(page)
}

/// Extração via HTTP POST com resposta JSON
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "Texto vazio"})),
        )
            .into_response();
    }

    let extraction = state.engine.analyze(&req.text);
    let (precision, recall) = evaluate(&extraction.persons, &WEB_GOLD_PERSONS);

    Json(AnalyzeResponse {
        persons: extraction.persons,
        places: extraction.places,
        precision,
        recall,
        tokens: extraction.document.tokens,
        service: state.engine.service_name().to_string(),
        degraded: state.engine.is_degraded(),
    })
    .into_response()
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(title, text)| {
            serde_json::json!({
                "title": title,
                "text": text
            })
        })
        .collect();
    Json(texts)
}
