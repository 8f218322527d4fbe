use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::Config;
use crate::models::{Answer, ApiResponse};
use crate::services::QueryEngine;
use crate::store::{self, DataStore};
use crate::utils;

pub struct AppState {
    store: RwLock<Arc<DataStore>>,
    engine: QueryEngine,
    config: Config,
}

pub async fn serve(config: Config, port: u16) -> anyhow::Result<()> {
    let store = store::load_or_empty(&config.player_csv(), &config.standings_csv());
    let state = Arc::new(AppState {
        engine: QueryEngine::new(&config),
        store: RwLock::new(Arc::new(store)),
        config,
    });

    let app = create_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("hoopdesk server listening on port {}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index_page))
        .route("/ask", post(ask_form))
        .route("/health", get(health_check))
        .route("/api/ask", get(ask_api))
        .route("/api/players", get(list_players_handler))
        .route("/api/reload", post(reload_data_handler))
        .nest_service("/static", ServeDir::new("static"))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

// GET / - question form page
async fn index_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state, "", None).await)
}

// POST /ask - form submission, re-renders the page with the answer
#[derive(Deserialize)]
struct AskForm {
    question: String,
}

async fn ask_form(State(state): State<Arc<AppState>>, Form(form): Form<AskForm>) -> Html<String> {
    let store = state.store.read().await.clone();
    let answer = state.engine.resolve(&store, &form.question);
    Html(render_page(&state, &form.question, Some(&answer)).await)
}

// GET /health - liveness plus data readiness
#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    player_rows: usize,
    standing_rows: usize,
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthStatus>> {
    let store = state.store.read().await.clone();
    Json(ApiResponse::success(HealthStatus {
        status: if store.is_empty() { "degraded" } else { "ok" },
        player_rows: store.player_count(),
        standing_rows: store.standing_count(),
    }))
}

// GET /api/ask?q=... - structured answer for AJAX callers
#[derive(Deserialize)]
struct AskParams {
    q: Option<String>,
}

#[derive(Serialize)]
struct AskResult {
    question: String,
    text: String,
    answer: Answer,
}

async fn ask_api(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> Result<Json<ApiResponse<AskResult>>, StatusCode> {
    let question = match params.q {
        Some(q) if !q.trim().is_empty() => q,
        _ => return Err(StatusCode::BAD_REQUEST),
    };
    let store = state.store.read().await.clone();
    let answer = state.engine.resolve(&store, &question);
    Ok(Json(ApiResponse::success(AskResult {
        text: answer.render(),
        question,
        answer,
    })))
}

// GET /api/players - the known player list for the sidebar / autocomplete
async fn list_players_handler(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<String>>> {
    let store = state.store.read().await.clone();
    Json(ApiResponse::success(store.player_names().to_vec()))
}

// POST /api/reload - swap in a freshly loaded snapshot
async fn reload_data_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    match DataStore::load(&state.config.player_csv(), &state.config.standings_csv()) {
        Ok(fresh) => {
            let message = format!(
                "reloaded {} player rows, {} standings rows",
                fresh.player_count(),
                fresh.standing_count()
            );
            *state.store.write().await = Arc::new(fresh);
            tracing::info!("{}", message);
            Ok(Json(ApiResponse::success(message)))
        }
        Err(e) => {
            tracing::error!("failed to reload data: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn render_page(state: &AppState, question: &str, answer: Option<&Answer>) -> String {
    let store = state.store.read().await.clone();
    let answer_html = match answer {
        Some(answer) => format!(
            "<h2>답변</h2><pre>{}</pre>",
            utils::html_escape(&answer.render())
        ),
        None => String::new(),
    };
    let players_html = if store.player_names().is_empty() {
        "<p class=\"muted\">선수 명단이 아직 로드되지 않았습니다.</p>".to_string()
    } else {
        let items: Vec<String> = store
            .player_names()
            .iter()
            .map(|name| format!("<li>{}</li>", utils::html_escape(name)))
            .collect();
        format!("<ul>{}</ul>", items.join(""))
    };
    PAGE_TEMPLATE
        .replace("{{question}}", &utils::html_escape(question))
        .replace("{{answer}}", &answer_html)
        .replace("{{players}}", &players_html)
}

const PAGE_TEMPLATE: &str = r#"<!doctype html>
<html lang="ko">
<head>
    <meta charset="utf-8">
    <title>🏀 hoopdesk - 농구 기록 질문 검색기</title>
    <style>
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #2c3e50;
            color: #ecf0f1;
            margin: 0;
            display: flex;
            justify-content: center;
        }
        .wrapper { display: flex; flex-wrap: wrap; gap: 30px; width: 90%; max-width: 1100px; margin-top: 40px; }
        .panel { background-color: rgba(44, 62, 80, 0.9); padding: 25px; border-radius: 10px; box-shadow: 0 4px 20px rgba(0, 0, 0, 0.4); }
        .ask { flex: 2; min-width: 420px; }
        .players { flex: 1; min-width: 240px; max-height: 75vh; overflow-y: auto; }
        h1 { color: #f1c40f; text-align: center; }
        h2 { color: #2ecc71; border-bottom: 2px solid #2ecc71; padding-bottom: 8px; }
        form { display: flex; margin-bottom: 20px; }
        input[type="text"] { flex-grow: 1; padding: 12px; border: 2px solid #3498db; border-radius: 5px 0 0 5px; background-color: #34495e; color: #ecf0f1; font-size: 1.05em; }
        input[type="submit"] { padding: 12px 22px; background-color: #3498db; color: white; border: none; border-radius: 0 5px 5px 0; cursor: pointer; font-size: 1.05em; }
        input[type="submit"]:hover { background-color: #2980b9; }
        pre { background-color: #34495e; padding: 15px; border-radius: 5px; white-space: pre-wrap; line-height: 1.6; }
        .help { margin-top: 30px; padding: 12px; border: 1px dashed #f39c12; border-radius: 5px; }
        .help h3 { color: #f39c12; margin-top: 0; }
        .muted { color: #bdc3c7; font-size: 0.9em; }
        ul { list-style: none; padding-left: 0; }
        li { margin-bottom: 6px; }
    </style>
</head>
<body>
    <div class="wrapper">
        <div class="panel ask">
            <h1>🏀 농구 기록 질문 검색기</h1>
            <form method="post" action="/ask">
                <input type="text" name="question" value="{{question}}" placeholder="예: 2023-24 시즌 득점 TOP 3 선수는?">
                <input type="submit" value="검색">
            </form>
            {{answer}}
            <div class="help">
                <h3>검색 가능한 질문 예시</h3>
                <ul>
                    <li>2023-24 시즌 득점 TOP 3 선수는?</li>
                    <li>Stephen Curry 주요 기록은?</li>
                    <li>Luka Doncic 3점 순위는?</li>
                    <li>동부 1위 팀은?</li>
                    <li>레이커스 선수 명단 알려줘</li>
                </ul>
            </div>
        </div>
        <div class="panel players">
            <h2>선수 명단</h2>
            {{players}}
        </div>
    </div>
</body>
</html>
"#;
