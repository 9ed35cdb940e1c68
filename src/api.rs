use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower_http::cors::CorsLayer;

use crate::analyze::{self, HotReloadScoring, NetworkReport, RankedNetwork, RankingMode};
use crate::ingest::{self, types::MetricsProvider};
use crate::params::{self, SearchParameters, WeightInput};
use crate::selection::{SelectionError, SelectionEvent};
use crate::session::{Session, SessionHandle};
use crate::store::MetricsStore;

#[derive(Clone)]
pub struct AppState {
    pub store: MetricsStore,
    pub session: SessionHandle,
    pub scoring: Arc<HotReloadScoring>,
    pub providers: Arc<Vec<Box<dyn MetricsProvider>>>,
}

impl AppState {
    pub fn new(
        store: MetricsStore,
        scoring: HotReloadScoring,
        providers: Vec<Box<dyn MetricsProvider>>,
    ) -> Self {
        Self {
            store,
            session: SessionHandle::new(),
            scoring: Arc::new(scoring),
            providers: Arc::new(providers),
        }
    }

    /// Run ingestion over the configured providers and swap the population in.
    pub async fn reload(&self) -> usize {
        let rows = ingest::run_once(&self.providers).await;
        let loaded = rows.len();
        self.store.replace(rows);

        let pop = self.store.snapshot();
        let names: Vec<&str> = pop.networks.iter().map(|n| n.name.as_str()).collect();
        self.session.replace_with(|s| Session {
            params: s.params,
            selection: s.selection.retain_known(names.iter().copied()),
        });
        loaded
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/search", post(submit_search))
        .route("/search/reset", post(reset_search))
        .route("/rankings", get(rankings))
        .route("/networks/{name}", get(network_detail))
        .route("/selection", get(get_selection).post(post_selection))
        .route("/admin/reload-metrics", post(admin_reload_metrics))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown network '{0}'")]
    UnknownNetwork(String),
    #[error(transparent)]
    Selection(#[from] SelectionError),
}

#[derive(Serialize)]
struct Notice {
    notice: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::UnknownNetwork(_) => StatusCode::NOT_FOUND,
            ApiError::Selection(_) => StatusCode::CONFLICT,
        };
        let body = Notice {
            notice: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Form fields arrive as free text or as plain JSON numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FormValue {
    Text(String),
    Number(serde_json::Number),
}

impl FormValue {
    /// Text goes through digit stripping; numbers are clamped directly.
    fn capital(field: &Option<FormValue>) -> f64 {
        match field {
            Some(FormValue::Text(s)) => params::sanitize_capital(s),
            Some(FormValue::Number(n)) => n
                .as_f64()
                .map(params::clamp_capital)
                .unwrap_or(params::DEFAULT_CAPITAL),
            None => params::DEFAULT_CAPITAL,
        }
    }

    fn weight(field: &Option<FormValue>) -> u32 {
        match field {
            Some(FormValue::Text(s)) => params::sanitize_weight(s),
            Some(FormValue::Number(n)) => n
                .as_f64()
                .map(params::clamp_weight)
                .unwrap_or(params::DEFAULT_WEIGHT_INPUT),
            None => params::DEFAULT_WEIGHT_INPUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchReq {
    #[serde(default)]
    capital: Option<FormValue>,
    #[serde(default)]
    revenue: Option<FormValue>,
    #[serde(default)]
    stability: Option<FormValue>,
    #[serde(default)]
    market_barriers: Option<FormValue>,
}

#[derive(Serialize)]
struct RankedOut {
    name: String,
    market_barriers: f64,
    network_governance: f64,
    profitability: f64,
    total: f64,
}

impl From<RankedNetwork> for RankedOut {
    fn from(n: RankedNetwork) -> Self {
        Self {
            total: n.total(),
            market_barriers: n.scores.market_barriers,
            network_governance: n.scores.network_governance,
            profitability: n.scores.profitability,
            name: n.name,
        }
    }
}

#[derive(Serialize)]
struct RankingResp {
    mode: RankingMode,
    params: Option<SearchParameters>,
    networks: Vec<RankedOut>,
}

fn ranking_for(state: &AppState, session: &Session) -> RankingResp {
    let pop = state.store.snapshot();
    let sp = state.scoring.current();
    let networks = analyze::ranking(&pop, session.params.as_ref(), &sp)
        .into_iter()
        .map(RankedOut::from)
        .collect();
    RankingResp {
        mode: session.mode(),
        params: session.params,
        networks,
    }
}

async fn submit_search(State(state): State<AppState>, Json(req): Json<SearchReq>) -> Json<RankingResp> {
    let params = SearchParameters::new(
        FormValue::capital(&req.capital),
        WeightInput::new(
            FormValue::weight(&req.revenue),
            FormValue::weight(&req.stability),
            FormValue::weight(&req.market_barriers),
        ),
    );
    tracing::info!(target: "api", capital = params.capital, weights = ?params.weights, "search submitted");
    let session = state.session.replace_with(|s| s.submit(params));
    Json(ranking_for(&state, &session))
}

async fn reset_search(State(state): State<AppState>) -> Json<RankingResp> {
    let session = state.session.replace_with(Session::reset);
    Json(ranking_for(&state, &session))
}

async fn rankings(State(state): State<AppState>) -> Json<RankingResp> {
    let session = state.session.get();
    Json(ranking_for(&state, &session))
}

#[derive(Serialize)]
struct NetworkResp {
    mode: RankingMode,
    #[serde(flatten)]
    report: NetworkReport,
}

async fn network_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<NetworkResp>, ApiError> {
    let session = state.session.get();
    // Before a search, detail views use the default parameters.
    let params = session.params.unwrap_or_default();
    let pop = state.store.snapshot();
    let report = analyze::network_report(&pop, &name, &params, &state.scoring.current())
        .ok_or(ApiError::UnknownNetwork(name))?;
    Ok(Json(NetworkResp {
        mode: session.mode(),
        report,
    }))
}

#[derive(Serialize)]
struct SelectionOut {
    active: Vec<String>,
    primary: Option<String>,
    hovered: Option<String>,
}

impl From<&Session> for SelectionOut {
    fn from(s: &Session) -> Self {
        Self {
            active: s.selection.active().to_vec(),
            primary: s.selection.primary().map(str::to_string),
            hovered: s.selection.hovered().map(str::to_string),
        }
    }
}

async fn get_selection(State(state): State<AppState>) -> Json<SelectionOut> {
    Json(SelectionOut::from(&state.session.get()))
}

async fn post_selection(
    State(state): State<AppState>,
    Json(event): Json<SelectionEvent>,
) -> Result<Json<SelectionOut>, ApiError> {
    if let SelectionEvent::Toggle(n) | SelectionEvent::HoverStart(n) = &event {
        if state.store.snapshot().find(n).is_none() {
            return Err(ApiError::UnknownNetwork(n.clone()));
        }
    }
    let session = state.session.update(|s| s.select(&event)).map_err(|e| {
        tracing::info!(target: "api", event = ?event, "selection rejected: {e}");
        ApiError::from(e)
    })?;
    Ok(Json(SelectionOut::from(&session)))
}

#[derive(Serialize)]
struct ReloadOut {
    loaded: usize,
}

async fn admin_reload_metrics(State(state): State<AppState>) -> Json<ReloadOut> {
    let loaded = state.reload().await;
    Json(ReloadOut { loaded })
}
