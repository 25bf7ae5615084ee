//! HTTP handlers for the decision API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    AnalyzeDecisionCommand, AnalyzeDecisionHandler, CardLeftViewHandler, CardLeftViewQuery,
    FlowError, GetSessionHandler, GetSessionQuery, RecordSwipeCommand, RecordSwipeHandler,
    RestartSessionCommand, RestartSessionHandler, StartDecisionCommand, StartDecisionHandler,
};
use crate::domain::decision::DecisionError;
use crate::domain::foundation::SessionId;
use crate::ports::AiError;

use super::dto::{
    AnalysisResponse, CardLeftViewResponse, ErrorResponse, SessionResponse, StartDecisionRequest,
    SwipeRequest, SwipeResponse, VerifyInviteRequest, VerifyInviteResponse,
};
use super::middleware::InviteGate;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DecisionHandlers {
    start_handler: Arc<StartDecisionHandler>,
    swipe_handler: Arc<RecordSwipeHandler>,
    card_left_view_handler: Arc<CardLeftViewHandler>,
    analyze_handler: Arc<AnalyzeDecisionHandler>,
    restart_handler: Arc<RestartSessionHandler>,
    get_handler: Arc<GetSessionHandler>,
}

impl DecisionHandlers {
    pub fn new(
        start_handler: Arc<StartDecisionHandler>,
        swipe_handler: Arc<RecordSwipeHandler>,
        card_left_view_handler: Arc<CardLeftViewHandler>,
        analyze_handler: Arc<AnalyzeDecisionHandler>,
        restart_handler: Arc<RestartSessionHandler>,
        get_handler: Arc<GetSessionHandler>,
    ) -> Self {
        Self {
            start_handler,
            swipe_handler,
            card_left_view_handler,
            analyze_handler,
            restart_handler,
            get_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Decision endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/decisions - Start a decision flow
pub async fn start_decision(
    State(handlers): State<DecisionHandlers>,
    Json(req): Json<StartDecisionRequest>,
) -> Response {
    let cmd = StartDecisionCommand {
        prompt: req.prompt,
        count: req.count,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(session) => {
            (StatusCode::CREATED, Json(SessionResponse::from(&session))).into_response()
        }
        Err(e) => handle_flow_error(e),
    }
}

/// GET /api/decisions/:id - Current session state
pub async fn get_session(
    State(handlers): State<DecisionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Some(session_id) = parse_session_id(&session_id) else {
        return bad_session_id();
    };

    match handlers
        .get_handler
        .handle(GetSessionQuery { session_id })
        .await
    {
        Ok(session) => Json(SessionResponse::from(&session)).into_response(),
        Err(e) => handle_flow_error(e),
    }
}

/// POST /api/decisions/:id/swipe - Record one answer
pub async fn record_swipe(
    State(handlers): State<DecisionHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SwipeRequest>,
) -> Response {
    let Some(session_id) = parse_session_id(&session_id) else {
        return bad_session_id();
    };

    let cmd = RecordSwipeCommand {
        session_id,
        direction: req.direction,
    };

    match handlers.swipe_handler.handle(cmd).await {
        Ok(result) => Json(SwipeResponse::new(&result.outcome, &result.session)).into_response(),
        Err(e) => handle_flow_error(e),
    }
}

/// POST /api/decisions/:id/cards/:index/left-view - Exit-animation query
pub async fn card_left_view(
    State(handlers): State<DecisionHandlers>,
    Path((session_id, index)): Path<(String, usize)>,
) -> Response {
    let Some(session_id) = parse_session_id(&session_id) else {
        return bad_session_id();
    };

    match handlers
        .card_left_view_handler
        .handle(CardLeftViewQuery { session_id, index })
        .await
    {
        Ok(fate) => Json(CardLeftViewResponse::from(fate)).into_response(),
        Err(e) => handle_flow_error(e),
    }
}

/// POST /api/decisions/:id/analysis - Run (or retry) the analysis
pub async fn analyze_decision(
    State(handlers): State<DecisionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Some(session_id) = parse_session_id(&session_id) else {
        return bad_session_id();
    };

    match handlers
        .analyze_handler
        .handle(AnalyzeDecisionCommand { session_id })
        .await
    {
        Ok(analysis) => Json(AnalysisResponse::from(&analysis)).into_response(),
        Err(e) => handle_flow_error(e),
    }
}

/// POST /api/decisions/:id/restart - Discard the flow and return to Start
pub async fn restart_session(
    State(handlers): State<DecisionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let Some(session_id) = parse_session_id(&session_id) else {
        return bad_session_id();
    };

    match handlers
        .restart_handler
        .handle(RestartSessionCommand { session_id })
        .await
    {
        Ok(session) => Json(SessionResponse::from(&session)).into_response(),
        Err(e) => handle_flow_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Invite endpoint
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/invite/verify - Check an invite code, set the gate cookie
///
/// A mismatch is a 200 with `success: false`; it is expected control flow,
/// not a server error.
pub async fn verify_invite(
    State(gate): State<Arc<InviteGate>>,
    Json(req): Json<VerifyInviteRequest>,
) -> Response {
    if !gate.verify_code(&req.code) {
        return Json(VerifyInviteResponse {
            success: false,
            error: Some("Invalid invite code".to_string()),
        })
        .into_response();
    }

    let body = Json(VerifyInviteResponse {
        success: true,
        error: None,
    });
    match gate.issue_cookie() {
        Some(cookie) => ([(header::SET_COOKIE, cookie)], body).into_response(),
        // Gate disabled: nothing to set, access is open anyway.
        None => body.into_response(),
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Response {
    Json(serde_json::json!({ "status": "ok" })).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Option<SessionId> {
    raw.parse().ok()
}

fn bad_session_id() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new("Invalid session ID", "BAD_SESSION_ID", false)),
    )
        .into_response()
}

fn handle_flow_error(error: FlowError) -> Response {
    let retryable = error.is_retryable();
    let (status, code) = match &error {
        FlowError::Decision(DecisionError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND")
        }
        FlowError::Decision(DecisionError::InvalidPhase { .. }) => {
            (StatusCode::CONFLICT, "INVALID_PHASE")
        }
        FlowError::Decision(DecisionError::UnsupportedDirection(_)) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "UNSUPPORTED_DIRECTION")
        }
        FlowError::Decision(DecisionError::EmptyDeck)
        | FlowError::Decision(DecisionError::Validation(_)) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
        }
        FlowError::Generation(e) => (ai_status(e), "GENERATION_FAILED"),
        FlowError::Analysis(e) => (ai_status(e), "ANALYSIS_FAILED"),
    };

    if status.is_server_error() {
        tracing::error!(error = %error, "decision flow request failed");
    }

    (
        status,
        Json(ErrorResponse::new(error.to_string(), code, retryable)),
    )
        .into_response()
}

fn ai_status(error: &AiError) -> StatusCode {
    match error {
        AiError::RateLimited { .. } => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::BAD_GATEWAY,
    }
}
