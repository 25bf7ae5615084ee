//! Route configuration for the decision API.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers::{
    analyze_decision, card_left_view, get_session, health, record_swipe, restart_session,
    start_decision, verify_invite, DecisionHandlers,
};
use super::middleware::{invite_gate_middleware, InviteGate};

/// Creates the decision router, gated behind the invite middleware.
///
/// Routes:
/// - `POST /api/decisions` - start a flow (generates the deck)
/// - `GET /api/decisions/:id` - current session state
/// - `POST /api/decisions/:id/swipe` - record one answer
/// - `POST /api/decisions/:id/cards/:index/left-view` - animation bookkeeping
/// - `POST /api/decisions/:id/analysis` - run/retry the analysis
/// - `POST /api/decisions/:id/restart` - discard and return to start
pub fn decision_routes(handlers: DecisionHandlers, gate: Arc<InviteGate>) -> Router {
    Router::new()
        .route("/api/decisions", post(start_decision))
        .route("/api/decisions/:id", get(get_session))
        .route("/api/decisions/:id/swipe", post(record_swipe))
        .route(
            "/api/decisions/:id/cards/:index/left-view",
            post(card_left_view),
        )
        .route("/api/decisions/:id/analysis", post(analyze_decision))
        .route("/api/decisions/:id/restart", post(restart_session))
        .layer(middleware::from_fn_with_state(gate, invite_gate_middleware))
        .with_state(handlers)
}

/// Creates the ungated router: invite verification and health.
///
/// These stay outside the gate; locking the verify endpoint behind the
/// cookie it issues would lock everyone out.
pub fn public_routes(gate: Arc<InviteGate>) -> Router {
    Router::new()
        .route("/api/invite/verify", post(verify_invite))
        .with_state(gate)
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockDecisionAi;
    use crate::adapters::memory::InMemorySessionStore;
    use crate::application::handlers::{
        AnalyzeDecisionHandler, CardLeftViewHandler, GetSessionHandler, RecordSwipeHandler,
        RestartSessionHandler, StartDecisionHandler,
    };
    use crate::config::InviteConfig;
    use crate::ports::{DecisionAnalyst, QuestionGenerator, SessionStore};

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use secrecy::Secret;
    use tower::ServiceExt;

    fn test_router(gate: Arc<InviteGate>) -> Router {
        let ai = Arc::new(MockDecisionAi::new());
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        let handlers = DecisionHandlers::new(
            Arc::new(StartDecisionHandler::new(
                Arc::clone(&ai) as Arc<dyn QuestionGenerator>,
                Arc::clone(&store),
            )),
            Arc::new(RecordSwipeHandler::new(Arc::clone(&store))),
            Arc::new(CardLeftViewHandler::new(Arc::clone(&store))),
            Arc::new(AnalyzeDecisionHandler::new(
                ai as Arc<dyn DecisionAnalyst>,
                Arc::clone(&store),
            )),
            Arc::new(RestartSessionHandler::new(Arc::clone(&store))),
            Arc::new(GetSessionHandler::new(store)),
        );
        decision_routes(handlers, Arc::clone(&gate)).merge(public_routes(gate))
    }

    fn gated() -> Arc<InviteGate> {
        let config = InviteConfig {
            code: Some(Secret::new("ABC123".into())),
            cookie_signing_key: None,
        };
        Arc::new(InviteGate::from_config(&config, false))
    }

    #[tokio::test]
    async fn health_is_reachable_without_an_invite() {
        let response = test_router(gated())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn gated_route_rejects_api_clients_with_401() {
        let response = test_router(gated())
            .oneshot(
                Request::post("/api/decisions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"prompt":"Should I?"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn gated_route_redirects_browsers_to_the_invite_form() {
        let response = test_router(gated())
            .oneshot(
                Request::get("/api/decisions/00000000-0000-0000-0000-000000000000")
                    .header(header::ACCEPT, "text/html,application/xhtml+xml")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/invite");
    }

    #[tokio::test]
    async fn verify_endpoint_stays_outside_the_gate() {
        let response = test_router(gated())
            .oneshot(
                Request::post("/api/invite/verify")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"code":"ABC123"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::SET_COOKIE));
    }
}
