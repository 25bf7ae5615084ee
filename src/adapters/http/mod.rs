//! HTTP adapter - REST API for the swipe UI.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::DecisionHandlers;
pub use middleware::InviteGate;

use std::sync::Arc;

use axum::Router;

use crate::application::handlers::{
    AnalyzeDecisionHandler, CardLeftViewHandler, GetSessionHandler, RecordSwipeHandler,
    RestartSessionHandler, StartDecisionHandler,
};
use crate::ports::{DecisionAnalyst, QuestionGenerator, SessionStore};

/// Wires the flow handlers and assembles the full application router.
pub fn app_router(
    generator: Arc<dyn QuestionGenerator>,
    analyst: Arc<dyn DecisionAnalyst>,
    store: Arc<dyn SessionStore>,
    gate: Arc<InviteGate>,
) -> Router {
    let handlers = DecisionHandlers::new(
        Arc::new(StartDecisionHandler::new(generator, Arc::clone(&store))),
        Arc::new(RecordSwipeHandler::new(Arc::clone(&store))),
        Arc::new(CardLeftViewHandler::new(Arc::clone(&store))),
        Arc::new(AnalyzeDecisionHandler::new(analyst, Arc::clone(&store))),
        Arc::new(RestartSessionHandler::new(Arc::clone(&store))),
        Arc::new(GetSessionHandler::new(store)),
    );

    routes::decision_routes(handlers, Arc::clone(&gate)).merge(routes::public_routes(gate))
}
