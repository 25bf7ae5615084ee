//! Decision flow handlers - one handler per operation.

mod analyze_decision;
mod card_left_view;
mod errors;
mod get_session;
mod record_swipe;
mod restart_session;
mod start_decision;

pub use analyze_decision::{AnalyzeDecisionCommand, AnalyzeDecisionHandler};
pub use card_left_view::{CardLeftViewHandler, CardLeftViewQuery};
pub use errors::FlowError;
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use record_swipe::{RecordSwipeCommand, RecordSwipeHandler, RecordSwipeResult};
pub use restart_session::{RestartSessionCommand, RestartSessionHandler};
pub use start_decision::{StartDecisionCommand, StartDecisionHandler};
