//! Decision domain - question cards, the swipe deck, and the session
//! phase machine.

mod analysis;
mod deck;
mod errors;
mod question;
mod session;

pub use analysis::Analysis;
pub use deck::{CardDeck, CardFate, SwipeDirection, SwipeOutcome};
pub use errors::DecisionError;
pub use question::Question;
pub use session::{DecisionSession, Phase};
