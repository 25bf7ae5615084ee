//! Foundation value objects shared across the domain.

mod confidence;
mod errors;
mod ids;
mod question_count;
mod timestamp;

pub use confidence::Confidence;
pub use errors::ValidationError;
pub use ids::SessionId;
pub use question_count::QuestionCount;
pub use timestamp::Timestamp;
