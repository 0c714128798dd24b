mod difficulty;
mod error;
mod filter;
mod ids;
mod problem;
mod stats;

pub use difficulty::Difficulty;
pub use error::DomainError;
pub use filter::ProblemFilter;
pub use ids::{LanguageId, ProblemId, TopicId, UserId};
pub use problem::ProblemDraft;
pub use stats::DifficultyStats;
