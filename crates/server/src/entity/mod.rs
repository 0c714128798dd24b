pub mod language;
pub mod problem;
pub mod problem_language;
pub mod problem_topic;
pub mod topic;
pub mod user;
