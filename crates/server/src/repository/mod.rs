pub mod problem_repository;
pub mod tag_repository;
pub mod user_repository;

/// Upper bound on ids or names sent as bind parameters in one statement.
const BIND_CHUNK_SIZE: usize = 500;

pub use problem_repository::{
    ProblemRecord, ProblemRepository, ProblemWrite, SeaOrmProblemRepository,
};
pub use tag_repository::{
    SeaOrmTagRepository, TagRecord, TagRepository, normalize_languages, normalize_topics,
};
pub use user_repository::{NewUser, SeaOrmUserRepository, UserRecord, UserRepository};
