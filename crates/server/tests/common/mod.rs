#![allow(dead_code)]

use leettrack_core::domain::{Difficulty, ProblemDraft};
use leettrack_server::config::DatabaseConfig;
use leettrack_server::db::init_pool_and_migrate;
use leettrack_server::repository::{
    NewUser, ProblemWrite, SeaOrmUserRepository, UserRecord, UserRepository,
};
use sea_orm::DatabaseConnection;

/// A fresh, migrated in-memory database. One connection keeps every query
/// on the same SQLite memory instance.
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: Some("sqlite::memory:".to_string()),
        max_connections: 1,
        connect_timeout_secs: 8,
    };

    init_pool_and_migrate(&config)
        .await
        .expect("in-memory database should initialize")
}

pub async fn create_user(db: &DatabaseConnection, email: &str) -> UserRecord {
    SeaOrmUserRepository::new(db.clone())
        .create(NewUser {
            email: email.to_string(),
            name: None,
        })
        .await
        .expect("user should be created")
}

pub fn write(name: &str, topics: &[&str], languages: &[&str]) -> ProblemWrite {
    ProblemWrite {
        draft: ProblemDraft {
            name: name.to_string(),
            difficulty: Difficulty::Easy,
            code: "def f(): pass".to_string(),
            notes: None,
            leetcode_link: None,
        },
        topics: topics.iter().map(|name| name.to_string()).collect(),
        languages: languages.iter().map(|name| name.to_string()).collect(),
    }
}

pub fn names(tags: &[leettrack_server::repository::TagRecord]) -> Vec<&str> {
    tags.iter().map(|tag| tag.name.as_str()).collect()
}
