//! Topic and language master rows.
//!
//! Tags are global: any user may reference one by name, and the first
//! reference creates it. Creation is an insert that does nothing on a name
//! conflict followed by a lookup by name, so two writers racing on the same
//! new name both end up with the single row the unique index allows. Names
//! are inserted in sorted order so that two such writers cannot deadlock.

use crate::entity::{language, topic};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use leettrack_core::domain::{LanguageId, TopicId};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, sea_query::OnConflict,
};
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use super::BIND_CHUNK_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub id: String,
    pub name: String,
}

#[async_trait]
pub trait TagRepository: Send + Sync {
    /// All topics, alphabetically by name.
    async fn list_topics(&self) -> Result<Vec<TagRecord>>;
    /// All languages, alphabetically by name.
    async fn list_languages(&self) -> Result<Vec<TagRecord>>;
}

#[derive(Clone)]
pub struct SeaOrmTagRepository {
    db: DatabaseConnection,
}

impl SeaOrmTagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for SeaOrmTagRepository {
    async fn list_topics(&self) -> Result<Vec<TagRecord>> {
        let models = topic::Entity::find()
            .order_by_asc(topic::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|model| TagRecord {
                id: model.id,
                name: model.name,
            })
            .collect())
    }

    async fn list_languages(&self) -> Result<Vec<TagRecord>> {
        let models = language::Entity::find()
            .order_by_asc(language::Column::Name)
            .all(&self.db)
            .await?;

        Ok(models
            .into_iter()
            .map(|model| TagRecord {
                id: model.id,
                name: model.name,
            })
            .collect())
    }
}

macro_rules! define_tag_normalizer {
    ($fn_name:ident, $entity:ident, $id:ty, $kind:literal) => {
        /// Resolves each name to its master row id, creating missing rows.
        ///
        /// Names match exactly (case-sensitive, untrimmed). The returned ids
        /// follow input order, repeats included.
        pub async fn $fn_name<C>(conn: &C, names: &[String]) -> Result<Vec<$id>>
        where
            C: ConnectionTrait,
        {
            // Sorted so concurrent writers take unique-index locks in the same order.
            let distinct: BTreeSet<&str> = names.iter().map(String::as_str).collect();
            let distinct: Vec<&str> = distinct.into_iter().collect();
            let mut resolved: HashMap<String, $id> = HashMap::with_capacity(distinct.len());

            for chunk in distinct.chunks(BIND_CHUNK_SIZE) {
                let candidates = chunk.iter().map(|name| $entity::ActiveModel {
                    id: Set(<$id>::new().to_string()),
                    name: Set(name.to_string()),
                });

                $entity::Entity::insert_many(candidates)
                    .on_conflict(
                        OnConflict::column($entity::Column::Name)
                            .do_nothing()
                            .to_owned(),
                    )
                    .exec_without_returning(conn)
                    .await
                    .with_context(|| format!("failed to upsert {} rows", $kind))?;

                let models = $entity::Entity::find()
                    .filter($entity::Column::Name.is_in(chunk.iter().copied()))
                    .all(conn)
                    .await?;

                for model in models {
                    let id = <$id>::from_str(&model.id).map_err(|e| {
                        anyhow!("invalid {}.id '{}' from database: {e}", $kind, model.id)
                    })?;
                    resolved.insert(model.name, id);
                }
            }

            names
                .iter()
                .map(|name| {
                    resolved
                        .get(name)
                        .copied()
                        .ok_or_else(|| anyhow!("{} '{}' missing after upsert", $kind, name))
                })
                .collect()
        }
    };
}

define_tag_normalizer!(normalize_topics, topic, TopicId, "topic");
define_tag_normalizer!(normalize_languages, language, LanguageId, "language");
