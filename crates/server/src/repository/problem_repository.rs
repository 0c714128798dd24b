use crate::entity::{language, problem, problem_language, problem_topic, topic};
use crate::repository::BIND_CHUNK_SIZE;
use crate::repository::tag_repository::{TagRecord, normalize_languages, normalize_topics};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use leettrack_core::domain::{
    Difficulty, DifficultyStats, LanguageId, ProblemDraft, ProblemFilter, ProblemId, TopicId,
    UserId,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::{HashMap, HashSet};
use std::str::FromStr;

/// A problem with its topics and languages expanded, tags sorted by name.
#[derive(Debug, Clone)]
pub struct ProblemRecord {
    pub id: ProblemId,
    pub owner_id: UserId,
    pub name: String,
    pub difficulty: Difficulty,
    pub code: String,
    pub notes: Option<String>,
    pub leetcode_link: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub topics: Vec<TagRecord>,
    pub languages: Vec<TagRecord>,
}

/// Everything a create or update writes: the scalar fields plus the full
/// tag lists that replace whatever the problem was tagged with before.
#[derive(Debug, Clone)]
pub struct ProblemWrite {
    pub draft: ProblemDraft,
    pub topics: Vec<String>,
    pub languages: Vec<String>,
}

#[async_trait]
pub trait ProblemRepository: Send + Sync {
    async fn create(&self, owner: UserId, write: ProblemWrite) -> Result<ProblemRecord>;
    /// Returns `None` when the problem does not exist or belongs to someone else.
    async fn update(
        &self,
        owner: UserId,
        problem_id: ProblemId,
        write: ProblemWrite,
    ) -> Result<Option<ProblemRecord>>;
    /// Returns `false` when nothing owned by `owner` was deleted.
    async fn delete(&self, owner: UserId, problem_id: ProblemId) -> Result<bool>;
    async fn is_owned_by(&self, owner: UserId, problem_id: ProblemId) -> Result<bool>;
    async fn find_owned(&self, owner: UserId, problem_id: ProblemId)
    -> Result<Option<ProblemRecord>>;
    /// Newest first; problems created in the same instant fall back to id order.
    async fn list_by_owner(&self, owner: UserId, filter: &ProblemFilter)
    -> Result<Vec<ProblemRecord>>;
    async fn stats_by_owner(&self, owner: UserId) -> Result<DifficultyStats>;
}

#[derive(Clone)]
pub struct SeaOrmProblemRepository {
    db: DatabaseConnection,
}

impl SeaOrmProblemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn map_difficulty(code: i16) -> Result<Difficulty> {
        match code {
            0 => Ok(Difficulty::Easy),
            1 => Ok(Difficulty::Medium),
            2 => Ok(Difficulty::Hard),
            _ => Err(anyhow!("invalid problem.difficulty code from database: {code}")),
        }
    }

    fn map_difficulty_code(difficulty: Difficulty) -> i16 {
        match difficulty {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    fn map_model(
        model: problem::Model,
        topics: Vec<TagRecord>,
        languages: Vec<TagRecord>,
    ) -> Result<ProblemRecord> {
        let id = ProblemId::from_str(&model.id)
            .map_err(|e| anyhow!("invalid problem.id '{}' from database: {e}", model.id))?;
        let owner_id = UserId::from_str(&model.user_id).map_err(|e| {
            anyhow!(
                "invalid problem.user_id '{}' from database: {e}",
                model.user_id
            )
        })?;

        Ok(ProblemRecord {
            id,
            owner_id,
            name: model.name,
            difficulty: Self::map_difficulty(model.difficulty)?,
            code: model.code,
            notes: model.notes,
            leetcode_link: model.leetcode_link,
            created_at: model.created_at,
            updated_at: model.updated_at,
            topics,
            languages,
        })
    }

    async fn find_owned_model<C>(
        conn: &C,
        owner: UserId,
        problem_id: ProblemId,
    ) -> Result<Option<problem::Model>>
    where
        C: ConnectionTrait,
    {
        let model = problem::Entity::find_by_id(problem_id.to_string())
            .filter(problem::Column::UserId.eq(owner.to_string()))
            .one(conn)
            .await?;

        Ok(model)
    }

    /// Inserts one association row per distinct tag id.
    async fn link_tags<C>(
        conn: &C,
        problem_id: &str,
        topic_ids: &[TopicId],
        language_ids: &[LanguageId],
    ) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let topic_rows: Vec<problem_topic::ActiveModel> = distinct(topic_ids)
            .map(|topic_id| problem_topic::ActiveModel {
                problem_id: Set(problem_id.to_string()),
                topic_id: Set(topic_id.to_string()),
            })
            .collect();
        if !topic_rows.is_empty() {
            problem_topic::Entity::insert_many(topic_rows)
                .exec_without_returning(conn)
                .await?;
        }

        let language_rows: Vec<problem_language::ActiveModel> = distinct(language_ids)
            .map(|language_id| problem_language::ActiveModel {
                problem_id: Set(problem_id.to_string()),
                language_id: Set(language_id.to_string()),
            })
            .collect();
        if !language_rows.is_empty() {
            problem_language::Entity::insert_many(language_rows)
                .exec_without_returning(conn)
                .await?;
        }

        Ok(())
    }

    async fn unlink_tags<C>(conn: &C, problem_id: &str) -> Result<()>
    where
        C: ConnectionTrait,
    {
        problem_topic::Entity::delete_many()
            .filter(problem_topic::Column::ProblemId.eq(problem_id))
            .exec(conn)
            .await?;
        problem_language::Entity::delete_many()
            .filter(problem_language::Column::ProblemId.eq(problem_id))
            .exec(conn)
            .await?;

        Ok(())
    }

    /// Expands topic and language associations for a batch of problems,
    /// keeping the input order.
    async fn hydrate<C>(conn: &C, models: Vec<problem::Model>) -> Result<Vec<ProblemRecord>>
    where
        C: ConnectionTrait,
    {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let problem_ids: Vec<String> = models.iter().map(|model| model.id.clone()).collect();
        let mut topics: HashMap<String, Vec<TagRecord>> = HashMap::new();
        let mut languages: HashMap<String, Vec<TagRecord>> = HashMap::new();

        for chunk in problem_ids.chunks(BIND_CHUNK_SIZE) {
            let topic_rows = problem_topic::Entity::find()
                .filter(problem_topic::Column::ProblemId.is_in(chunk.iter().cloned()))
                .find_also_related(topic::Entity)
                .all(conn)
                .await?;
            for (link, tag) in topic_rows {
                let tag = tag.ok_or_else(|| {
                    anyhow!(
                        "problem_topic row for problem '{}' references missing topic '{}'",
                        link.problem_id,
                        link.topic_id
                    )
                })?;
                topics.entry(link.problem_id).or_default().push(TagRecord {
                    id: tag.id,
                    name: tag.name,
                });
            }

            let language_rows = problem_language::Entity::find()
                .filter(problem_language::Column::ProblemId.is_in(chunk.iter().cloned()))
                .find_also_related(language::Entity)
                .all(conn)
                .await?;
            for (link, tag) in language_rows {
                let tag = tag.ok_or_else(|| {
                    anyhow!(
                        "problem_language row for problem '{}' references missing language '{}'",
                        link.problem_id,
                        link.language_id
                    )
                })?;
                languages.entry(link.problem_id).or_default().push(TagRecord {
                    id: tag.id,
                    name: tag.name,
                });
            }
        }

        models
            .into_iter()
            .map(|model| {
                let mut problem_topics = topics.remove(&model.id).unwrap_or_default();
                let mut problem_languages = languages.remove(&model.id).unwrap_or_default();
                problem_topics.sort_by(|a, b| a.name.cmp(&b.name));
                problem_languages.sort_by(|a, b| a.name.cmp(&b.name));
                Self::map_model(model, problem_topics, problem_languages)
            })
            .collect()
    }

    async fn hydrate_one<C>(conn: &C, model: problem::Model) -> Result<ProblemRecord>
    where
        C: ConnectionTrait,
    {
        Self::hydrate(conn, vec![model])
            .await?
            .pop()
            .ok_or_else(|| anyhow!("hydrating a single problem produced no record"))
    }
}

fn distinct<T>(ids: &[T]) -> impl Iterator<Item = &T>
where
    T: Eq + std::hash::Hash,
{
    let mut seen = HashSet::new();
    ids.iter().filter(move |id| seen.insert(*id))
}

#[async_trait]
impl ProblemRepository for SeaOrmProblemRepository {
    async fn create(&self, owner: UserId, write: ProblemWrite) -> Result<ProblemRecord> {
        let txn = self.db.begin().await?;

        let topic_ids = normalize_topics(&txn, &write.topics).await?;
        let language_ids = normalize_languages(&txn, &write.languages).await?;

        let id = ProblemId::new();
        let now = Utc::now().naive_utc();
        let draft = write.draft;

        let active_model = problem::ActiveModel {
            id: Set(id.to_string()),
            user_id: Set(owner.to_string()),
            name: Set(draft.name),
            difficulty: Set(Self::map_difficulty_code(draft.difficulty)),
            code: Set(draft.code),
            notes: Set(draft.notes),
            leetcode_link: Set(draft.leetcode_link),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&txn).await?;
        Self::link_tags(&txn, &model.id, &topic_ids, &language_ids).await?;
        let record = Self::hydrate_one(&txn, model).await?;

        txn.commit().await?;
        Ok(record)
    }

    async fn update(
        &self,
        owner: UserId,
        problem_id: ProblemId,
        write: ProblemWrite,
    ) -> Result<Option<ProblemRecord>> {
        let txn = self.db.begin().await?;

        let Some(model) = Self::find_owned_model(&txn, owner, problem_id).await? else {
            return Ok(None);
        };

        let draft = write.draft;
        let mut active_model: problem::ActiveModel = model.into();
        active_model.name = Set(draft.name);
        active_model.difficulty = Set(Self::map_difficulty_code(draft.difficulty));
        active_model.code = Set(draft.code);
        active_model.notes = Set(draft.notes);
        active_model.leetcode_link = Set(draft.leetcode_link);
        active_model.updated_at = Set(Utc::now().naive_utc());
        let model = active_model.update(&txn).await?;

        Self::unlink_tags(&txn, &model.id).await?;
        let topic_ids = normalize_topics(&txn, &write.topics).await?;
        let language_ids = normalize_languages(&txn, &write.languages).await?;
        Self::link_tags(&txn, &model.id, &topic_ids, &language_ids).await?;
        let record = Self::hydrate_one(&txn, model).await?;

        txn.commit().await?;
        Ok(Some(record))
    }

    async fn delete(&self, owner: UserId, problem_id: ProblemId) -> Result<bool> {
        let result = problem::Entity::delete_many()
            .filter(problem::Column::Id.eq(problem_id.to_string()))
            .filter(problem::Column::UserId.eq(owner.to_string()))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn is_owned_by(&self, owner: UserId, problem_id: ProblemId) -> Result<bool> {
        Ok(Self::find_owned_model(&self.db, owner, problem_id)
            .await?
            .is_some())
    }

    async fn find_owned(
        &self,
        owner: UserId,
        problem_id: ProblemId,
    ) -> Result<Option<ProblemRecord>> {
        let Some(model) = Self::find_owned_model(&self.db, owner, problem_id).await? else {
            return Ok(None);
        };

        Self::hydrate_one(&self.db, model).await.map(Some)
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        filter: &ProblemFilter,
    ) -> Result<Vec<ProblemRecord>> {
        let models = problem::Entity::find()
            .filter(problem::Column::UserId.eq(owner.to_string()))
            .order_by_desc(problem::Column::CreatedAt)
            .order_by_desc(problem::Column::Id)
            .all(&self.db)
            .await?;

        let records = Self::hydrate(&self.db, models).await?;
        if filter.is_empty() {
            return Ok(records);
        }

        Ok(records
            .into_iter()
            .filter(|record| {
                filter.matches(
                    &record.name,
                    record.difficulty,
                    record.topics.iter().map(|tag| tag.name.as_str()),
                    record.languages.iter().map(|tag| tag.name.as_str()),
                )
            })
            .collect())
    }

    async fn stats_by_owner(&self, owner: UserId) -> Result<DifficultyStats> {
        let codes: Vec<i16> = problem::Entity::find()
            .select_only()
            .column(problem::Column::Difficulty)
            .filter(problem::Column::UserId.eq(owner.to_string()))
            .into_tuple()
            .all(&self.db)
            .await?;

        codes.into_iter().map(Self::map_difficulty).collect()
    }
}
