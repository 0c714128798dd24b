mod common;

use std::time::Duration;

use common::{create_user, names, setup_db, write};
use leettrack_core::domain::{Difficulty, DifficultyStats, ProblemDraft, ProblemFilter};
use leettrack_server::entity::{language, problem, problem_language, problem_topic, topic};
use leettrack_server::repository::{
    ProblemRepository, SeaOrmProblemRepository, SeaOrmTagRepository, SeaOrmUserRepository,
    TagRepository, UserRepository, normalize_topics,
};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[tokio::test]
async fn test_create_hydrates_every_submitted_tag() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    let problem = problems
        .create(owner.id, write("Two Sum", &["Hash Table", "Array"], &["Python"]))
        .await
        .expect("problem should be created");

    assert_eq!(problem.owner_id, owner.id);
    assert_eq!(problem.name, "Two Sum");
    assert_eq!(problem.difficulty, Difficulty::Easy);
    assert_eq!(names(&problem.topics), vec!["Array", "Hash Table"]);
    assert_eq!(names(&problem.languages), vec!["Python"]);
    assert_eq!(problem.created_at, problem.updated_at);
}

#[tokio::test]
async fn test_duplicate_names_collapse_to_one_association() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    let problem = problems
        .create(
            owner.id,
            write("Two Sum", &["Array", "Array"], &["Rust", "Rust"]),
        )
        .await
        .expect("problem should be created");

    assert_eq!(names(&problem.topics), vec!["Array"]);
    assert_eq!(names(&problem.languages), vec!["Rust"]);
    assert_eq!(problem_topic::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(problem_language::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_normalizer_reuses_existing_rows() {
    let db = setup_db().await;

    let first = normalize_topics(&db, &strings(&["Graph", "Graph"]))
        .await
        .expect("first normalization");
    let second = normalize_topics(&db, &strings(&["Graph"]))
        .await
        .expect("second normalization");

    assert_eq!(first.len(), 2);
    assert_eq!(first[0], first[1]);
    assert_eq!(second, vec![first[0]]);
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_normalizer_matches_names_exactly() {
    let db = setup_db().await;

    let ids = normalize_topics(&db, &strings(&["Array", "array", " Array"]))
        .await
        .expect("normalization");

    assert_ne!(ids[0], ids[1]);
    assert_ne!(ids[0], ids[2]);
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 3);
}

#[tokio::test]
async fn test_normalizer_resolves_same_ids_in_any_order() {
    let db = setup_db().await;

    let forward = normalize_topics(&db, &strings(&["B", "A"]))
        .await
        .expect("first normalization");
    let backward = normalize_topics(&db, &strings(&["A", "B"]))
        .await
        .expect("second normalization");

    assert_eq!(forward, vec![backward[1], backward[0]]);
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_normalizer_handles_more_names_than_one_statement_binds() {
    let db = setup_db().await;
    let many: Vec<String> = (0..1_200).map(|i| format!("topic-{i:04}")).collect();

    let ids = normalize_topics(&db, &many).await.expect("normalization");
    let again = normalize_topics(&db, &many).await.expect("renormalization");

    assert_eq!(ids.len(), many.len());
    assert_eq!(ids, again);
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 1_200);
}

#[tokio::test]
async fn test_tags_are_shared_between_users() {
    let db = setup_db().await;
    let ada = create_user(&db, "ada@example.com").await;
    let bob = create_user(&db, "bob@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    let first = problems
        .create(ada.id, write("Two Sum", &["Array"], &["Python"]))
        .await
        .expect("ada's problem");
    let second = problems
        .create(bob.id, write("3Sum", &["Array"], &["Python"]))
        .await
        .expect("bob's problem");

    assert_eq!(first.topics[0].id, second.topics[0].id);
    assert_eq!(first.languages[0].id, second.languages[0].id);
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(language::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_replaces_tags_instead_of_merging() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    let created = problems
        .create(owner.id, write("Two Sum", &["A", "B"], &["Python"]))
        .await
        .expect("problem should be created");

    let mut update = write("Two Sum II", &["B", "C"], &[]);
    update.draft = ProblemDraft {
        difficulty: Difficulty::Medium,
        notes: Some("two pointers".to_string()),
        ..update.draft
    };
    let updated = problems
        .update(owner.id, created.id, update)
        .await
        .expect("update should succeed")
        .expect("owner should see the problem");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Two Sum II");
    assert_eq!(updated.difficulty, Difficulty::Medium);
    assert_eq!(updated.notes.as_deref(), Some("two pointers"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(names(&updated.topics), vec!["B", "C"]);
    assert!(updated.languages.is_empty());

    assert_eq!(problem_topic::Entity::find().count(&db).await.unwrap(), 2);
    assert_eq!(problem_language::Entity::find().count(&db).await.unwrap(), 0);
    // "A" and "Python" stay available for other problems.
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 3);
    assert_eq!(language::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_clears_optional_fields_when_omitted() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    let mut initial = write("Two Sum", &[], &[]);
    initial.draft.notes = Some("hash map".to_string());
    initial.draft.leetcode_link = Some("https://leetcode.com/problems/two-sum".to_string());
    let created = problems.create(owner.id, initial).await.expect("create");

    let updated = problems
        .update(owner.id, created.id, write("Two Sum", &[], &[]))
        .await
        .expect("update")
        .expect("owned");

    assert_eq!(updated.notes, None);
    assert_eq!(updated.leetcode_link, None);
}

#[tokio::test]
async fn test_failed_update_rolls_back_scalars_and_tags() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());
    let created = problems
        .create(owner.id, write("Two Sum", &["Array", "Hash Table"], &[]))
        .await
        .expect("problem should be created");

    db.execute_unprepared("DROP TABLE problem_language")
        .await
        .expect("drop table");
    let result = problems
        .update(owner.id, created.id, write("Renamed", &["Graph"], &[]))
        .await;

    assert!(result.is_err());
    let stored = problem::Entity::find_by_id(created.id.to_string())
        .one(&db)
        .await
        .unwrap()
        .expect("problem still exists");
    assert_eq!(stored.name, "Two Sum");
    assert_eq!(problem_topic::Entity::find().count(&db).await.unwrap(), 2);
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 2);
}

#[tokio::test]
async fn test_non_owner_cannot_read_update_or_delete() {
    let db = setup_db().await;
    let ada = create_user(&db, "ada@example.com").await;
    let mallory = create_user(&db, "mallory@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    let problem = problems
        .create(ada.id, write("Two Sum", &["Array"], &["Python"]))
        .await
        .expect("create");

    assert!(!problems.is_owned_by(mallory.id, problem.id).await.unwrap());
    assert!(
        problems
            .find_owned(mallory.id, problem.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        problems
            .update(mallory.id, problem.id, write("Hijacked", &["Graph"], &[]))
            .await
            .unwrap()
            .is_none()
    );
    assert!(!problems.delete(mallory.id, problem.id).await.unwrap());

    let untouched = problems
        .find_owned(ada.id, problem.id)
        .await
        .unwrap()
        .expect("ada still owns the problem");
    assert_eq!(untouched.name, "Two Sum");
    assert_eq!(names(&untouched.topics), vec!["Array"]);
    // The rejected update rolled back before normalizing its tags.
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_cascades_associations_but_keeps_tags() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    let problem = problems
        .create(owner.id, write("Two Sum", &["Array"], &["Python"]))
        .await
        .expect("create");

    assert!(problems.delete(owner.id, problem.id).await.unwrap());
    assert!(!problems.delete(owner.id, problem.id).await.unwrap());
    assert!(
        problems
            .find_owned(owner.id, problem.id)
            .await
            .unwrap()
            .is_none()
    );

    assert_eq!(problem_topic::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(problem_language::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(topic::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(language::Entity::find().count(&db).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_is_newest_first_and_filterable() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let other = create_user(&db, "bob@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    problems
        .create(owner.id, write("Two Sum", &["Array"], &["Python"]))
        .await
        .expect("create");
    tokio::time::sleep(Duration::from_millis(5)).await;
    let mut hard = write("Median of Two Sorted Arrays", &["Binary Search"], &["Rust"]);
    hard.draft.difficulty = Difficulty::Hard;
    problems.create(owner.id, hard).await.expect("create");
    problems
        .create(other.id, write("Valid Anagram", &["Array"], &["Python"]))
        .await
        .expect("create");

    let all = problems
        .list_by_owner(owner.id, &ProblemFilter::default())
        .await
        .expect("list");
    let all_names: Vec<&str> = all.iter().map(|problem| problem.name.as_str()).collect();
    assert_eq!(all_names, vec!["Median of Two Sorted Arrays", "Two Sum"]);

    let by_search = problems
        .list_by_owner(
            owner.id,
            &ProblemFilter {
                search: Some("TWO".to_string()),
                topic: Some("Array".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("list");
    assert_eq!(by_search.len(), 1);
    assert_eq!(by_search[0].name, "Two Sum");

    let by_language = problems
        .list_by_owner(
            owner.id,
            &ProblemFilter {
                language: Some("Rust".to_string()),
                difficulty: Some(Difficulty::Hard),
                ..Default::default()
            },
        )
        .await
        .expect("list");
    assert_eq!(by_language.len(), 1);
    assert_eq!(by_language[0].name, "Median of Two Sorted Arrays");
}

#[tokio::test]
async fn test_list_hydrates_more_problems_than_one_statement_binds() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());
    for i in 0..520 {
        problems
            .create(owner.id, write(&format!("Problem {i}"), &["Array"], &["Rust"]))
            .await
            .expect("problem should be created");
    }

    let listed = problems
        .list_by_owner(owner.id, &ProblemFilter::default())
        .await
        .expect("list");

    assert_eq!(listed.len(), 520);
    assert!(listed.iter().all(|problem| names(&problem.topics) == vec!["Array"]));
    assert!(listed.iter().all(|problem| names(&problem.languages) == vec!["Rust"]));
}

#[tokio::test]
async fn test_stats_count_only_the_owners_problems() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let other = create_user(&db, "bob@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());

    for difficulty in [Difficulty::Easy, Difficulty::Hard, Difficulty::Easy] {
        let mut problem = write("Problem", &[], &[]);
        problem.draft.difficulty = difficulty;
        problems.create(owner.id, problem).await.expect("create");
    }
    problems
        .create(other.id, write("Other", &[], &[]))
        .await
        .expect("create");

    let stats = problems.stats_by_owner(owner.id).await.expect("stats");
    assert_eq!(
        stats,
        DifficultyStats {
            total: 3,
            easy: 2,
            medium: 0,
            hard: 1,
        }
    );
}

#[tokio::test]
async fn test_tag_lists_are_alphabetical() {
    let db = setup_db().await;
    let owner = create_user(&db, "ada@example.com").await;
    let problems = SeaOrmProblemRepository::new(db.clone());
    let tags = SeaOrmTagRepository::new(db.clone());

    problems
        .create(
            owner.id,
            write("Two Sum", &["Hash Table", "Array"], &["Rust", "Go"]),
        )
        .await
        .expect("create");

    assert_eq!(
        names(&tags.list_topics().await.expect("topics")),
        vec!["Array", "Hash Table"]
    );
    assert_eq!(
        names(&tags.list_languages().await.expect("languages")),
        vec!["Go", "Rust"]
    );
}

#[tokio::test]
async fn test_user_lookup_by_email_is_exact() {
    let db = setup_db().await;
    let users = SeaOrmUserRepository::new(db.clone());
    let created = create_user(&db, "ada@example.com").await;

    let by_email = users
        .find_by_email("ada@example.com")
        .await
        .expect("lookup")
        .expect("user exists");

    assert_eq!(by_email, created);
    assert!(
        users
            .find_by_email("ADA@example.com")
            .await
            .expect("lookup")
            .is_none()
    );
}
