use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(string_len(User::Id, 36).primary_key())
                    .col(string_len(User::Email, 255).unique_key())
                    .col(string_len_null(User::Name, 255))
                    .col(timestamp(User::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(User::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Problem::Table)
                    .if_not_exists()
                    .col(string_len(Problem::Id, 36).primary_key())
                    .col(string_len(Problem::UserId, 36))
                    .col(string_len(Problem::Name, 255))
                    // Difficulty enum is represented in app code. DB stores compact numeric code.
                    // 0=easy, 1=medium, 2=hard
                    .col(
                        small_integer(Problem::Difficulty)
                            .check(Expr::col(Problem::Difficulty).gte(0))
                            .check(Expr::col(Problem::Difficulty).lte(2)),
                    )
                    .col(text(Problem::Code))
                    .col(text_null(Problem::Notes))
                    .col(string_len_null(Problem::LeetcodeLink, 2048))
                    .col(timestamp(Problem::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Problem::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problems-user_id")
                            .from(Problem::Table, Problem::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Topic::Table)
                    .if_not_exists()
                    .col(string_len(Topic::Id, 36).primary_key())
                    .col(string_len(Topic::Name, 255).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Language::Table)
                    .if_not_exists()
                    .col(string_len(Language::Id, 36).primary_key())
                    .col(string_len(Language::Name, 255).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProblemTopic::Table)
                    .if_not_exists()
                    .col(string_len(ProblemTopic::ProblemId, 36))
                    .col(string_len(ProblemTopic::TopicId, 36))
                    .primary_key(
                        Index::create()
                            .col(ProblemTopic::ProblemId)
                            .col(ProblemTopic::TopicId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problem_topics-problem_id")
                            .from(ProblemTopic::Table, ProblemTopic::ProblemId)
                            .to(Problem::Table, Problem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problem_topics-topic_id")
                            .from(ProblemTopic::Table, ProblemTopic::TopicId)
                            .to(Topic::Table, Topic::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProblemLanguage::Table)
                    .if_not_exists()
                    .col(string_len(ProblemLanguage::ProblemId, 36))
                    .col(string_len(ProblemLanguage::LanguageId, 36))
                    .primary_key(
                        Index::create()
                            .col(ProblemLanguage::ProblemId)
                            .col(ProblemLanguage::LanguageId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problem_languages-problem_id")
                            .from(ProblemLanguage::Table, ProblemLanguage::ProblemId)
                            .to(Problem::Table, Problem::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-problem_languages-language_id")
                            .from(ProblemLanguage::Table, ProblemLanguage::LanguageId)
                            .to(Language::Table, Language::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_problems_user_id_created_at")
                    .table(Problem::Table)
                    .col(Problem::UserId)
                    .col(Problem::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_problem_topics_topic_id")
                    .table(ProblemTopic::Table)
                    .col(ProblemTopic::TopicId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_problem_languages_language_id")
                    .table(ProblemLanguage::Table)
                    .col(ProblemLanguage::LanguageId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProblemLanguage::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProblemTopic::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Language::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Topic::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Problem::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Email,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Problem {
    Table,
    Id,
    UserId,
    Name,
    Difficulty,
    Code,
    Notes,
    LeetcodeLink,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Topic {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Language {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum ProblemTopic {
    Table,
    ProblemId,
    TopicId,
}

#[derive(DeriveIden)]
enum ProblemLanguage {
    Table,
    ProblemId,
    LanguageId,
}
