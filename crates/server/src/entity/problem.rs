use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "problem")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub difficulty: i16,
    #[sea_orm(column_type = "Text")]
    pub code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub leetcode_link: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::problem_topic::Entity")]
    ProblemTopic,
    #[sea_orm(has_many = "super::problem_language::Entity")]
    ProblemLanguage,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::problem_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProblemTopic.def()
    }
}

impl Related<super::problem_language::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProblemLanguage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
