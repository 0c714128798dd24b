use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "topic")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::problem_topic::Entity")]
    ProblemTopic,
}

impl Related<super::problem_topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProblemTopic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
