use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "language")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::problem_language::Entity")]
    ProblemLanguage,
}

impl Related<super::problem_language::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProblemLanguage.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
