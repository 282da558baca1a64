use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_name = "num_holes")]
    pub num_holes: i32,
    #[sea_orm(column_name = "par_total")]
    pub par_total: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::holes::Entity")]
    Holes,
    #[sea_orm(has_many = "super::rounds::Entity")]
    Rounds,
}

impl Related<super::holes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Holes.def()
    }
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
