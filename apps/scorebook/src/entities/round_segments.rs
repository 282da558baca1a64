use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "round_segments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "round_id")]
    pub round_id: i64,
    #[sea_orm(column_name = "hole_id")]
    pub hole_id: Option<i64>,
    pub throws: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::rounds::Entity",
        from = "Column::RoundId",
        to = "super::rounds::Column::Id",
        on_delete = "Cascade"
    )]
    Round,
    #[sea_orm(
        belongs_to = "super::holes::Entity",
        from = "Column::HoleId",
        to = "super::holes::Column::Id",
        on_delete = "Cascade"
    )]
    Hole,
}

impl Related<super::rounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Round.def()
    }
}

impl Related<super::holes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Hole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
