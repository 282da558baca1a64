use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rounds")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "player_id")]
    pub player_id: Option<i64>,
    #[sea_orm(column_name = "course_id")]
    pub course_id: Option<i64>,
    pub time: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::PlayerId",
        to = "super::players::Column::Id",
        on_delete = "SetNull"
    )]
    Player,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id",
        on_delete = "SetNull"
    )]
    Course,
    #[sea_orm(has_many = "super::round_segments::Entity")]
    RoundSegments,
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::round_segments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoundSegments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
