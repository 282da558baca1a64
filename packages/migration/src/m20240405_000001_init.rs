use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Expr, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Name,
    NumHoles,
    ParTotal,
}

#[derive(Iden)]
enum Holes {
    Table,
    Id,
    Number,
    Par,
    CourseId,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Rounds {
    Table,
    Id,
    PlayerId,
    CourseId,
    Time,
}

#[derive(Iden)]
enum RoundSegments {
    Table,
    Id,
    RoundId,
    HoleId,
    Throws,
}

/// SQLite is dynamically typed; numeric columns only accept integers.
fn integer_only(column: &str) -> SimpleExpr {
    Expr::cust(format!("typeof({column}) = 'integer'"))
}

fn id_col<T: IntoIden>(iden: T) -> ColumnDef {
    ColumnDef::new(iden)
        .integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // courses
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(id_col(Courses::Id))
                    .col(ColumnDef::new(Courses::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Courses::NumHoles)
                            .integer()
                            .not_null()
                            .check(integer_only("num_holes")),
                    )
                    .col(
                        ColumnDef::new(Courses::ParTotal)
                            .integer()
                            .not_null()
                            .check(integer_only("par_total")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_courses_name_unique")
                    .table(Courses::Table)
                    .col(Courses::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // holes
        manager
            .create_table(
                Table::create()
                    .table(Holes::Table)
                    .if_not_exists()
                    .col(id_col(Holes::Id))
                    .col(
                        ColumnDef::new(Holes::Number)
                            .integer()
                            .not_null()
                            .check(integer_only("number")),
                    )
                    .col(
                        ColumnDef::new(Holes::Par)
                            .integer()
                            .not_null()
                            .check(integer_only("par")),
                    )
                    .col(ColumnDef::new(Holes::CourseId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_holes_course_id")
                            .from(Holes::Table, Holes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_holes_course_id")
                    .table(Holes::Table)
                    .col(Holes::CourseId)
                    .to_owned(),
            )
            .await?;

        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(id_col(Players::Id))
                    .col(ColumnDef::new(Players::Name).string_len(120).not_null())
                    .to_owned(),
            )
            .await?;

        // rounds
        manager
            .create_table(
                Table::create()
                    .table(Rounds::Table)
                    .if_not_exists()
                    .col(id_col(Rounds::Id))
                    .col(ColumnDef::new(Rounds::PlayerId).integer().null())
                    .col(ColumnDef::new(Rounds::CourseId).integer().null())
                    // "datetime" has NUMERIC affinity, so a bare epoch number stays numeric
                    // and fails the check instead of being coerced to text. Text must also
                    // parse as a date.
                    .col(
                        ColumnDef::new(Rounds::Time)
                            .custom(Alias::new("datetime"))
                            .not_null()
                            .check(Expr::cust(
                                "typeof(time) = 'text' AND julianday(time) IS NOT NULL",
                            )),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_player_id")
                            .from(Rounds::Table, Rounds::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rounds_course_id")
                            .from(Rounds::Table, Rounds::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_rounds_player_id")
                    .table(Rounds::Table)
                    .col(Rounds::PlayerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_rounds_course_id")
                    .table(Rounds::Table)
                    .col(Rounds::CourseId)
                    .to_owned(),
            )
            .await?;

        // round_segments
        manager
            .create_table(
                Table::create()
                    .table(RoundSegments::Table)
                    .if_not_exists()
                    .col(id_col(RoundSegments::Id))
                    .col(ColumnDef::new(RoundSegments::RoundId).integer().not_null())
                    .col(ColumnDef::new(RoundSegments::HoleId).integer().null())
                    .col(
                        ColumnDef::new(RoundSegments::Throws)
                            .integer()
                            .not_null()
                            .check(integer_only("throws")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_segments_round_id")
                            .from(RoundSegments::Table, RoundSegments::RoundId)
                            .to(Rounds::Table, Rounds::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_round_segments_hole_id")
                            .from(RoundSegments::Table, RoundSegments::HoleId)
                            .to(Holes::Table, Holes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_round_segments_round_id")
                    .table(RoundSegments::Table)
                    .col(RoundSegments::RoundId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_round_segments_hole_id")
                    .table(RoundSegments::Table)
                    .col(RoundSegments::HoleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // reverse dependency order; sqlite drops indexes together with their table
        manager
            .drop_table(Table::drop().table(RoundSegments::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Rounds::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Holes::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Courses::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
