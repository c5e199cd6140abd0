use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m20240101_000002_create_tables" // Make sure this matches with the file name
    }
}

#[derive(Iden)]
enum Albums {
    Table,
    Id,
    Name,
    Year,
    CoverUrl,
}

#[derive(Iden)]
enum Songs {
    Table,
    Id,
    Title,
    Year,
    Genre,
    Performer,
    Duration,
    AlbumId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Albums::Table)
                    .col(
                        ColumnDef::new(Albums::Id)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Albums::Name).text().not_null())
                    .col(ColumnDef::new(Albums::Year).integer().not_null())
                    .col(ColumnDef::new(Albums::CoverUrl).text())
                    .to_owned(),
            )
            .await?;

        // A song may outlive its album
        manager
            .create_table(
                Table::create()
                    .table(Songs::Table)
                    .col(
                        ColumnDef::new(Songs::Id)
                            .string_len(50)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Songs::Title).text().not_null())
                    .col(ColumnDef::new(Songs::Year).integer().not_null())
                    .col(ColumnDef::new(Songs::Genre).text().not_null())
                    .col(ColumnDef::new(Songs::Performer).text().not_null())
                    .col(ColumnDef::new(Songs::Duration).integer())
                    .col(ColumnDef::new(Songs::AlbumId).string_len(50))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-songs-album_id")
                            .from(Songs::Table, Songs::AlbumId)
                            .to(Albums::Table, Albums::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Songs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Albums::Table).to_owned())
            .await?;
        Ok(())
    }
}
