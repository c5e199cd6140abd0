use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r#"CREATE TABLE user_album_likes
(
    id varchar(50) not null primary key,
    album_id varchar(50) not null,
    user_id varchar(50) not null,
    CONSTRAINT uq_user_album_likes_album_user
        UNIQUE (album_id, user_id),
    CONSTRAINT fk_user_album_likes_album
        FOREIGN KEY (album_id)
        REFERENCES albums(id)
        ON DELETE CASCADE,
    CONSTRAINT fk_user_album_likes_user
        FOREIGN KEY (user_id)
        REFERENCES users(id)
        ON DELETE CASCADE
);"#,
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(r#"DROP TABLE user_album_likes;"#)
            .await?;
        Ok(())
    }
}
