use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r#"CREATE TABLE playlist_song_activities
(
    id varchar(50) not null primary key,
    playlist_id varchar(50) not null,
    song_id varchar(50) not null,
    user_id varchar(50) not null,
    action varchar(10) not null CHECK (action IN ('add', 'delete')),
    time timestamp not null default now(),
    seq bigserial not null,
    CONSTRAINT fk_playlist_song_activities_playlist
        FOREIGN KEY (playlist_id)
        REFERENCES playlists(id)
        ON DELETE CASCADE,
    CONSTRAINT fk_playlist_song_activities_song
        FOREIGN KEY (song_id)
        REFERENCES songs(id)
        ON DELETE CASCADE,
    CONSTRAINT fk_playlist_song_activities_user
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
        db.execute_unprepared(r#"DROP TABLE playlist_song_activities;"#)
            .await?;
        Ok(())
    }
}
