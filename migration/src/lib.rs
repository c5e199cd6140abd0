pub use sea_orm_migration::prelude::*;

mod m20240101_000001_users;
mod m20240101_000002_create_tables;
mod m20240102_000001_playlists;
mod m20240103_000001_album_likes;
mod m20240104_000001_playlist_activities;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_users::Migration),
            Box::new(m20240101_000002_create_tables::Migration),
            Box::new(m20240102_000001_playlists::Migration),
            Box::new(m20240103_000001_album_likes::Migration),
            Box::new(m20240104_000001_playlist_activities::Migration),
        ]
    }
}
