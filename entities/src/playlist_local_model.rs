use serde::Serialize;
use sqlx::types::chrono::NaiveDateTime;
use sqlx::FromRow;

#[derive(FromRow, PartialEq, Eq, Clone, Debug, Serialize)]
pub struct PlaylistSqlxModel {
    pub id: String,
    pub name: String,
    pub username: String,
}

#[derive(FromRow, PartialEq, Eq, Clone, Debug, Serialize)]
pub struct PlaylistActivitySqlxModel {
    pub username: String,
    pub title: String,
    pub action: String,
    pub time: NaiveDateTime,
}
