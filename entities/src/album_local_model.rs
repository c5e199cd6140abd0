use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, PartialEq, Eq, Clone, Debug, Serialize)]
pub struct AlbumSqlxModel {
    pub id: String,
    pub name: String,
    pub year: i32,
    #[serde(rename = "coverUrl")]
    pub cover_url: Option<String>,
}
