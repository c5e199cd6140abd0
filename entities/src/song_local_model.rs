use serde::Serialize;
use sqlx::FromRow;

#[derive(FromRow, PartialEq, Eq, Clone, Debug, Serialize)]
pub struct SongSqlxModel {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub performer: String,
    pub genre: String,
    pub duration: Option<i32>,
    #[serde(rename = "albumId")]
    pub album_id: Option<String>,
}

/// Short form used by listings: album detail, song search, playlist songs.
#[derive(FromRow, PartialEq, Eq, Clone, Debug, Serialize)]
pub struct SongSummarySqlxModel {
    pub id: String,
    pub title: String,
    pub performer: String,
}

/// Insert payload for a new song row.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct NewSong {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    pub duration: Option<i32>,
    pub album_id: Option<String>,
}
