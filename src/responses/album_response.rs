use entities::album_local_model::AlbumSqlxModel;
use entities::song_local_model::SongSummarySqlxModel;
use serde::Serialize;

#[derive(Serialize, Clone)]
pub struct AlbumResponse {
    pub(crate) album: AlbumResponseData,
}

impl AlbumResponse {
    pub fn from_album(album: AlbumSqlxModel, songs: Vec<SongSummarySqlxModel>) -> Self {
        Self {
            album: AlbumResponseData {
                id: album.id,
                name: album.name,
                year: album.year,
                cover_url: album.cover_url,
                songs,
            },
        }
    }
}

#[derive(Serialize, Clone)]
pub struct AlbumResponseData {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) year: i32,
    #[serde(rename = "coverUrl")]
    pub(crate) cover_url: Option<String>,
    pub(crate) songs: Vec<SongSummarySqlxModel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_without_cover_serializes_null_cover_url() {
        let album = AlbumSqlxModel {
            id: "album-abc".to_string(),
            name: "Viva la Vida".to_string(),
            year: 2008,
            cover_url: None,
        };
        let songs = vec![SongSummarySqlxModel {
            id: "song-1".to_string(),
            title: "Lovers in Japan".to_string(),
            performer: "Coldplay".to_string(),
        }];
        let json = serde_json::to_value(AlbumResponse::from_album(album, songs)).unwrap();
        assert!(json["album"]["coverUrl"].is_null());
        assert_eq!(json["album"]["songs"][0]["title"], "Lovers in Japan");
    }
}
