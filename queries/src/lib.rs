use entities::album_local_model::AlbumSqlxModel;
use entities::playlist_local_model::{PlaylistActivitySqlxModel, PlaylistSqlxModel};
use entities::song_local_model::{NewSong, SongSqlxModel, SongSummarySqlxModel};
use log::debug;
use sqlx::{Pool, Postgres, QueryBuilder};

pub async fn add_album(
    pool: &Pool<Postgres>,
    id: &str,
    name: &str,
    year: i32,
) -> Result<u64, sqlx::Error> {
    let ret = sqlx::query("insert into albums (id, name, year) values ($1, $2, $3)")
        .bind(id)
        .bind(name)
        .bind(year)
        .execute(pool)
        .await?;
    Ok(ret.rows_affected())
}

pub async fn get_album_by_id(
    pool: &Pool<Postgres>,
    album_id: &str,
) -> Result<Option<AlbumSqlxModel>, sqlx::Error> {
    sqlx::query_as::<_, AlbumSqlxModel>(
        "select id, name, year, cover_url from albums where id = $1",
    )
    .bind(album_id)
    .fetch_optional(pool)
    .await
}

pub async fn edit_album_by_id(
    pool: &Pool<Postgres>,
    album_id: &str,
    name: &str,
    year: i32,
) -> Result<u64, sqlx::Error> {
    let ret = sqlx::query("update albums set name = $1, year = $2 where id = $3")
        .bind(name)
        .bind(year)
        .bind(album_id)
        .execute(pool)
        .await?;
    Ok(ret.rows_affected())
}

pub async fn delete_album_by_id(pool: &Pool<Postgres>, album_id: &str) -> Result<u64, sqlx::Error> {
    let ret = sqlx::query("delete from albums where id = $1")
        .bind(album_id)
        .execute(pool)
        .await?;
    Ok(ret.rows_affected())
}

pub async fn update_album_cover(
    pool: &Pool<Postgres>,
    album_id: &str,
    cover_url: &str,
) -> Result<u64, sqlx::Error> {
    let ret = sqlx::query("update albums set cover_url = $1 where id = $2")
        .bind(cover_url)
        .bind(album_id)
        .execute(pool)
        .await?;
    Ok(ret.rows_affected())
}

pub async fn get_songs_by_album_id(
    pool: &Pool<Postgres>,
    album_id: &str,
) -> Result<Vec<SongSummarySqlxModel>, sqlx::Error> {
    sqlx::query_as::<_, SongSummarySqlxModel>(
        "select id, title, performer from songs where album_id = $1",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await
}

pub async fn add_song(pool: &Pool<Postgres>, id: &str, song: &NewSong) -> Result<u64, sqlx::Error> {
    let ret = sqlx::query(
        r#"
        insert into songs (id, title, year, genre, performer, duration, album_id)
        values ($1, $2, $3, $4, $5, $6, $7)
   "#,
    )
    .bind(id)
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(&song.album_id)
    .execute(pool)
    .await?;
    Ok(ret.rows_affected())
}

/// Case-insensitive substring search. Both filters are optional and combine
/// with AND.
pub async fn search_songs(
    pool: &Pool<Postgres>,
    title: Option<&str>,
    performer: Option<&str>,
) -> Result<Vec<SongSummarySqlxModel>, sqlx::Error> {
    let mut builder = songs_search_query(title, performer);
    debug!("Song search: {}", builder.sql());
    builder
        .build_query_as::<SongSummarySqlxModel>()
        .fetch_all(pool)
        .await
}

fn songs_search_query<'a>(
    title: Option<&'a str>,
    performer: Option<&'a str>,
) -> QueryBuilder<'a, Postgres> {
    let mut builder: QueryBuilder<Postgres> =
        QueryBuilder::new("select id, title, performer from songs");
    let mut separator = " where ";
    if let Some(title) = title {
        builder
            .push(separator)
            .push("title ilike '%' || ")
            .push_bind(title)
            .push(" || '%'");
        separator = " and ";
    }
    if let Some(performer) = performer {
        builder
            .push(separator)
            .push("performer ilike '%' || ")
            .push_bind(performer)
            .push(" || '%'");
    }
    builder
}

pub async fn get_song_by_id(
    pool: &Pool<Postgres>,
    song_id: &str,
) -> Result<Option<SongSqlxModel>, sqlx::Error> {
    sqlx::query_as::<_, SongSqlxModel>(
        "select id, title, year, performer, genre, duration, album_id from songs where id = $1",
    )
    .bind(song_id)
    .fetch_optional(pool)
    .await
}

pub async fn edit_song_by_id(
    pool: &Pool<Postgres>,
    song_id: &str,
    song: &NewSong,
) -> Result<u64, sqlx::Error> {
    let ret = sqlx::query(
        r#"
        update songs
        set title = $1, year = $2, genre = $3, performer = $4, duration = $5, album_id = $6
        where id = $7
   "#,
    )
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.genre)
    .bind(&song.performer)
    .bind(song.duration)
    .bind(&song.album_id)
    .bind(song_id)
    .execute(pool)
    .await?;
    Ok(ret.rows_affected())
}

pub async fn delete_song_by_id(pool: &Pool<Postgres>, song_id: &str) -> Result<u64, sqlx::Error> {
    let ret = sqlx::query("delete from songs where id = $1")
        .bind(song_id)
        .execute(pool)
        .await?;
    Ok(ret.rows_affected())
}

pub async fn get_playlists_by_owner(
    pool: &Pool<Postgres>,
    owner: &str,
) -> Result<Vec<PlaylistSqlxModel>, sqlx::Error> {
    sqlx::query_as::<_, PlaylistSqlxModel>(
        r#"select playlists.id, playlists.name, users.username
        from playlists inner join users on playlists.owner = users.id
        where playlists.owner = $1"#,
    )
    .bind(owner)
    .fetch_all(pool)
    .await
}

pub async fn get_playlist_by_id(
    pool: &Pool<Postgres>,
    playlist_id: &str,
) -> Result<Option<PlaylistSqlxModel>, sqlx::Error> {
    sqlx::query_as::<_, PlaylistSqlxModel>(
        r#"select playlists.id, playlists.name, users.username
        from playlists inner join users on playlists.owner = users.id
        where playlists.id = $1"#,
    )
    .bind(playlist_id)
    .fetch_optional(pool)
    .await
}

pub async fn get_songs_by_playlist_id(
    pool: &Pool<Postgres>,
    playlist_id: &str,
) -> Result<Vec<SongSummarySqlxModel>, sqlx::Error> {
    sqlx::query_as::<_, SongSummarySqlxModel>(
        r#"select songs.id, songs.title, songs.performer
        from playlist_songs inner join songs on playlist_songs.song_id = songs.id
        where playlist_songs.playlist_id = $1"#,
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await
}

const PLAYLIST_ACTIVITIES_QUERY: &str = r#"select users.username, songs.title, activities.action, activities.time
        from playlist_song_activities activities
                 inner join users on activities.user_id = users.id
                 inner join songs on activities.song_id = songs.id
        where activities.playlist_id = $1
        order by activities.seq"#;

/// Activity trail in insertion order, joined with the acting user and song.
pub async fn get_playlist_activities(
    pool: &Pool<Postgres>,
    playlist_id: &str,
) -> Result<Vec<PlaylistActivitySqlxModel>, sqlx::Error> {
    sqlx::query_as::<_, PlaylistActivitySqlxModel>(PLAYLIST_ACTIVITIES_QUERY)
        .bind(playlist_id)
        .fetch_all(pool)
        .await
}
