pub mod prelude;

pub mod album;
pub mod album_local_model;
pub mod playlist;
pub mod playlist_local_model;
pub mod playlist_song;
pub mod playlist_song_activity;
pub mod song;
pub mod song_local_model;
pub mod user;
pub mod user_album_like;
