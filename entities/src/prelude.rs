pub use super::album::Entity as Album;
pub use super::playlist::Entity as Playlist;
pub use super::playlist_song::Entity as PlaylistSong;
pub use super::playlist_song_activity::Entity as PlaylistSongActivity;
pub use super::song::Entity as Song;
pub use super::user::Entity as User;
pub use super::user_album_like::Entity as UserAlbumLike;
