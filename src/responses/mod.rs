pub mod album_response;
pub mod responses;
