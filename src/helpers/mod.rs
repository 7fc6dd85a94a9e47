pub mod http_client;
pub mod lrclib;
pub mod matcher;
pub mod ratelimit;
pub mod songstore;
pub mod syncedlyrics;
