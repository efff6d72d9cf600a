pub mod config;
pub mod feed;
