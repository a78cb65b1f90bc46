pub mod config;
pub mod feed;
pub mod http_client;
pub mod mock;
pub mod normalize;
pub mod schedule;
pub mod state;
