pub mod auth;
pub mod browser;
pub mod clock;
pub mod config;
pub mod duration;
pub mod extract;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod selector;
pub mod store;
pub mod sync;
