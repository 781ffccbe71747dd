pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod handlers;
pub mod paths;
pub mod search;
pub mod srs;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod testing;
