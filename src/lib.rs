pub mod config;
pub mod dto;
pub mod handlers;
pub mod interceptors;
pub mod middleware;
pub mod routes;
pub mod utils;
