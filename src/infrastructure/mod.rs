pub mod config;
pub mod db;
pub mod google_auth;
pub mod http;
pub mod repositories;
