pub mod db;
pub mod models;
pub mod persistence;
pub mod schema;
pub mod services;
