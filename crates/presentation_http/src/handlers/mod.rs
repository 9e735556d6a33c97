//! HTTP request handlers

pub mod health;
pub mod images;
pub mod suggestions;
pub mod tools;
