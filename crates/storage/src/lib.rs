#![forbid(unsafe_code)]

pub mod fallback;
pub mod kv;
pub mod repository;
pub mod sqlite;
