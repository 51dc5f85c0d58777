// Library modules for DiscoJanice
// This allows tests to access internal modules

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod sources;
pub mod suggestion;
pub mod voice;

#[cfg(test)]
pub mod test_utils;
