#![allow(dead_code)]

pub mod audio_source;
pub mod config;
pub mod mock_backend;
pub mod server;
