pub mod common;
pub mod configs;
pub mod monitoring;
pub mod playback;
pub mod rest;
pub mod server;
