//! PREML command-line client

pub mod cli;
pub mod commands;
pub mod config;
pub mod cutout_image;
pub mod error;
pub mod report;
