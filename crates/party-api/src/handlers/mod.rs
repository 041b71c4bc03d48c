//! Route handlers

pub mod audio;
pub mod health;
pub mod pages;
pub mod upload;
