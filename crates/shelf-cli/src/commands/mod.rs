//! Command handlers

pub mod about;
pub mod book;
pub mod category;
pub mod config;
pub mod favorite;
pub mod route;
