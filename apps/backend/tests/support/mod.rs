#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod users;

pub use app_builder::create_test_app;
