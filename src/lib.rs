#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod validation;
pub mod config;
pub mod model;
pub mod db;
pub mod session;
pub mod api;
pub mod ops;
pub mod queries;
pub mod views;
pub mod attendance_code;
pub mod download;
pub mod cli;
