//! ECS resources made available to systems.
//!
//! Overview
//! - `animationstore` – animation assets reused across entities, loadable from JSON
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod worldtime;
