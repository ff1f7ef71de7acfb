//! Wellness backend service: AI-generated daily plans, weekly summaries,
//! image analysis, and coaching chat, with time-bucketed response caching.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
