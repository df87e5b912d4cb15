pub mod config;
pub mod ecs;
pub mod engine;
pub mod error;
pub mod fares;
pub mod matching;
pub mod telemetry;
