//! # lexvault-worker
//!
//! Scheduled background maintenance tasks.

pub mod scheduler;

pub use scheduler::CronScheduler;
