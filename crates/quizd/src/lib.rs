//! Quiz server library
//!
//! Hands out multiple-choice tests, keeps each test's answer key server-side
//! and grades submissions against it.

pub mod api;
pub mod bank;
pub mod grading;
pub mod session;
