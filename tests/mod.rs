//! Top-level test module for colframe
//!
//! This file organizes all integration tests into categories.

mod aggregate;
mod helpers;
mod join;
mod properties;
mod tokenizer;
