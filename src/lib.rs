//! Motivation Quiz Bot - Work-motivation quiz over a chat bot.
//!
//! The bot walks each user through a catalog of single- and multi-select
//! questions, accumulates per-category scores and finishes with a ranked,
//! tie-aware summary.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
