//! Decidr - Swipe-to-decide assistant backend.
//!
//! The user describes a decision, an LLM turns it into a deck of styled
//! yes/no cards, answers are collected by swiping, and a second LLM call
//! synthesizes a recommendation with confidence and reasoning.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
