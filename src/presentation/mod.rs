//! Askama view models for homepage fragments.

pub mod views;
