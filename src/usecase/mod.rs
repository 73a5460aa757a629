//! Usecase layer: drives the component sequence + progress events.

pub mod event;
pub mod explore;
pub mod stats;
