//! Note model.
//!
//! This module defines the canonical block model that every parser path
//! produces and the presentation layer consumes.

mod block;
mod note;

pub use block::*;
pub use note::*;
