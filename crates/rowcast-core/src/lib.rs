//! In-place multi-line terminal rendering.
//!
//! A [`Renderer`] manages a block of terminal rows ("slots"). Each slot is
//! owned by one producer through a [`Profile`], which composes a [`Frame`]
//! from its [`Component`]s and hands it to the slot's worker task. Workers
//! repaint their own row under one shared lock, so any number of producers
//! can update the block concurrently without tearing each other's output.

pub mod component;
pub mod error;
pub mod frame;
pub mod profile;
pub mod registry;
pub mod slot;

mod cursor;
mod screen;
mod worker;

#[cfg(test)]
mod testing;

pub use component::Component;
pub use error::{Error, Result};
pub use frame::Frame;
pub use profile::Profile;
pub use registry::Renderer;
pub use slot::SlotId;
