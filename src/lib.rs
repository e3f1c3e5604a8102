//! Alien Invasion: a single-screen arcade shooter.
//!
//! The library holds the whole game core and knows nothing about terminals.
//! It consumes an [`input::InputFrame`] per frame and exposes its state to any
//! [`render::Surface`].  The binary wires both ends to crossterm.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod render;
pub mod waves;
