//! Lilypond: a tile-based 2D platformer simulation.
//!
//! The crate owns the whole game simulation and stays backend-agnostic:
//! drawing goes through [`render::RenderSink`], sound through
//! [`sound::AudioSink`], and input arrives as a [`lily_core::input::InputState`]
//! snapshot each frame.

pub mod archetype;
pub mod camera;
pub mod catalog;
pub mod collection;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod handlers;
pub mod level;
pub mod level_file;
pub mod message;
pub mod player;
pub mod render;
pub mod replay;
pub mod sound;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;
