//! Money Maze
//!
//! Application layer for the maze game: configuration, input mapping, and the systems that
//! drive a [`moneymaze_core::GameSession`] frame by frame.

pub mod config;
pub mod input;
pub mod systems;
