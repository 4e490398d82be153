//! # Connect N
//!
//! A gravity-constrained connect-N engine for human and computer players, with
//! a two-ply heuristic opponent and a terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: columns, board, win scan, simulation, turn controller
//! - [`ai`] — Heuristic engine: win/block/loss/sacrifice classification and move choice
//! - [`arena`] — Unattended computer-vs-computer games and result tallies
//! - [`ui`] — Terminal UI: game view and key handling
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
