//! Scoring core for ArchPath, a game about picking "just enough" infrastructure
//! as a company grows from MVP to enterprise scale.
//!
//! Data flows one way: a caller builds a selection of component ids, the
//! [`scoring::ScoringEngine`] normalizes it through the
//! [`registry::equivalency`] table, looks up the [`phases::PhaseCatalog`] rule
//! for the (company, phase) pair and returns a [`scoring::ScoreResult`].
//! [`game`] sequences the four phases per company and exposes the HTTP surface.

pub mod config;
pub mod error;
pub mod game;
pub mod phases;
pub mod registry;
pub mod scoring;
pub mod telemetry;
