//! Fretboard Multitool Library
//!
//! Interactive fretboard diagrams: a headless editor core plus the egui
//! front end, audio playback and MIDI output around it.

pub mod app;
pub mod config;
pub mod data;
pub mod engine;
pub mod fretboard;
pub mod widgets;
