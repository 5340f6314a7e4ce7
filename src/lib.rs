//! Huebox - Library for generating and sharing color palettes
//!
//! This library provides functionality to:
//! - Generate random palettes, keeping locked colors across regenerations
//! - Encode palettes into share links and decode them back
//! - Persist a list of saved palettes in a single storage slot
//! - Drive all of the above from a UI through [`controller::PaletteController`]

pub mod cli;
pub mod color;
pub mod config;
pub mod controller;
pub mod palette;
pub mod share;
pub mod store;
pub mod terminal;
