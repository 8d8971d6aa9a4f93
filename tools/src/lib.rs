//! Introspection and conversion tooling around the edustrip libraries.
//!
//! This crate backs the `edustrip` binary:
//!
//! - Convert `.mcworld` archives and bare `level.dat` files
//! - Inspect a world's header and root-level entries
//! - Dump the decoded tag tree as JSON or as an indented tree
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what a conversion would change
//!   before running it.

mod inspect;
mod mcworld;
mod render;

pub use inspect::{inspect_level_dat, EntryReport, InspectReport};
pub use mcworld::{is_zip_payload, McworldArchive};
pub use render::{document_to_json, render_document_pretty};
