//! # Türmatrix Schedule Normalizer
//!
//! Ingests an ArchiCAD door-schedule export ("Türmatrix", an xlsx workbook
//! with two header rows), normalizes its locale-variant measurement columns,
//! derives the millimeter string columns the CAD re-import expects, recodes
//! the wall-type column from wall-structure keywords, and re-exports a
//! workbook shaped exactly like the original layout.
//!
//! The pipeline is deliberately permissive: cells that cannot be interpreted
//! as numbers pass through unchanged or degrade to an explicit placeholder,
//! because the source data is maintained by hand.

pub mod error;
pub mod export;
pub mod pipeline;
pub mod sheet;
pub mod summary;
pub mod table;
