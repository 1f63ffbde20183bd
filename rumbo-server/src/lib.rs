//! Survey prose generator.
//!
//! Turns traverse rows (station labels, quadrant bearings, distances and
//! adjacency notes) into formal Spanish boundary descriptions, served as a
//! web form with optional DOCX export.

pub mod config;
pub mod domain;
pub mod export;
pub mod numerals;
pub mod survey;
pub mod web;
