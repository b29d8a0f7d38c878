//! `ccc-slides` - scripture references to CCC house-style slides.
//!
//! Parses a reference, lays its verses out as slides under the CCC rules,
//! audits the result and exports it as text, RTF or a structured document.

pub mod bible;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod layout;
pub mod services;
pub mod types;
