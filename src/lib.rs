//! Inlay serves a directory of slotted HTML pages and splices externally
//! submitted content fragments into them at response time.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
