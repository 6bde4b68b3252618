//! Presentation: fragment templates for queued content items.

pub mod fragments;
