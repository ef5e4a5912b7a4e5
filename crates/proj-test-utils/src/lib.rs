//! Shared test utilities for the project-config workspace.
//!
//! This crate provides a [`TestProject`] builder that lays out a front-end
//! project on disk (package manifest, bundler configuration, presets under
//! `node_modules`, language files, lockfiles). It is a dev-dependency only.

pub mod project;

pub use project::TestProject;
