//! Walrus Deploy: keystore and manifest tooling for static sites on Walrus
//!
//! Stores a signing key on disk (optionally password-encrypted), scans a site
//! directory into content-hashed file entries, and diffs those entries against a
//! deployed manifest to decide what needs uploading.

pub mod cli;
pub mod config;
pub mod error;
pub mod hashing;
pub mod keystore;
pub mod logging;
pub mod site;
pub mod tool;
