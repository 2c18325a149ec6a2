//! Lacquer: caching-header edge for self-hosted content sites.
//!
//! Serves posts and pages while emitting shared-cache friendly response
//! headers (`Cache-Control: s-maxage=…`, `Etag`, `Last-Modified`) so an
//! upstream Varnish or CDN gets a high hit rate. Per-class cache durations
//! and feature toggles are edited at runtime through an admin-only settings
//! surface.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod policy;
pub mod presentation;
