//! Host integration surface.
//!
//! This module provides the boundary between a host server and the filter.
//! It handles:
//! - Mapping raw request parts, CGI server variables and `http::Request`
//!   values to a [`RequestContext`](crate::RequestContext)
//! - Reading the optional rewrite target a web server attaches to requests
//!
//! Nothing here performs I/O or keeps global state. The host decides what to
//! do with the returned [`Decision`](crate::Decision).
//!
//! # Integration Flow
//!
//! ```text
//! Host request
//!   ↓
//! RequestAdapter / http::Request<B>
//!   ↓
//! extract_context()
//!   ↓
//! Filter::handle(&ctx)
//!   ↓
//! Decision::Respond(response) → write and stop
//! Decision::Defer             → host's own 404 handling
//! ```

mod adapter;
mod extract;
mod http_request;

pub use self::adapter::RequestAdapter;
pub use self::extract::ExtractContext;
pub use self::http_request::RewriteTarget;
