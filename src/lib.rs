//! Short-circuit responses for requests a CMS would answer with "not found".
//!
//! This crate sits in front of a content-management system's router and
//! decides, for each request the host would otherwise send to its own 404
//! page, whether to:
//! - **Block** it as a probable break-in attempt (a rewrite toward a PHP file
//!   that does not exist)
//! - **Answer** it with a small 404 body matching what the client accepts
//!   (dotted, non-ASCII or non-Latin slugs)
//! - **Defer** to the host (homepage, the CMS's own sitemap files, anything
//!   else)
//!
//! # Core Types
//!
//! - [`RequestContext`]: Immutable per-request inputs
//! - [`Filter`]: Configured, reusable decision engine
//! - [`Outcome`]: Which classification rule fired
//! - [`Decision`]: Respond with a [`Response`] or defer
//!
//! # Examples
//!
//! ```
//! use dot404::{Decision, Filter, RequestContext};
//!
//! let filter = Filter::new().expect("built-in patterns compile");
//!
//! let ctx = RequestContext::new()
//!     .with_path("/favicon.ico")
//!     .with_accept("image/avif,image/webp,*/*");
//!
//! match filter.handle(&ctx) {
//!     Decision::Respond(response) => {
//!         assert_eq!(response.status(), 404);
//!         assert_eq!(response.content_type(), "image/png");
//!     }
//!     Decision::Defer => unreachable!("dotted slugs are answered"),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod classify;
mod config;
mod error;
mod filter;
mod negotiate;
mod request;
mod response;
mod sitemap;
pub mod web;

pub use classify::{classify, Outcome};
pub use config::{FilterConfig, SitemapScope};
pub use error::Error;
pub use filter::{Filter, FilterBuilder};
pub use negotiate::{accepts, negotiate};
pub use request::RequestContext;
pub use response::{Decision, Response, PIXEL_PNG};
pub use sitemap::{ReservedPaths, SITEMAP_PATTERNS};
