//! Extraction boundary trait for host integration.

use crate::request::RequestContext;

/// Builds a [`RequestContext`] from a host-specific request type.
///
/// Implementations only map host types to the context. They do not
/// classify, log or respond.
///
/// # Examples
///
/// ```
/// use dot404::web::ExtractContext;
/// use dot404::RequestContext;
///
/// struct MyServerRequest {
///     uri: String,
///     accept: Option<String>,
/// }
///
/// impl ExtractContext for MyServerRequest {
///     fn extract_context(&self) -> RequestContext {
///         let ctx = RequestContext::new().with_path(&self.uri);
///         match &self.accept {
///             Some(accept) => ctx.with_accept(accept),
///             None => ctx,
///         }
///     }
/// }
///
/// let req = MyServerRequest { uri: "/foo.bar".into(), accept: None };
/// assert_eq!(req.extract_context().segments(), ["foo.bar"]);
/// ```
pub trait ExtractContext {
    /// Extracts the immutable per-request context.
    fn extract_context(&self) -> RequestContext;
}
