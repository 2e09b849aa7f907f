//! Body variants accepted by the write methods.

use super::payload::Payload;

/// The body of a POST, PUT, PATCH or DELETE call.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody<'a, R> {
    /// A typed resource, serialized through the client's codec.
    Resource(&'a R),
    /// An untyped key-value payload, serialized as a generic JSON value.
    Payload(Payload),
    /// No body.
    Empty,
}

impl<'a, R> RequestBody<'a, R> {
    /// Returns true if no body is attached.
    pub fn is_empty(&self) -> bool {
        matches!(self, RequestBody::Empty)
    }
}

impl<'a, R> Default for RequestBody<'a, R> {
    fn default() -> Self {
        RequestBody::Empty
    }
}

impl<'a, R> From<&'a R> for RequestBody<'a, R> {
    fn from(resource: &'a R) -> Self {
        RequestBody::Resource(resource)
    }
}

impl<'a, R> From<Payload> for RequestBody<'a, R> {
    fn from(payload: Payload) -> Self {
        RequestBody::Payload(payload)
    }
}
