//! Request body types.

pub mod body;
pub mod payload;

pub use body::RequestBody;
pub use payload::Payload;
