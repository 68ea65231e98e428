//! Search requests: building, decoding and hydrating.

pub mod decoder;
pub mod hydrator;
mod scroll;
mod service;

pub use decoder::decode;
pub use hydrator::{hydrate, hydrate_into, Hydrate};
pub use scroll::ScrollService;
pub use service::{BodySource, SearchService};
