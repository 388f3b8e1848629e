//! HTTP handlers, one module per resource.
//!
//! Handlers validate input through `travelguide_core::validation`, call
//! the zero-sized repositories, and wrap results in [`DataResponse`].
//!
//! [`DataResponse`]: crate::response::DataResponse

pub mod attractions;
pub mod comments;
pub mod destinations;
pub mod favorites;
pub mod itineraries;
pub mod tags;
pub mod users;
