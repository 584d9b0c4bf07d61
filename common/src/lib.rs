//! Property Map Common Library
//!
//! CLI・Web(WASM)・デスクトップで共有される型とコントローラ

pub mod types;
pub mod error;
pub mod geo;
pub mod fixture;
pub mod index;
pub mod controller;

pub use types::{PropertyId, Postcode, PropertyRecord};
pub use error::{Error, Result};
pub use geo::{LatLng, Bounds, DEFAULT_CENTER, DEFAULT_ZOOM};
pub use fixture::RecordSet;
pub use index::CouncilIndex;
pub use controller::{
    CouncilOption, DetailField, DetailView, MarkerDescriptor, SelectionController, SelectionState,
    ALL_COUNCILS_LABEL, apply_filter, derive_council_options,
};
