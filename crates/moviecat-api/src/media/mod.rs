//! Response shaping helpers.
//!
//! Turns raw API fields into display-ready values: image URLs from relative
//! paths, and a playable trailer URL from an appended video list.

mod image;
mod trailer;

pub use image::{DEFAULT_IMAGE_SIZE, ImageResolver};
pub use trailer::resolve_trailer_url;
