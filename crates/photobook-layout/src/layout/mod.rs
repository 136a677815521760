//! Layout geometry for photobook pages
//!
//! This module handles all the geometric calculations for a page:
//! - Zone resolution (where each drop zone sits on the physical page)
//! - Image placement (fitting an image inside its zone)

mod placement;
mod resolve;
mod types;

pub use placement::*;
pub use resolve::*;
pub use types::*;
