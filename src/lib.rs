mod element;
pub use element::*;

mod error;
pub use error::*;

mod line;
pub use line::*;

/// Reference page dimensions and line-sequence helpers for layout drivers
pub mod page;

mod style;
pub use style::*;

mod surface;
pub use surface::*;

mod units;
pub use units::*;
