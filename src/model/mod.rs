pub mod holding;
pub mod position;
pub mod profile;

pub use holding::Holding;
pub use position::{Position, PositionBook};
pub use profile::Profile;
