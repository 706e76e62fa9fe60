//! Value objects - validated, self-contained domain values

mod address;
mod basis_points;
mod funds;
mod timestamp;

pub use address::Address;
pub use basis_points::BasisPoints;
pub use funds::Funds;
pub use timestamp::Timestamp;
