mod booking;
mod dashboard;
mod invoice;
mod outcome;
mod trust;

pub use booking::*;
pub use dashboard::*;
pub use invoice::*;
pub use outcome::*;
pub use trust::*;
