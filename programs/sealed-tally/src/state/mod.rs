pub mod entry;
pub mod events;
pub mod participant;
pub mod registry;
pub mod round;
pub mod submission;
pub mod tally_request;

pub use entry::*;
pub use events::*;
pub use participant::*;
pub use registry::*;
pub use round::*;
pub use submission::*;
pub use tally_request::*;
