pub mod registry;
pub use registry::*;

pub mod entry;
pub use entry::*;

pub mod participant;
pub use participant::*;

pub mod open_round;
pub use open_round::*;

pub mod submit;
pub use submit::*;

pub mod close_round;
pub use close_round::*;

pub mod request_tally;
pub use request_tally::*;

pub mod reveal_batch;
pub use reveal_batch::*;
