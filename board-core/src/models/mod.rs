mod attachment;
mod board;
mod field;
mod participant;

pub use attachment::*;
pub use board::*;
pub use field::*;
pub use participant::*;
