mod comparison;
mod payload;
mod player;
mod season;
mod stats;

pub use comparison::*;
pub use payload::*;
pub use player::*;
pub use season::*;
pub use stats::*;
