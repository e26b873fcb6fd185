mod parameters;
mod tank;

pub use parameters::*;
pub use tank::*;
