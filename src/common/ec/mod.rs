mod encoder;
pub mod galois;

pub use encoder::*;
