//! Feature transforms applied before model fitting.

mod whitening;

pub use whitening::{PcaWhitening, WhiteningError};
