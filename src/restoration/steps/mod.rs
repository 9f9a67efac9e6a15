//! Individual restoration steps

pub mod footprint;
pub mod grayscale;
pub mod noise;
pub mod rank;
