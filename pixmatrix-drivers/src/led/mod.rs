//! LED matrix output

pub mod gamma;
pub mod layout;
pub mod matrix;
pub mod splash;

pub use gamma::{gamma_correct, GAMMA_2_2};
pub use layout::Layout;
pub use matrix::{LedMatrix, MatrixError};
pub use splash::draw_splash;
