//! Serial output

pub mod mirror;

pub use mirror::MatrixMirror;
