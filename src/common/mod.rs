pub mod tolerance;

pub use tolerance::Tolerance;
