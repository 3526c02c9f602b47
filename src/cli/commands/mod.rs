pub mod verify;

pub use verify::run_verify;
