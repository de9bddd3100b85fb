/*
[INPUT]:  Request option and response envelope shapes
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for transport communication
[UPDATE]: When the envelope schema changes or new options are added
*/

pub mod envelope;
pub mod options;

pub use envelope::*;
pub use options::*;
