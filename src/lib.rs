//! Call emission for a stack-machine compiler backend, along with a reference driver and
//! a listing verifier.

pub mod codegen;
pub mod driver;
pub mod fmt;
pub mod machine;
pub mod source;
pub mod symbol;
pub mod term;
