//! RV32G encoding tables: field extraction, classification, immediates and
//! legality.

pub mod fields;
pub mod immediate;
pub mod legality;
pub mod opcode;

pub use fields::Fields;
pub use immediate::build_immediate;
pub use legality::check;
pub use opcode::{Category, Format, OPCODE_TABLE, classify};
