//! Static lookup tables. Built at compile time and never mutated.

pub mod explanations;
pub mod fines;
pub mod topics;

pub use explanations::{ catalog, explain, find_explanation };
pub use fines::{ FINE_TABLE, ViolationFineEntry };
pub use topics::{ CannedTopic, match_topic };
