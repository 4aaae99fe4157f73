pub mod non_empty;
pub mod set;
pub mod vector;
