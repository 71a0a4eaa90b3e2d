pub mod helpers;

pub mod arrays;
pub mod closures;
pub mod control_flow;
pub mod errors;
pub mod lifecycle;
pub mod maps;
pub mod natives;
pub mod operators;
pub mod strings;
pub mod structs;
pub mod unicode;
pub mod variables;
