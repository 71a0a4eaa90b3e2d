//! Instruction execution handlers

mod arithmetic;
mod collections;
mod comparison;
mod control;
mod functions;
mod increments;
mod iterators;
mod structs;
mod variables;
