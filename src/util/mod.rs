#![cfg(test)]

pub mod limit;
pub mod tree;
