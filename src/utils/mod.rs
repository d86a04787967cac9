// src/utils/mod.rs
pub mod clock;
pub mod id_generator;
pub mod seed;
