//! Engine-level services shared by applications

pub mod config;
