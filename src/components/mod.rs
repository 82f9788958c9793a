//! Page components.

pub mod deep_sea;
