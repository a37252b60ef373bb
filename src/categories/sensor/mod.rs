//! Sensor blocks

pub mod bmp280;

pub use bmp280::{Bmp280ReadBlock, Bmp280Reading, I2cAddress};
