//! BMP280 temperature and pressure blocks
//!
//! Two value blocks, one per measurement, each with a single `addr` dropdown
//! restricted to the sensor's two I2C addresses. Both generate a call on the
//! runtime's I2C bus object:
//!
//! ```text
//! DEV_I2C1.BMP280(0, 0x76).readTemperature()
//! DEV_I2C1.BMP280(0, 0x77).readPressure()
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::codegen::{CodeGenerator, Expr, GenerateError, GeneratedCode, Order};
use crate::core::block::{BlockDefinition, OutputType};
use crate::core::field::{DropdownOption, FieldSpec};
use crate::core::instance::BlockInstance;
use crate::core::registry::{BlockRegistry, RegistryError};

pub const TEMPERATURE_KIND: &str = "bmp280_read_temperature";
pub const PRESSURE_KIND: &str = "bmp280_read_pressure";

/// Name of the address dropdown
pub const ADDR_FIELD: &str = "addr";

/// Hue shared by both blocks
pub const COLOUR: u16 = 135;

/// Runtime object exposing the first I2C bus
pub const DRIVER_OBJECT: &str = "DEV_I2C1";

/// Bus channel passed to the device constructor
pub const BUS_INDEX: i64 = 0;

/// I2C address of a BMP280, selected by the SDO pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum I2cAddress {
    /// SDO tied to GND
    #[serde(rename = "0x76")]
    Primary,
    /// SDO tied to VDDIO
    #[serde(rename = "0x77")]
    Secondary,
}

impl I2cAddress {
    /// Every address, in dropdown order
    pub const ALL: [I2cAddress; 2] = [I2cAddress::Primary, I2cAddress::Secondary];

    /// Hex literal as it appears in the dropdown and in emitted code
    pub fn as_str(self) -> &'static str {
        match self {
            I2cAddress::Primary => "0x76",
            I2cAddress::Secondary => "0x77",
        }
    }
}

impl std::fmt::Display for I2cAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that is not one of the two BMP280 addresses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a BMP280 address (expected 0x76 or 0x77)")]
pub struct InvalidAddress(pub String);

impl FromStr for I2cAddress {
    type Err = InvalidAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        I2cAddress::ALL
            .into_iter()
            .find(|addr| addr.as_str() == s)
            .ok_or_else(|| InvalidAddress(s.to_string()))
    }
}


/// Measurement read by a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bmp280Reading {
    Temperature,
    Pressure,
}

impl Bmp280Reading {
    pub const ALL: [Bmp280Reading; 2] = [Bmp280Reading::Temperature, Bmp280Reading::Pressure];

    /// Block kind key
    pub fn kind(self) -> &'static str {
        match self {
            Bmp280Reading::Temperature => TEMPERATURE_KIND,
            Bmp280Reading::Pressure => PRESSURE_KIND,
        }
    }

    /// Driver method returning the measurement
    pub fn method(self) -> &'static str {
        match self {
            Bmp280Reading::Temperature => "readTemperature",
            Bmp280Reading::Pressure => "readPressure",
        }
    }

    /// Localized message reference resolved by the editor
    pub fn message_ref(self) -> &'static str {
        match self {
            Bmp280Reading::Temperature => "%{BKY_BMP280_READ_TEMPERATURE_MESSAGE}",
            Bmp280Reading::Pressure => "%{BKY_BMP280_READ_PRESSURE_MESSAGE}",
        }
    }

    /// Localized tooltip reference resolved by the editor
    pub fn tooltip_ref(self) -> &'static str {
        match self {
            Bmp280Reading::Temperature => "%{BKY_BMP280_READ_TEMPERATURE_TOOLTIP}",
            Bmp280Reading::Pressure => "%{BKY_BMP280_READ_PRESSURE_TOOLTIP}",
        }
    }
}

/// Schema for the block reading `reading`
pub fn definition(reading: Bmp280Reading) -> BlockDefinition {
    BlockDefinition::new(reading.kind(), reading.message_ref(), OutputType::Number)
        .with_field(FieldSpec::dropdown(
            ADDR_FIELD,
            I2cAddress::ALL
                .into_iter()
                .map(|addr| DropdownOption::same(addr.as_str()))
                .collect(),
        ))
        .with_colour(COLOUR)
        .with_tooltip(reading.tooltip_ref())
}

/// `DEV_I2C1.BMP280(0, <addr>).<method>()`
pub fn read_expression(reading: Bmp280Reading, addr: I2cAddress) -> Expr {
    Expr::ident(DRIVER_OBJECT)
        .method("BMP280", vec![Expr::int(BUS_INDEX), Expr::token(addr.as_str())])
        .method(reading.method(), vec![])
}

/// Generator shared by both BMP280 blocks
#[derive(Debug, Clone, Copy)]
pub struct Bmp280ReadBlock {
    reading: Bmp280Reading,
}

impl Bmp280ReadBlock {
    pub fn new(reading: Bmp280Reading) -> Self {
        Self { reading }
    }

    /// Read the typed address off an instance
    ///
    /// Values outside the dropdown are rejected rather than passed through.
    pub fn address(&self, instance: &BlockInstance) -> Result<I2cAddress, GenerateError> {
        let kind = self.reading.kind();
        let value = instance
            .field(ADDR_FIELD)
            .ok_or_else(|| GenerateError::MissingField {
                kind: kind.to_string(),
                field: ADDR_FIELD.to_string(),
            })?;

        let parsed = match value.as_string() {
            Some(raw) => raw.parse::<I2cAddress>(),
            None => Err(InvalidAddress(value.to_string())),
        };
        parsed.map_err(|e| GenerateError::InvalidFieldValue {
            kind: kind.to_string(),
            field: ADDR_FIELD.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }
}

impl CodeGenerator for Bmp280ReadBlock {
    fn generate(&self, instance: &BlockInstance) -> Result<GeneratedCode, GenerateError> {
        if instance.kind != self.reading.kind() {
            return Err(GenerateError::KindMismatch {
                expected: self.reading.kind().to_string(),
                found: instance.kind.clone(),
            });
        }
        let addr = self.address(instance)?;
        // A bare call chain is unambiguous in every context.
        Ok(GeneratedCode::from_expr(
            &read_expression(self.reading, addr),
            Order::None,
        ))
    }
}

/// Register both BMP280 blocks
pub fn register(registry: &BlockRegistry) -> Result<(), RegistryError> {
    for reading in Bmp280Reading::ALL {
        registry.register(
            reading.kind(),
            definition(reading),
            Arc::new(Bmp280ReadBlock::new(reading)),
        )?;
    }
    Ok(())
}
