//! Property-based tests using proptest.
//!
//! These tests verify invariants that must hold for *any* input, catching
//! edge cases that hand-written tests miss.

use proptest::prelude::*;

use crate::categories::builtin_registry;
use crate::categories::sensor::bmp280::{Bmp280Reading, I2cAddress, ADDR_FIELD};
use crate::codegen::{CodeAssembler, GenerateError, Order};
use crate::core::instance::BlockInstance;

fn reading() -> impl Strategy<Value = Bmp280Reading> {
    prop_oneof![Just(Bmp280Reading::Temperature), Just(Bmp280Reading::Pressure)]
}

fn address() -> impl Strategy<Value = I2cAddress> {
    prop_oneof![Just(I2cAddress::Primary), Just(I2cAddress::Secondary)]
}

proptest! {
    /// Valid instances always emit the fixed call chain, whatever their id.
    #[test]
    fn valid_instances_emit_exact_code(
        reading in reading(),
        addr in address(),
        id in "[A-Za-z0-9#:]{1,20}",
    ) {
        let registry = builtin_registry().unwrap();
        let mut inst = BlockInstance::new(reading.kind()).with_field(ADDR_FIELD, addr.as_str());
        inst.id = id.as_str().into();

        let generated = CodeAssembler::new(&registry).generate_instance(&inst).unwrap();
        prop_assert_eq!(
            generated.code,
            format!("DEV_I2C1.BMP280(0, {}).{}()", addr.as_str(), reading.method())
        );
        prop_assert_eq!(generated.order, Order::None);
    }

    /// Any address text other than the two literals fails closed.
    #[test]
    fn foreign_addresses_are_rejected(reading in reading(), raw in ".{0,8}") {
        prop_assume!(raw != "0x76" && raw != "0x77");

        let registry = builtin_registry().unwrap();
        let inst = BlockInstance::new(reading.kind()).with_field(ADDR_FIELD, raw.as_str());

        let is_invalid_value = matches!(
            CodeAssembler::new(&registry).generate_instance(&inst),
            Err(GenerateError::InvalidFieldValue { .. })
        );
        prop_assert!(is_invalid_value);
        prop_assert!(!registry.validate_instance(&inst).unwrap().valid);
    }

    /// Emitted code never contains whitespace other than the single space
    /// after the bus index.
    #[test]
    fn emitted_code_has_one_space(reading in reading(), addr in address()) {
        let registry = builtin_registry().unwrap();
        let inst = BlockInstance::new(reading.kind()).with_field(ADDR_FIELD, addr.as_str());
        let code = CodeAssembler::new(&registry).generate_instance(&inst).unwrap().code;

        prop_assert_eq!(code.chars().filter(|c| c.is_whitespace()).count(), 1);
        prop_assert!(code.contains("(0, "));
    }
}
