//! Operator precedence for generated JavaScript
//!
//! Values follow the editor's JavaScript generator: lower binds tighter. The
//! fractional part distinguishes operators of one precedence class.

use serde::Serialize;

/// Binding order of a generated expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Order {
    Atomic,
    New,
    Member,
    FunctionCall,
    Increment,
    Decrement,
    BitwiseNot,
    UnaryPlus,
    UnaryNegation,
    LogicalNot,
    Typeof,
    Void,
    Delete,
    Await,
    Exponentiation,
    Multiplication,
    Division,
    Modulus,
    Subtraction,
    Addition,
    BitwiseShift,
    Relational,
    In,
    Instanceof,
    Equality,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    LogicalAnd,
    LogicalOr,
    Conditional,
    Assignment,
    Yield,
    Comma,
    /// Never needs parentheses in any context
    None,
}

/// (outer, inner) pairs that do not need parentheses even though the inner
/// order is not tighter than the outer one, e.g. `a.b().c` or `a * b * c`.
const ORDER_OVERRIDES: &[(Order, Order)] = &[
    (Order::FunctionCall, Order::Member),
    (Order::FunctionCall, Order::FunctionCall),
    (Order::Member, Order::Member),
    (Order::Member, Order::FunctionCall),
    (Order::LogicalNot, Order::LogicalNot),
    (Order::Multiplication, Order::Multiplication),
    (Order::Addition, Order::Addition),
    (Order::LogicalAnd, Order::LogicalAnd),
    (Order::LogicalOr, Order::LogicalOr),
];

impl Order {
    /// Numeric precedence
    pub fn precedence(self) -> f64 {
        match self {
            Order::Atomic => 0.0,
            Order::New => 1.1,
            Order::Member => 1.2,
            Order::FunctionCall => 2.0,
            Order::Increment | Order::Decrement => 3.0,
            Order::BitwiseNot => 4.1,
            Order::UnaryPlus => 4.2,
            Order::UnaryNegation => 4.3,
            Order::LogicalNot => 4.4,
            Order::Typeof => 4.5,
            Order::Void => 4.6,
            Order::Delete => 4.7,
            Order::Await => 4.8,
            Order::Exponentiation => 5.0,
            Order::Multiplication => 5.1,
            Order::Division => 5.2,
            Order::Modulus => 5.3,
            Order::Subtraction => 6.1,
            Order::Addition => 6.2,
            Order::BitwiseShift => 7.0,
            Order::Relational | Order::In | Order::Instanceof => 8.0,
            Order::Equality => 9.0,
            Order::BitwiseAnd => 10.0,
            Order::BitwiseXor => 11.0,
            Order::BitwiseOr => 12.0,
            Order::LogicalAnd => 13.0,
            Order::LogicalOr => 14.0,
            Order::Conditional => 15.0,
            Order::Assignment => 16.0,
            Order::Yield => 17.0,
            Order::Comma => 18.0,
            Order::None => 99.0,
        }
    }

    /// Precedence class, the integer part of the precedence
    pub fn class(self) -> u8 {
        self.precedence().floor() as u8
    }

    /// Whether an expression of order `self` needs parentheses when it is
    /// placed into a slot of order `outer`
    pub fn needs_parens_in(self, outer: Order) -> bool {
        let inner_class = self.class();
        let outer_class = outer.class();

        if outer_class > inner_class {
            return false;
        }
        // ATOMIC inside ATOMIC and NONE inside NONE stay bare.
        if outer_class == inner_class && (outer_class == 0 || outer_class == 99) {
            return false;
        }
        !ORDER_OVERRIDES.contains(&(outer, self))
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({})", self, self.precedence())
    }
}
