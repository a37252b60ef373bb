//! Minimal JavaScript expression tree
//!
//! Enough structure to build member-call chains such as
//! `DEV_I2C1.BMP280(0, 0x76).readTemperature()` without string splicing.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Bare identifier
    Ident(String),
    /// Integer literal in decimal
    Int(i64),
    /// Literal token emitted verbatim, e.g. `0x76`
    Token(String),
    /// `object.property`
    Member { object: Box<Expr>, property: String },
    /// `callee(arg, ...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Int(value)
    }

    pub fn token(text: impl Into<String>) -> Self {
        Expr::Token(text.into())
    }

    /// Access a property of this expression
    pub fn member(self, property: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(self),
            property: property.into(),
        }
    }

    /// Call this expression
    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(self),
            args,
        }
    }

    /// Shorthand for `self.method(args)`
    pub fn method(self, name: impl Into<String>, args: Vec<Expr>) -> Self {
        self.member(name).call(args)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => f.write_str(name),
            Expr::Int(value) => write!(f, "{}", value),
            Expr::Token(text) => f.write_str(text),
            Expr::Member { object, property } => write!(f, "{}.{}", object, property),
            Expr::Call { callee, args } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
