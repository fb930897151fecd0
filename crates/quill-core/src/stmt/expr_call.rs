use super::Expr;

use std::fmt;

/// A method call on a receiver expression.
///
/// Only the methods named by [`Method`] translate; anything else arrives as
/// [`Method::Other`] and is rejected by the translator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    pub receiver: Box<Expr>,
    pub method: Method,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// `string.contains(substring)` or `list.contains(field)`
    Contains,

    /// `string.starts_with(prefix)`
    StartsWith,

    /// `string.ends_with(suffix)`
    EndsWith,

    /// `string.like(pattern)`, the pattern is used verbatim
    Like,

    /// `field.between(low, high)`, inclusive on both ends
    Between,

    /// Any other method
    Other(String),
}

impl Expr {
    pub fn call(receiver: impl Into<Self>, method: Method, args: Vec<Self>) -> Self {
        ExprCall {
            receiver: Box::new(receiver.into()),
            method,
            args,
        }
        .into()
    }

    pub fn contains(receiver: impl Into<Self>, arg: impl Into<Self>) -> Self {
        Expr::call(receiver, Method::Contains, vec![arg.into()])
    }

    pub fn starts_with(receiver: impl Into<Self>, arg: impl Into<Self>) -> Self {
        Expr::call(receiver, Method::StartsWith, vec![arg.into()])
    }

    pub fn ends_with(receiver: impl Into<Self>, arg: impl Into<Self>) -> Self {
        Expr::call(receiver, Method::EndsWith, vec![arg.into()])
    }

    pub fn like(receiver: impl Into<Self>, pattern: impl Into<Self>) -> Self {
        Expr::call(receiver, Method::Like, vec![pattern.into()])
    }

    pub fn between(receiver: impl Into<Self>, low: impl Into<Self>, high: impl Into<Self>) -> Self {
        Expr::call(receiver, Method::Between, vec![low.into(), high.into()])
    }
}

impl From<ExprCall> for Expr {
    fn from(value: ExprCall) -> Self {
        Self::Call(value)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contains => "contains".fmt(f),
            Self::StartsWith => "starts_with".fmt(f),
            Self::EndsWith => "ends_with".fmt(f),
            Self::Like => "like".fmt(f),
            Self::Between => "between".fmt(f),
            Self::Other(name) => name.fmt(f),
        }
    }
}
