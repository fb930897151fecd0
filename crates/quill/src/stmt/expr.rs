use super::IntoExpr;
use quill_core::{filter::Where, stmt};

use std::{fmt, marker::PhantomData, ops::Not};

pub struct Expr<T: ?Sized> {
    /// The un-typed expression
    pub(crate) untyped: stmt::Expr,

    /// `T` is the type of the expression
    pub(crate) _p: PhantomData<T>,
}

impl<T: ?Sized> Expr<T> {
    /// Create an expression from the given value.
    pub(crate) fn from_value(value: stmt::Value) -> Self {
        Self::from_untyped(stmt::Expr::Value(value))
    }

    pub fn from_untyped(untyped: impl Into<stmt::Expr>) -> Self {
        Self {
            untyped: untyped.into(),
            _p: PhantomData,
        }
    }

    pub fn cast<U: ?Sized>(self) -> Expr<U> {
        Expr {
            untyped: self.untyped,
            _p: PhantomData,
        }
    }

    pub fn into_untyped(self) -> stmt::Expr {
        self.untyped
    }
}

impl<T> Expr<[T]> {
    pub fn list<I>(items: impl IntoIterator<Item = I>) -> Self
    where
        I: IntoExpr<T>,
    {
        let values = items
            .into_iter()
            .map(|item| match item.into_expr().untyped {
                stmt::Expr::Value(value) => value,
                // Lists hold values only
                _ => stmt::Value::Null,
            })
            .collect();

        Self::from_value(stmt::Value::List(values))
    }
}

impl Expr<bool> {
    pub fn and(self, rhs: impl IntoExpr<bool>) -> Self {
        Self::from_untyped(stmt::Expr::and(self.untyped, rhs.into_expr().untyped))
    }

    pub fn and_all<E>(exprs: impl IntoIterator<Item = E>) -> Self
    where
        E: IntoExpr<bool>,
    {
        exprs
            .into_iter()
            .map(|expr| expr.into_expr().untyped)
            .reduce(stmt::Expr::and)
            .map(Self::from_untyped)
            .unwrap_or_else(|| Self::from_untyped(true))
    }

    pub fn or(self, rhs: impl IntoExpr<bool>) -> Self {
        Self::from_untyped(stmt::Expr::or(self.untyped, rhs.into_expr().untyped))
    }

    pub fn eq(self, rhs: impl IntoExpr<bool>) -> Self {
        Self::from_untyped(stmt::Expr::eq(self.untyped, rhs.into_expr().untyped))
    }

    pub fn ne(self, rhs: impl IntoExpr<bool>) -> Self {
        Self::from_untyped(stmt::Expr::ne(self.untyped, rhs.into_expr().untyped))
    }
}

impl Not for Expr<bool> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::from_untyped(stmt::Expr::not(self.untyped))
    }
}

impl<T: ?Sized> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self {
            untyped: self.untyped.clone(),
            _p: PhantomData,
        }
    }
}

impl<T: ?Sized> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.untyped.fmt(f)
    }
}

impl From<Expr<bool>> for Where {
    fn from(value: Expr<bool>) -> Self {
        Where::Expr(value.untyped)
    }
}
