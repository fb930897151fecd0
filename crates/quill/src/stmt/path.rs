use super::{Expr, IntoExpr, OrderBy};
use quill_core::{filter::Where, stmt};

use std::{fmt, marker::PhantomData};

/// A typed reference to an entity member, by member name.
pub struct Path<T: ?Sized> {
    name: &'static str,
    _p: PhantomData<T>,
}

impl<T: ?Sized> Path<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _p: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn to_expr(&self) -> Expr<T> {
        Expr::from_untyped(stmt::Expr::field(self.name))
    }

    fn untyped(&self) -> stmt::Expr {
        stmt::Expr::field(self.name)
    }

    pub fn eq(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::eq(self.untyped(), rhs.into_expr().untyped))
    }

    pub fn ne(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ne(self.untyped(), rhs.into_expr().untyped))
    }

    pub fn gt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::gt(self.untyped(), rhs.into_expr().untyped))
    }

    pub fn ge(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ge(self.untyped(), rhs.into_expr().untyped))
    }

    pub fn lt(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::lt(self.untyped(), rhs.into_expr().untyped))
    }

    pub fn le(self, rhs: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::le(self.untyped(), rhs.into_expr().untyped))
    }

    pub fn between(self, low: impl IntoExpr<T>, high: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::between(
            self.untyped(),
            low.into_expr().untyped,
            high.into_expr().untyped,
        ))
    }

    pub fn in_set(self, rhs: impl IntoExpr<[T]>) -> Expr<bool>
    where
        T: Sized,
    {
        Expr::from_untyped(stmt::Expr::in_list(
            self.untyped(),
            rhs.into_expr().untyped,
        ))
    }

    pub fn is_null(self) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::is_null(self.untyped()))
    }

    pub fn is_not_null(self) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::is_not_null(self.untyped()))
    }

    pub fn asc(self) -> OrderBy {
        OrderBy::asc(self.name)
    }

    pub fn desc(self) -> OrderBy {
        OrderBy::desc(self.name)
    }
}

impl Path<String> {
    pub fn contains(self, rhs: impl IntoExpr<String>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::contains(
            self.untyped(),
            rhs.into_expr().untyped,
        ))
    }

    pub fn starts_with(self, rhs: impl IntoExpr<String>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::starts_with(
            self.untyped(),
            rhs.into_expr().untyped,
        ))
    }

    pub fn ends_with(self, rhs: impl IntoExpr<String>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::ends_with(
            self.untyped(),
            rhs.into_expr().untyped,
        ))
    }

    /// SQL `LIKE`, with `\` as the escape character.
    pub fn like(self, pattern: impl IntoExpr<String>) -> Expr<bool> {
        Expr::from_untyped(stmt::Expr::like(
            self.untyped(),
            pattern.into_expr().untyped,
        ))
    }
}

impl<T: ?Sized> Clone for Path<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Path<T> {}

impl<T: ?Sized> fmt::Debug for Path<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&self.name).finish()
    }
}

/// A boolean member used directly as a filter.
impl From<Path<bool>> for Where {
    fn from(value: Path<bool>) -> Self {
        Where::Expr(value.untyped())
    }
}

impl From<Path<bool>> for Expr<bool> {
    fn from(value: Path<bool>) -> Self {
        value.to_expr()
    }
}
