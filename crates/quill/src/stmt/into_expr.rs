use super::{Expr, Path};
use quill_core::stmt::Value;

pub trait IntoExpr<T: ?Sized> {
    fn into_expr(self) -> Expr<T>;

    fn by_ref(&self) -> Expr<T>;
}

macro_rules! impl_into_expr_for_copy {
    ( $( $t:ty ),* ) => {
        $(
            impl IntoExpr<$t> for $t {
                fn into_expr(self) -> Expr<$t> {
                    Expr::from_value(Value::from(self))
                }

                fn by_ref(&self) -> Expr<$t> {
                    Expr::from_value(Value::from(*self))
                }
            }
        )*
    };
}

impl_into_expr_for_copy!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, uuid::Uuid);

impl<T: ?Sized> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Self {
        self
    }

    fn by_ref(&self) -> Self {
        self.clone()
    }
}

impl<T: ?Sized> IntoExpr<T> for Path<T> {
    fn into_expr(self) -> Expr<T> {
        self.to_expr()
    }

    fn by_ref(&self) -> Expr<T> {
        self.to_expr()
    }
}

impl<T: IntoExpr<T> + ?Sized> IntoExpr<T> for &T {
    fn into_expr(self) -> Expr<T> {
        self.by_ref()
    }

    fn by_ref(&self) -> Expr<T> {
        (*self).by_ref()
    }
}

impl<T: IntoExpr<T>> IntoExpr<Self> for Option<T> {
    fn into_expr(self) -> Expr<Self> {
        match self {
            Some(value) => value.into_expr().cast(),
            None => Expr::from_value(Value::Null),
        }
    }

    fn by_ref(&self) -> Expr<Self> {
        match self {
            Some(value) => value.by_ref().cast(),
            None => Expr::from_value(Value::Null),
        }
    }
}

impl<T: IntoExpr<T>> IntoExpr<Option<T>> for T {
    fn into_expr(self) -> Expr<Option<T>> {
        self.into_expr().cast()
    }

    fn by_ref(&self) -> Expr<Option<T>> {
        self.by_ref().cast()
    }
}

impl IntoExpr<String> for &str {
    fn into_expr(self) -> Expr<String> {
        Expr::from_value(Value::from(self))
    }

    fn by_ref(&self) -> Expr<String> {
        Expr::from_value(Value::from(*self))
    }
}

impl IntoExpr<Option<String>> for &str {
    fn into_expr(self) -> Expr<Option<String>> {
        Expr::from_value(Value::from(self))
    }

    fn by_ref(&self) -> Expr<Option<String>> {
        Expr::from_value(Value::from(*self))
    }
}

impl IntoExpr<Self> for String {
    fn into_expr(self) -> Expr<Self> {
        Expr::from_value(self.into())
    }

    fn by_ref(&self) -> Expr<Self> {
        Expr::from_value(self.into())
    }
}

impl<T, U, const N: usize> IntoExpr<[T]> for [U; N]
where
    U: IntoExpr<T>,
{
    fn into_expr(self) -> Expr<[T]> {
        Expr::list(self)
    }

    fn by_ref(&self) -> Expr<[T]> {
        Expr::list(self.iter().map(U::by_ref))
    }
}

impl<T, E: IntoExpr<T>> IntoExpr<[T]> for &[E] {
    fn into_expr(self) -> Expr<[T]> {
        Expr::list(self.iter().map(E::by_ref))
    }

    fn by_ref(&self) -> Expr<[T]> {
        Expr::list(self.iter().map(E::by_ref))
    }
}

impl<T, U> IntoExpr<[T]> for Vec<U>
where
    U: IntoExpr<T>,
{
    fn into_expr(self) -> Expr<[T]> {
        Expr::list(self)
    }

    fn by_ref(&self) -> Expr<[T]> {
        Expr::list(self.iter().map(U::by_ref))
    }
}

#[test]
fn assert_bounds() {
    fn assert_into_expr<T: ?Sized, E: IntoExpr<T>>() {}

    assert_into_expr::<i64, i64>();
    assert_into_expr::<Option<i64>, i64>();
    assert_into_expr::<String, &str>();
    assert_into_expr::<String, &String>();
    assert_into_expr::<[i32], Vec<i32>>();
    assert_into_expr::<[String], [&str; 2]>();
    assert_into_expr::<[i64], &[i64]>();
}
