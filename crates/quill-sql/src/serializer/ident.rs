use super::{Flavor, Formatter, Params, ToSql};

/// A quoted identifier
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let (open, close) = match f.serializer.flavor {
            Flavor::Postgresql | Flavor::Sqlite => ('"', '"'),
            Flavor::Mysql => ('`', '`'),
            Flavor::SqlServer => ('[', ']'),
        };

        f.dst.push(open);
        for c in self.0.as_ref().chars() {
            // The closing quote is escaped by doubling it
            if c == close {
                f.dst.push(close);
            }
            f.dst.push(c);
        }
        f.dst.push(close);
    }
}
