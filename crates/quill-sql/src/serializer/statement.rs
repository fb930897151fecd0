use super::hint::{TableHints, TrailingHints};
use super::{Comma, Flavor, Formatter, Ident, Params, ToSql};

use crate::stmt::{
    Aggregate, Delete, Direction, Insert, OrderBy, Param, Projection, Select, Statement, Truncate,
    Update, Upsert,
};

impl ToSql for &Statement {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::Truncate(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
            Statement::Upsert(stmt) => stmt.to_sql(f),
            Statement::Batch(stmts) => {
                let mut s = "";
                for stmt in stmts {
                    fmt!(f, s stmt);
                    s = "; ";
                }
            }
        }
    }
}

impl ToSql for &Select {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);
        let sql_server = f.serializer.is_sql_server();

        fmt!(f, "SELECT ");

        // SQL Server has no LIMIT; a limit without an offset becomes TOP
        if let (true, Some(limit)) = (sql_server, self.limit) {
            if limit.offset.is_none() {
                fmt!(f, "TOP (" limit.limit ") ");
            }
        }

        fmt!(f, &self.projection " FROM " table TableHints(&self.hints));

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }

        if let Some(limit) = self.limit {
            match (sql_server, limit.offset) {
                (true, None) => {}
                (true, Some(offset)) => {
                    fmt!(f, " OFFSET " offset " ROWS FETCH NEXT " limit.limit " ROWS ONLY")
                }
                (false, None) => fmt!(f, " LIMIT " limit.limit),
                (false, Some(offset)) => fmt!(f, " LIMIT " limit.limit " OFFSET " offset),
            }
        }

        fmt!(f, TrailingHints(&self.hints));
    }
}

impl ToSql for &Projection {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Projection::Columns(columns) => fmt!(f, Comma(columns.iter().map(Ident))),
            Projection::Aggregate {
                func,
                column,
                float,
            } => {
                let func = match func {
                    Aggregate::Count if f.serializer.is_sql_server() => "COUNT_BIG(",
                    Aggregate::Count => "COUNT(",
                    Aggregate::Sum => "SUM(",
                    Aggregate::Avg => "AVG(",
                    Aggregate::Min => "MIN(",
                    Aggregate::Max => "MAX(",
                };

                fmt!(f, func);

                match column {
                    None => fmt!(f, "*"),
                    Some(column) if *float => {
                        let float_ty = match f.serializer.flavor {
                            Flavor::Postgresql => "DOUBLE PRECISION",
                            Flavor::Sqlite => "REAL",
                            Flavor::Mysql => "DOUBLE",
                            Flavor::SqlServer => "FLOAT",
                        };
                        fmt!(f, "CAST(" Ident(column) " AS " float_ty ")")
                    }
                    Some(column) => fmt!(f, Ident(column)),
                }

                fmt!(f, ")");
            }
        }
    }
}

impl ToSql for &OrderBy {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let direction = match self.direction {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        };
        fmt!(f, Ident(&self.field) direction);
    }
}

/// `OUTPUT INSERTED.[a], INSERTED.[b]`
struct Output<'a>(&'a [String]);

impl ToSql for Output<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if f.serializer.is_sql_server() && !self.0.is_empty() {
            let mut s = " OUTPUT ";
            for column in self.0 {
                fmt!(f, s "INSERTED." Ident(column));
                s = ", ";
            }
        }
    }
}

/// `RETURNING "a", "b"`
struct Returning<'a>(&'a [String]);

impl ToSql for Returning<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        if !f.serializer.is_sql_server() && !self.0.is_empty() {
            fmt!(f, " RETURNING " Comma(self.0.iter().map(Ident)));
        }
    }
}

/// `(?1, ?2)`
struct Row<'a>(&'a [Param]);

impl ToSql for Row<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "(" Comma(self.0) ")");
    }
}

impl ToSql for &Insert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        fmt!(f, "INSERT INTO " table);

        if self.columns.is_empty() {
            match f.serializer.flavor {
                Flavor::Mysql => fmt!(f, " () VALUES ()"),
                _ => fmt!(f, Output(&self.returning) " DEFAULT VALUES" Returning(&self.returning)),
            }
            return;
        }

        let columns = Comma(self.columns.iter().map(Ident));
        let rows = Comma(self.rows.iter().map(|row| Row(row)));

        fmt!(f, " (" columns ")" Output(&self.returning) " VALUES " rows Returning(&self.returning));
    }
}

impl ToSql for &Update {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        fmt!(f, "UPDATE " table " SET ");

        let mut s = "";
        for assignment in &self.assignments {
            let value = &assignment.value;
            fmt!(f, s Ident(&assignment.column) " = " value);
            s = ", ";
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}

impl ToSql for &Delete {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        fmt!(f, "DELETE FROM " table);

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}

impl ToSql for &Truncate {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = Ident(&self.table);

        if f.serializer.is_sqlite() {
            fmt!(f, "DELETE FROM " table);
        } else {
            fmt!(f, "TRUNCATE TABLE " table);
        }
    }
}

impl ToSql for &Upsert {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match f.serializer.flavor {
            Flavor::Postgresql | Flavor::Sqlite => upsert_on_conflict(self, f),
            Flavor::Mysql => upsert_on_duplicate_key(self, f),
            Flavor::SqlServer => merge(self, f),
        }
    }
}

impl Upsert {
    /// Params of `insert_columns`, in that order.
    fn insert_params(&self) -> Vec<&Param> {
        self.insert_columns
            .iter()
            .filter_map(|name| {
                let index = self.columns.iter().position(|column| column == name)?;
                self.row.get(index)
            })
            .collect()
    }
}

fn upsert_on_conflict<P: Params>(stmt: &Upsert, f: &mut Formatter<'_, P>) {
    let table = Ident(&stmt.table);
    let columns = Comma(stmt.insert_columns.iter().map(Ident));
    let values = Comma(stmt.insert_params());
    let qualifiers = Comma(stmt.qualifiers.iter().map(Ident));

    fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ") ON CONFLICT (" qualifiers ") DO UPDATE SET ");

    // Updating a qualifier to itself keeps RETURNING working when there is
    // nothing else to update
    let update_columns = if stmt.update_columns.is_empty() {
        &stmt.qualifiers[..1.min(stmt.qualifiers.len())]
    } else {
        &stmt.update_columns[..]
    };

    let mut s = "";
    for column in update_columns {
        fmt!(f, s Ident(column) " = EXCLUDED." Ident(column));
        s = ", ";
    }

    fmt!(f, Returning(&stmt.returning));
}

fn upsert_on_duplicate_key<P: Params>(stmt: &Upsert, f: &mut Formatter<'_, P>) {
    let table = Ident(&stmt.table);
    let columns = Comma(stmt.insert_columns.iter().map(Ident));
    let values = Comma(stmt.insert_params());

    fmt!(f, "INSERT INTO " table " (" columns ") VALUES (" values ") ON DUPLICATE KEY UPDATE ");

    let mut s = "";

    // Makes LAST_INSERT_ID() report the existing row's identity
    if let Some(identity) = &stmt.identity {
        fmt!(f, Ident(identity) " = LAST_INSERT_ID(" Ident(identity) ")");
        s = ", ";
    }

    let update_columns = if stmt.update_columns.is_empty() && s.is_empty() {
        &stmt.qualifiers[..1.min(stmt.qualifiers.len())]
    } else {
        &stmt.update_columns[..]
    };

    for column in update_columns {
        fmt!(f, s Ident(column) " = VALUES(" Ident(column) ")");
        s = ", ";
    }
}

fn merge<P: Params>(stmt: &Upsert, f: &mut Formatter<'_, P>) {
    let table = Ident(&stmt.table);

    fmt!(f, "MERGE INTO " table " AS T USING (SELECT ");

    let mut s = "";
    for (column, param) in stmt.columns.iter().zip(&stmt.row) {
        fmt!(f, s param " AS " Ident(column));
        s = ", ";
    }

    fmt!(f, ") AS S ON (");

    let mut s = "";
    for qualifier in &stmt.qualifiers {
        fmt!(f, s "T." Ident(qualifier) " = S." Ident(qualifier));
        s = " AND ";
    }

    fmt!(f, ")");

    if !stmt.update_columns.is_empty() {
        fmt!(f, " WHEN MATCHED THEN UPDATE SET ");

        let mut s = "";
        for column in &stmt.update_columns {
            fmt!(f, s "T." Ident(column) " = S." Ident(column));
            s = ", ";
        }
    }

    fmt!(f, " WHEN NOT MATCHED THEN INSERT");

    if stmt.insert_columns.is_empty() {
        fmt!(f, " DEFAULT VALUES");
    } else {
        let columns = Comma(stmt.insert_columns.iter().map(Ident));
        fmt!(f, " (" columns ") VALUES (");

        let mut s = "";
        for column in &stmt.insert_columns {
            fmt!(f, s "S." Ident(column));
            s = ", ";
        }

        fmt!(f, ")");
    }

    fmt!(f, Output(&stmt.returning));
}
