#[macro_use]
mod fmt;
use fmt::ToSql;

mod condition;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod hint;

mod ident;
use ident::Ident;

mod params;
pub use params::{Binder, Params, Placeholder};

// Fragment serializers
mod statement;

use crate::stmt::Statement;

use quill_core::driver::{Capability, Dialect};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,

    /// What the driver supports; decides IN-list rendering.
    capability: &'a Capability,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl<'a> Serializer<'a> {
    pub fn new(dialect: Dialect, capability: &'a Capability) -> Serializer<'a> {
        Serializer {
            flavor: Flavor::from(dialect),
            capability,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.flavor.into()
    }

    pub fn capability(&self) -> &'a Capability {
        self.capability
    }

    /// Serializes `stmt`, pushing its values into `params`. Every statement,
    /// including each statement of a batch, ends with `;`.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
        };

        match stmt {
            Statement::Batch(stmts) => {
                let mut s = "";
                for stmt in stmts {
                    fmt!(&mut fmt, s stmt ";");
                    s = " ";
                }
            }
            stmt => fmt!(&mut fmt, stmt ";"),
        }

        ret
    }

    /// Renders a placeholder as it appears in SQL text.
    pub fn placeholder(&self, placeholder: &Placeholder) -> String {
        match self.flavor {
            Flavor::Mysql => "?".to_string(),
            Flavor::Postgresql => format!("${}", placeholder.index),
            Flavor::Sqlite => format!("?{}", placeholder.index),
            Flavor::SqlServer => format!("@{}", placeholder.name),
        }
    }

    /// Checks table hints against the dialect's whitelist, returning them
    /// upper-cased.
    pub fn validate_hints(&self, hints: &[String]) -> Result<Vec<String>, String> {
        hints.iter().map(|hint| self.flavor.validate_hint(hint)).collect()
    }
}
