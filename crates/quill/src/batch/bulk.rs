use crate::Result;

use quill_core::{
    driver::Capability,
    schema::{EntityShape, KnownColumns},
    stmt::Value,
    Error, MappingSide,
};

/// Rows for the driver's native bulk loader.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkLoad {
    pub table: String,

    /// Destination columns, in the order of each row's values
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Maps an entity member (or its column) to a destination table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub source: String,
    pub destination: String,
}

impl ColumnMapping {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// A validated column map: for each destination, the shape column feeding it.
#[derive(Debug)]
pub(super) struct ResolvedMapping {
    pub(super) sources: Vec<usize>,
    pub(super) destinations: Vec<String>,
}

/// Checks a bulk load against the driver and the shape before any row is
/// converted.
pub(super) fn validate(
    shape: &EntityShape,
    capability: &Capability,
    known: Option<&KnownColumns>,
    mapping: Option<&[ColumnMapping]>,
) -> Result<ResolvedMapping> {
    if !capability.bulk_load {
        return Err(Error::invalid_operation(
            &shape.name,
            "the driver has no native bulk loader",
        ));
    }

    if known.is_some_and(KnownColumns::is_empty) {
        return Err(Error::invalid_operation(
            &shape.name,
            format!("bulk load target table `{}` could not be resolved", shape.table),
        ));
    }

    let Some(mapping) = mapping else {
        return Ok(default_mapping(shape, known));
    };

    if mapping.is_empty() {
        return Err(Error::invalid_operation(&shape.name, "bulk column map is empty"));
    }

    let mut resolved = ResolvedMapping {
        sources: Vec::with_capacity(mapping.len()),
        destinations: Vec::with_capacity(mapping.len()),
    };

    for entry in mapping {
        let Some(source) = shape.column_index(&entry.source) else {
            return Err(Error::invalid_bulk_mapping(
                &shape.name,
                MappingSide::Source,
                &entry.source,
            ));
        };

        let destination = match known {
            Some(known) => known.get(&entry.destination).map(|column| column.name.clone()),
            None => shape
                .columns
                .iter()
                .find(|column| column.name.eq_ignore_ascii_case(&entry.destination))
                .map(|column| column.name.clone()),
        };

        let Some(destination) = destination else {
            return Err(Error::invalid_bulk_mapping(
                &shape.name,
                MappingSide::Destination,
                &entry.destination,
            ));
        };

        if resolved
            .destinations
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(&destination))
        {
            return Err(Error::duplicate_bulk_destination(&shape.name, &entry.destination));
        }

        resolved.sources.push(source);
        resolved.destinations.push(destination);
    }

    Ok(resolved)
}

/// Every insertable column, loaded into the column of the same name.
fn default_mapping(shape: &EntityShape, known: Option<&KnownColumns>) -> ResolvedMapping {
    let mut resolved = ResolvedMapping {
        sources: vec![],
        destinations: vec![],
    };

    for (index, column) in shape.columns.iter().enumerate() {
        if !column.is_writable() {
            continue;
        }

        let destination = known
            .and_then(|known| known.get(&column.name))
            .map_or_else(|| column.name.clone(), |known| known.name.clone());

        resolved.sources.push(index);
        resolved.destinations.push(destination);
    }

    resolved
}

impl ResolvedMapping {
    /// Converts one row, given in shape column order, into destination order.
    pub(super) fn convert(&self, shape: &EntityShape, row: &[Value]) -> Result<Vec<Value>> {
        if row.len() != shape.columns.len() {
            return Err(Error::invalid_operation(
                &shape.name,
                format!(
                    "row has {} values; table `{}` maps {} columns",
                    row.len(),
                    shape.table,
                    shape.columns.len()
                ),
            ));
        }

        self.sources
            .iter()
            .map(|&index| {
                let column = &shape.columns[index];
                let value = &row[index];
                column
                    .ty
                    .cast(value.clone())
                    .map_err(|_| Error::conversion(&shape.name, &column.name, value, &column.ty))
            })
            .collect()
    }
}
