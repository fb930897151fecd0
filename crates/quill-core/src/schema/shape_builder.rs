use super::{Column, EntityDef, EntityShape, KnownColumns, MemberId, NamingConvention, ShapeKey};
use crate::{Error, Result};

/// Computes an entity's mapping onto its table
struct BuildShape<'a> {
    def: &'a EntityDef,
    convention: &'a NamingConvention,
    known: Option<&'a KnownColumns>,
    table: String,
    columns: Vec<Column>,
}

impl EntityShape {
    /// Builds the shape of a statically typed entity.
    pub fn from_def(
        key: ShapeKey,
        def: &EntityDef,
        convention: &NamingConvention,
        known: Option<&KnownColumns>,
    ) -> Result<EntityShape> {
        let table = convention.table_name(&def.name, def.table.as_deref());
        BuildShape::new(def, convention, known, table).build(key)
    }

    /// Builds the shape of a dynamic record targeting `table` by name. The
    /// table name is used verbatim.
    pub fn from_dynamic(
        key: ShapeKey,
        def: &EntityDef,
        convention: &NamingConvention,
        known: Option<&KnownColumns>,
    ) -> Result<EntityShape> {
        let table = def.table.clone().unwrap_or_else(|| def.name.clone());
        BuildShape::new(def, convention, known, table).build(key)
    }
}

impl<'a> BuildShape<'a> {
    fn new(
        def: &'a EntityDef,
        convention: &'a NamingConvention,
        known: Option<&'a KnownColumns>,
        table: String,
    ) -> Self {
        Self {
            def,
            convention,
            known,
            table,
            columns: vec![],
        }
    }

    fn build(mut self, key: ShapeKey) -> Result<EntityShape> {
        if self.known.is_some_and(KnownColumns::is_empty) {
            return Err(Error::mapping(
                &self.def.name,
                None,
                format!("table `{}` could not be resolved", self.table),
            ));
        }

        self.map_members();

        if self.columns.is_empty() {
            return Err(Error::mapping(
                &self.def.name,
                None,
                "entity has no usable columns",
            ));
        }

        let primary_key = self.primary_key();
        for index in &primary_key {
            self.columns[*index].primary_key = true;
        }

        let identity = self.identity();
        if let Some(index) = identity {
            self.columns[index].identity = true;
        }

        Ok(EntityShape {
            key,
            name: self.def.name.clone(),
            table: self.table,
            columns: self.columns,
            primary_key,
            identity,
            member_count: self.def.members.len(),
        })
    }

    fn map_members(&mut self) {
        for (index, member) in self.def.members.iter().enumerate() {
            let mut name = match &member.column {
                Some(column) => column.clone(),
                None => self.convention.column_name(&member.name),
            };
            let mut ty = member.ty.clone();

            if let Some(known) = self.known {
                let found = known.get(&name).or_else(|| match member.column {
                    Some(_) => None,
                    None => known.get(&member.name),
                });

                let Some(found) = found else {
                    log::debug!(
                        "dropping member `{}.{}`: table `{}` has no matching column",
                        self.def.name,
                        member.name,
                        self.table
                    );
                    continue;
                };

                name = found.name.clone();
                if ty.is_unknown() {
                    if let Some(known_ty) = &found.ty {
                        ty = known_ty.clone();
                    }
                }
            }

            self.columns.push(Column {
                name,
                member: MemberId {
                    index,
                    name: member.name.clone(),
                },
                ty,
                nullable: member.nullable,
                primary_key: false,
                identity: false,
                excluded: member.read_only,
            });
        }
    }

    /// Explicit `#[key]` members, else the key flagged in the known columns,
    /// else the conventional key member.
    fn primary_key(&self) -> Vec<usize> {
        let explicit = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, column)| self.def.members[column.member.index].key)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        if !explicit.is_empty() {
            return explicit;
        }

        if let Some(known) = self.known {
            let flagged = self
                .columns
                .iter()
                .enumerate()
                .filter(|(_, column)| known.get(&column.name).is_some_and(|known| known.primary_key))
                .map(|(index, _)| index)
                .collect::<Vec<_>>();

            if !flagged.is_empty() {
                return flagged;
            }
        }

        let candidates = [
            "id".to_string(),
            format!("{}id", normalize(&self.def.name)),
            format!("{}id", normalize(&self.table)),
        ];

        for candidate in &candidates {
            let found = self.columns.iter().position(|column| {
                normalize(&column.member.name) == *candidate || normalize(&column.name) == *candidate
            });

            if let Some(index) = found {
                return vec![index];
            }
        }

        vec![]
    }

    fn identity(&self) -> Option<usize> {
        self.columns
            .iter()
            .position(|column| self.def.members[column.member.index].auto)
            .or_else(|| {
                let known = self.known?;
                self.columns
                    .iter()
                    .position(|column| known.get(&column.name).is_some_and(|known| known.identity))
            })
    }
}

/// Lowercases and strips underscores so `PersonId`, `person_id` and
/// `PERSONID` compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
