use tinydb_diagnostic::span::Span;
use tinydb_diagnostic::{Diagnostic, IntoDiagnostic, Snippet};
use tinydb_frontend::ast::{ColumnSpec, CreateTable};
use tinydb_interner::{Interner, Istr};
use tinydb_utils::declare_key_type;
use tinydb_utils::keyvec::KeyVec;

declare_key_type! { pub struct TableId; }

/// Tables defined during the session, in definition order.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: KeyVec<TableId, TableSchema>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: Istr,
    pub columns: Vec<ColumnSpec>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("table already exists")]
    TableExists { name: Istr, span: Span },
}

impl Catalog {
    pub fn define(&mut self, table: CreateTable) -> Result<TableId, CatalogError> {
        let name = table.name.ident;

        if self.lookup(name).is_some() {
            return Err(CatalogError::TableExists {
                name,
                span: table.name.span,
            });
        }

        Ok(self.tables.insert(TableSchema {
            name,
            columns: table.columns,
        }))
    }

    pub fn lookup(&self, name: Istr) -> Option<TableId> {
        self.tables.position(|table| table.name == name)
    }

    pub fn get(&self, id: TableId) -> Option<&TableSchema> {
        self.tables.get(id)
    }

    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> + '_ {
        self.tables.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl TableSchema {
    /// Renders the schema back as `name (column type, ...)`.
    pub fn describe(&self, interner: &Interner) -> String {
        let name = |istr| interner.get(istr).unwrap_or("?");

        let columns: Vec<_> = self
            .columns
            .iter()
            .map(|column| {
                let ty = name(column.ty.name);
                if column.ty.type_name.is_sized() {
                    format!("{} {ty}({})", name(column.name.ident), column.ty.size)
                } else {
                    format!("{} {ty}", name(column.name.ident))
                }
            })
            .collect();

        format!("{} ({})", name(self.name), columns.join(", "))
    }
}

impl IntoDiagnostic<Interner> for CatalogError {
    fn into_diagnostic(self, interner: &Interner) -> Diagnostic {
        match self {
            CatalogError::TableExists { name, span } => Diagnostic::error()
                .with_message(format!(
                    "table `{}` already exists",
                    interner.get(name).unwrap_or("?")
                ))
                .with_snippet(Snippet::new("defined earlier in this session", span)),
        }
    }
}
