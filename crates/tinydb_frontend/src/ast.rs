use tinydb_diagnostic::span::Span;
use tinydb_interner::Istr;

use crate::registry::{MetaCommand, TypeName};
use crate::{Node, NodeCopy};

#[derive(Node!)]
pub enum Command {
    /// A blank line.
    Empty,

    CreateTable(CreateTable),
    Meta(MetaCommand),
}

#[derive(Node!)]
pub struct CreateTable {
    pub name: Ident,

    /// In declaration order.
    pub columns: Vec<ColumnSpec>,
}

#[derive(Node!)]
pub struct ColumnSpec {
    pub name: Ident,
    pub ty: Type,
}

#[derive(NodeCopy!)]
pub struct Type {
    /// The type name as written.
    pub name: Istr,
    pub type_name: TypeName,

    /// Size in bytes, never zero.
    pub size: usize,
}

#[derive(NodeCopy!)]
pub struct Ident {
    pub ident: Istr,
    pub span: Span,
}
