//! Grammar productions, one module per syntactic category.

mod attr;
mod expr;
mod item;
mod stmt;
mod ty;
