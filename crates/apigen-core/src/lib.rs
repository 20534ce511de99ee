//! apigen-core - Data model, symbol table and configuration
//!
//! This crate provides the immutable inputs of a generation run:
//! - [`Namespace`] and friends, the API model
//! - [`ModuleDoc`] and friends, the structured documentation
//! - [`ExistingModule`], ordering and call hints recovered from a previous run
//! - [`SymbolTable`], the classification of every declared C symbol
//! - [`GenConfig`] and [`GenError`]

mod config;
mod docs;
mod error;
mod existing;
mod model;
mod symbols;

pub use config::{GenConfig, ImportsConfig, NullabilityConfig};
pub use docs::{DocPara, DocSpan, FuncDoc, ModuleDoc, ParamDoc, PropDoc, RETURNS_DOC, SignalDoc};
pub use error::{GenError, GenResult};
pub use existing::{ExistingModule, MemberInfo};
pub use model::{
    Constructor, Enum, EnumMember, EnumVariant, Method, Misc, MiscKind, Namespace, Object,
    Parameter, Property, Signal, is_void,
};
pub use symbols::{CSymbol, SymbolTable};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CSymbol, ExistingModule, FuncDoc, GenConfig, GenError, GenResult, MemberInfo, Method,
        ModuleDoc, Namespace, Object, SymbolTable,
    };
}
