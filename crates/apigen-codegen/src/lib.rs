//! apigen-codegen - Haskell binding generation
//!
//! This crate turns the inputs of [`apigen_core`] into module text:
//! - [`marshal`] classifies C types and produces call-site glue
//! - [`collate`] selects members and orders them against docs and an
//!   existing module
//! - [`function`], [`property`] and [`signal`] render declarations
//! - [`assemble`] groups entries under version and deprecation guards
//! - [`generate`] drives all of the above for one object
//! - [`template`] places the generated parts into a module template
//! - [`scan`] recovers ordering and call hints from a module written earlier
//!
//! # Example
//!
//! ```
//! use apigen_codegen::{Generator, ModuleInput, TemplateContext, DEFAULT_TEMPLATE};
//! use apigen_core::{GenConfig, Namespace, Object, SymbolTable};
//!
//! let namespace: Namespace = serde_json::from_str(
//!     r#"{
//!         "name": "Gtk",
//!         "library": "gtk",
//!         "objects": [
//!             { "name": "Widget", "cname": "GtkWidget", "parent": "GObject" }
//!         ]
//!     }"#,
//! )
//! .unwrap();
//! let config = GenConfig::default();
//! let symbols = SymbolTable::build(std::slice::from_ref(&namespace), &config.root_object);
//! let object: &Object = namespace.object("GtkWidget").unwrap();
//!
//! let module = Generator::new(&config, &symbols)
//!     .generate(&ModuleInput { namespace: &namespace, object, docs: None, existing: None })
//!     .unwrap();
//! let text = TemplateContext::new(&module).apply(DEFAULT_TEMPLATE);
//!
//! assert!(text.contains("module Graphics.UI.Gtk.Widget ("));
//! ```

pub mod assemble;
pub mod collate;
pub mod format;
pub mod function;
pub mod generate;
pub mod header;
pub mod imports;
pub mod marshal;
pub mod naming;
pub mod nullability;
pub mod property;
pub mod scan;
pub mod signal;
pub mod template;

pub use generate::{GeneratedModule, Generator, ModuleInput, ModuleOutcome, NOT_BOUND_HEADING};
pub use marshal::{GtkMarshaler, Marshal};
pub use naming::Naming;
pub use nullability::Nullability;
pub use scan::scan_module;
pub use template::{DEFAULT_TEMPLATE, TemplateContext};
