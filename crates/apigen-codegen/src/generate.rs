//! Per-object module generation.

use crate::assemble::{Entry, Guards, Section, assemble_body, assemble_exports, export_line};
use crate::collate::{
    Collated, CollatedProperty, OrderMode, PropertySource, collate_constructors, collate_methods,
    collate_properties, collate_signals,
};
use crate::format::DocFormatter;
use crate::function::FunctionGenerator;
use crate::header::{description, hierarchy};
use crate::imports::assemble_imports;
use crate::marshal::{GtkMarshaler, Marshal};
use crate::naming::{Naming, signal_binding_names};
use crate::property::PropertyGenerator;
use crate::signal::SignalGenerator;
use apigen_core::{
    ExistingModule, FuncDoc, GenConfig, GenError, GenResult, Method, ModuleDoc, Namespace, Object,
    SymbolTable,
};
use std::collections::{HashMap, HashSet};

/// Heading of the list of functions that were not bound.
pub const NOT_BOUND_HEADING: &str = "-- TODO: the following varargs functions were not bound";

/// The generated parts of one module, ready for a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedModule {
    /// C name of the object the module binds.
    pub object: String,
    pub module_name: String,
    pub description: String,
    pub hierarchy: String,
    pub exports: String,
    pub imports: String,
    pub context_lib: String,
    pub context_prefix: String,
    pub body: String,
    /// Comment block listing [`GeneratedModule::not_bound`], or empty.
    pub todo: String,
    /// C names of functions that were skipped, constructors first.
    pub not_bound: Vec<String>,
}

/// Inputs for one object.
#[derive(Debug, Clone, Copy)]
pub struct ModuleInput<'a> {
    pub namespace: &'a Namespace,
    pub object: &'a Object,
    pub docs: Option<&'a ModuleDoc>,
    pub existing: Option<&'a ExistingModule>,
}

/// Result of generating one object in a batch.
#[derive(Debug)]
pub struct ModuleOutcome {
    pub object: String,
    pub result: GenResult<GeneratedModule>,
}

fn function_export(name: String, doc: Option<&FuncDoc>, deprecated: bool) -> Entry {
    Entry::new(export_line(&name))
        .since(doc.and_then(|d| d.since.as_deref()))
        .deprecated(deprecated)
}

/// C names of getters and setters bound through a declared property.
fn claimed_accessors<'a>(props: &[CollatedProperty<'a>]) -> HashSet<&'a str> {
    props
        .iter()
        .filter_map(|p| match &p.source {
            PropertySource::DeclaredWithAccessors { accessors, .. } => Some(*accessors),
            _ => None,
        })
        .flat_map(|a| [a.getter.cname.as_str(), a.setter.cname.as_str()])
        .collect()
}

/// Fail every object whose module name is shared with another object, so
/// that no module is written on top of another.
fn fail_duplicate_modules(outcomes: &mut [ModuleOutcome]) {
    let mut owners: HashMap<String, Vec<String>> = HashMap::new();
    for outcome in outcomes.iter() {
        if let Ok(module) = &outcome.result {
            owners
                .entry(module.module_name.clone())
                .or_default()
                .push(outcome.object.clone());
        }
    }

    for outcome in outcomes.iter_mut() {
        let collision = match &outcome.result {
            Ok(module) => owners
                .get(&module.module_name)
                .filter(|objects| objects.len() > 1)
                .map(|objects| GenError::DuplicateModule {
                    module: module.module_name.clone(),
                    objects: objects.clone(),
                }),
            Err(_) => None,
        };
        if let Some(err) = collision {
            tracing::error!(object = %outcome.object, "generation failed: {err}");
            outcome.result = Err(err);
        }
    }
}

/// Generates modules from a shared symbol table and configuration.
pub struct Generator<'a> {
    config: &'a GenConfig,
    symbols: &'a SymbolTable,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a GenConfig, symbols: &'a SymbolTable) -> Self {
        Self { config, symbols }
    }

    /// Naming rules of a namespace under this configuration.
    pub fn naming(&self, namespace: &Namespace) -> Naming {
        Naming::new(namespace.c_prefix(), &self.config.type_prefixes)
    }

    /// Generate one module with the default marshaler.
    pub fn generate(&self, input: &ModuleInput<'_>) -> GenResult<GeneratedModule> {
        let naming = self.naming(input.namespace);
        let marshaler = GtkMarshaler::new(
            &naming,
            &self.config.nullability,
            &self.config.floating_root,
        );
        self.generate_with(input, &naming, &marshaler)
    }

    /// Generate one module with a caller-supplied marshaler.
    ///
    /// Objects whose parent chain loops fail with
    /// [`GenError::InheritanceCycle`].
    pub fn generate_with(
        &self,
        input: &ModuleInput<'_>,
        naming: &Naming,
        marshal: &dyn Marshal,
    ) -> GenResult<GeneratedModule> {
        let object = input.object;
        self.symbols.check_object(&object.cname)?;
        tracing::debug!(object = %object.cname, "generating module");

        let empty = ModuleDoc::default();
        let docs = input.docs.unwrap_or(&empty);
        let existing = input.existing;
        let formatter = DocFormatter::new(
            self.symbols,
            naming,
            self.config.line_width,
            &self.config.product_name,
        );
        let functions = FunctionGenerator::new(
            self.symbols,
            marshal,
            &self.config.nullability,
            &formatter,
            naming,
        );
        let properties = PropertyGenerator::new(self.symbols, marshal, &formatter, naming, existing);
        let signals = SignalGenerator::new(self.symbols, marshal, &formatter, naming);
        let guards = Guards {
            version_macro: &self.config.version_macro,
            deprecation_macro: &self.config.deprecation_macro,
        };
        let object_type = naming.type_name(&object.cname);
        let is_object = self.symbols.is_object(&object.cname);

        // Body, in existing-module order.
        let ctors = collate_constructors(
            object,
            &docs.functions,
            existing,
            naming,
            OrderMode::PreserveExisting,
        );
        let methods = collate_methods(
            object,
            &docs.functions,
            existing,
            naming,
            OrderMode::PreserveExisting,
        );

        let kept: Vec<&Method> = methods.entries.iter().map(|m| m.member).collect();
        let props = collate_properties(
            object,
            &kept,
            &docs.properties,
            existing,
            naming,
            OrderMode::Documentation,
        );
        let claimed = claimed_accessors(&props);

        let mut ctor_entries = Vec::new();
        for c in &ctors.entries {
            let f = functions.generate(&c.member, true, c.doc, c.info)?;
            ctor_entries.push(
                Entry::new(f.text)
                    .since(c.doc.and_then(|d| d.since.as_deref()))
                    .deprecated(c.member.deprecated),
            );
        }
        let mut method_entries = Vec::new();
        for m in &methods.entries {
            if claimed.contains(m.member.cname.as_str()) {
                continue;
            }
            method_entries.push(self.method_entry(&functions, object, m)?);
        }

        let mut prop_entries = Vec::new();
        let mut prop_exports = Vec::new();
        for p in &props {
            let since = p.doc.and_then(|d| d.since.as_deref());
            // Accessors claimed by a declared property live next to its
            // attribute and stay out of the export list.
            if let PropertySource::DeclaredWithAccessors { accessors, .. } = &p.source {
                for accessor in [accessors.getter, accessors.setter] {
                    let collated = methods
                        .entries
                        .iter()
                        .find(|m| m.member.cname == accessor.cname);
                    if let Some(m) = collated {
                        prop_entries.push(self.method_entry(&functions, object, m)?);
                    }
                }
            }
            prop_entries.push(Entry::new(properties.generate(object, p)?).since(since));
            prop_exports
                .push(Entry::new(export_line(&properties.binding_name(object, p))).since(since));
        }

        let sigs = collate_signals(object, &docs.signals, existing, OrderMode::Documentation);
        let mut signal_entries = Vec::new();
        let mut signal_exports = Vec::new();
        for s in &sigs {
            let since = s.doc.and_then(|d| d.since.as_deref());
            signal_entries.push(Entry::new(signals.generate(object, s.member, s.doc)?).since(since));
            let (on, after) = signal_binding_names(&s.member.cname);
            signal_exports.push(
                Entry::new(format!("{}\n{}", export_line(&on), export_line(&after))).since(since),
            );
        }

        let interfaces: Vec<String> = object
            .implements
            .iter()
            .map(|iface| format!("instance {}Class {object_type}", naming.type_name(iface)))
            .collect();
        let interface_entries = if interfaces.is_empty() || !is_object {
            Vec::new()
        } else {
            vec![Entry::new(interfaces.join("\n"))]
        };

        let mut body_sections = [
            Section::new("Interfaces", interface_entries),
            Section::new("Constructors", ctor_entries),
            Section::new("Methods", method_entries),
            Section::new("Properties", prop_entries),
            Section::new("Signals", signal_entries),
        ];

        // Exports, in documentation order.
        let export_ctors = collate_constructors(
            object,
            &docs.functions,
            existing,
            naming,
            OrderMode::Documentation,
        );
        let export_methods = collate_methods(
            object,
            &docs.functions,
            existing,
            naming,
            OrderMode::Documentation,
        );
        let ctor_exports = export_ctors
            .entries
            .iter()
            .map(|c| {
                let name = naming.binding_name(&c.member.cname, c.info);
                function_export(name, c.doc, c.member.deprecated)
            })
            .collect();
        let method_exports = export_methods
            .entries
            .iter()
            .filter(|m| !claimed.contains(m.member.cname.as_str()))
            .map(|m| {
                let name = naming.binding_name(&m.member.cname, m.info);
                function_export(name, m.doc, m.member.deprecated)
            })
            .collect();

        let mut type_exports = vec![Entry::new(export_line(&object_type))];
        if is_object {
            type_exports.push(Entry::new(export_line(&format!("{object_type}Class"))));
            type_exports.push(Entry::new(export_line(&format!("castTo{object_type}"))));
            type_exports.push(Entry::new(export_line(&format!("to{object_type}"))));
        }

        let mut export_sections = [
            Section::new("Types", type_exports),
            Section::new("Constructors", ctor_exports),
            Section::new("Methods", method_exports),
            Section::new("Properties", prop_exports),
            Section::new("Signals", signal_exports),
        ];

        if object.deprecated {
            for entry in body_sections
                .iter_mut()
                .chain(export_sections.iter_mut())
                .flat_map(|s| s.entries.iter_mut())
            {
                entry.deprecated = true;
            }
        }

        let body = assemble_body(&body_sections, &guards);
        let exports = assemble_exports(&export_sections, &guards);

        let mut not_bound = ctors.not_bound;
        not_bound.extend(methods.not_bound);
        let todo = if not_bound.is_empty() {
            String::new()
        } else {
            let mut lines = vec![NOT_BOUND_HEADING.to_string()];
            lines.extend(not_bound.iter().map(|name| format!("--   {name}")));
            lines.join("\n")
        };

        Ok(GeneratedModule {
            object: object.cname.clone(),
            module_name: existing
                .and_then(|e| e.module_name.clone())
                .unwrap_or_else(|| format!("{}.{object_type}", self.config.module_prefix)),
            description: description(&formatter, docs),
            hierarchy: hierarchy(self.symbols, naming, &object.cname),
            exports,
            imports: assemble_imports(
                existing.and_then(|e| e.imports.as_deref()),
                &self.config.imports,
            ),
            context_lib: input.namespace.library.clone(),
            context_prefix: existing
                .and_then(|e| e.context_prefix.clone())
                .unwrap_or_else(|| input.namespace.c_prefix()),
            body,
            todo,
            not_bound,
        })
    }

    fn method_entry(
        &self,
        functions: &FunctionGenerator<'_>,
        object: &Object,
        method: &Collated<'_, &Method, FuncDoc>,
    ) -> GenResult<Entry> {
        let f = functions.generate(
            &method.member.with_self(object),
            false,
            method.doc,
            method.info,
        )?;
        Ok(Entry::new(f.text)
            .since(method.doc.and_then(|d| d.since.as_deref()))
            .deprecated(method.member.deprecated))
    }

    /// Generate every object of every namespace, or only `only` when given.
    ///
    /// A failing object does not stop the batch; its error is reported in
    /// its outcome. Objects that would produce the same module name all fail
    /// with [`GenError::DuplicateModule`].
    pub fn generate_all(
        &self,
        namespaces: &[Namespace],
        docs: &[ModuleDoc],
        existing: &HashMap<String, ExistingModule>,
        only: Option<&str>,
    ) -> GenResult<Vec<ModuleOutcome>> {
        let docs: HashMap<&str, &ModuleDoc> = docs.iter().map(|d| (d.name.as_str(), d)).collect();
        let mut outcomes = Vec::new();

        for namespace in namespaces {
            for object in &namespace.objects {
                if only.is_some_and(|name| name != object.cname) {
                    continue;
                }
                let input = ModuleInput {
                    namespace,
                    object,
                    docs: docs.get(object.cname.as_str()).copied(),
                    existing: existing.get(&object.cname),
                };
                let result = self.generate(&input);
                if let Err(err) = &result {
                    tracing::error!(object = %object.cname, "generation failed: {err}");
                }
                outcomes.push(ModuleOutcome {
                    object: object.cname.clone(),
                    result,
                });
            }
        }

        if let Some(name) = only
            && outcomes.is_empty()
        {
            return Err(GenError::ObjectNotFound(name.to_string()));
        }
        fail_duplicate_modules(&mut outcomes);
        Ok(outcomes)
    }
}
