//! Signal connector generation.

use crate::format::DocFormatter;
use crate::marshal::Marshal;
use crate::naming::{Naming, c_base_type, signal_binding_names};
use crate::property::parenthesize;
use apigen_core::{GenResult, Object, Signal, SignalDoc, SymbolTable};

/// Generates `on`/`after` connectors for the signals of one object.
pub struct SignalGenerator<'a> {
    symbols: &'a SymbolTable,
    marshal: &'a dyn Marshal,
    formatter: &'a DocFormatter<'a>,
    naming: &'a Naming,
}

impl<'a> SignalGenerator<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        marshal: &'a dyn Marshal,
        formatter: &'a DocFormatter<'a>,
        naming: &'a Naming,
    ) -> Self {
        Self {
            symbols,
            marshal,
            formatter,
            naming,
        }
    }

    pub fn generate(
        &self,
        object: &Object,
        signal: &Signal,
        doc: Option<&SignalDoc>,
    ) -> GenResult<String> {
        let (on_name, after_name) = signal_binding_names(&signal.cname);
        let object_type = self.naming.type_name(&object.cname);
        let (context, self_type) = if self.symbols.is_object(&object.cname) {
            (format!("{object_type}Class self => "), "self".to_string())
        } else {
            (String::new(), object_type)
        };

        // The emitting instance is passed implicitly.
        let params = match signal.parameters.split_first() {
            Some((first, rest)) if c_base_type(&first.c_type) == object.cname => rest,
            _ => &signal.parameters[..],
        };

        let mut categories = Vec::with_capacity(params.len());
        let mut arg_types = Vec::with_capacity(params.len());
        for param in params {
            let marshal = self
                .marshal
                .signal_type(self.symbols, &signal.cname, &param.c_type)?;
            categories.push(marshal.category);
            arg_types.push(parenthesize(&marshal.hs_type));
        }
        let result = self
            .marshal
            .signal_type(self.symbols, &signal.cname, &signal.return_type)?;

        let handler_result = format!("IO {}", parenthesize(&result.hs_type));
        let handler = if arg_types.is_empty() {
            handler_result
        } else {
            format!("({} -> {handler_result})", arg_types.join(" -> "))
        };
        let connect = format!(
            "connect_{}__{}",
            if categories.is_empty() {
                "NONE".to_string()
            } else {
                categories.join("_")
            },
            result.category
        );

        let mut lines = match doc {
            Some(d) => self
                .formatter
                .declaration(&d.paragraphs, d.since.as_deref()),
            None => Vec::new(),
        };
        lines.push(format!("{on_name}, {after_name} :: {context}{self_type}"));
        lines.push(format!(" -> {handler}"));
        lines.push(format!(" -> IO (ConnectId {self_type})"));
        lines.push(format!("{on_name} = {connect} \"{}\" False", signal.cname));
        lines.push(format!("{after_name} = {connect} \"{}\" True", signal.cname));
        Ok(lines.join("\n"))
    }
}
