//! Function binding generation.
//!
//! A binding is rendered as documentation, a type signature with one line
//! per parameter, an equation naming the input parameters, and a body that
//! opens the marshaling scopes, calls the C function and returns the results.

use crate::format::{DocFormatter, align_comments};
use crate::marshal::{Marshal, ParamMarshal, ResultMarshal};
use crate::naming::{Naming, param_name};
use crate::nullability::Nullability;
use crate::property::parenthesize;
use apigen_core::{DocSpan, FuncDoc, GenError, GenResult, MemberInfo, Method, SymbolTable};

/// Marker emitted above a signature whose returned values were described by
/// several doc entries.
pub const MERGE_MARKER: &str =
    "-- FIXME: the returned values were documented separately, merge by hand";

/// A rendered function binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFunction {
    /// Target name of the binding.
    pub name: String,
    pub text: String,
    /// Whether the returned-value docs need a manual merge.
    pub needs_merge: bool,
}

/// Documentation of the combined returned value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReturnDoc {
    None,
    Single(Vec<DocSpan>),
    Merged(Vec<DocSpan>),
}

/// Combine the docs of every returned value, result first.
///
/// With several documented values the text is prefixed by a tuple of labels,
/// each the first argument mentioned in its doc or `_`.
fn merge_return_docs(docs: &[Option<&[DocSpan]>]) -> ReturnDoc {
    let present: Vec<&[DocSpan]> = docs.iter().flatten().copied().collect();
    match present.as_slice() {
        [] => ReturnDoc::None,
        [only] => ReturnDoc::Single(only.to_vec()),
        _ => {
            let labels: Vec<String> = docs
                .iter()
                .map(|doc| {
                    doc.and_then(|spans| {
                        spans.iter().find_map(|span| match span {
                            DocSpan::Arg(name) => Some(param_name(name)),
                            _ => None,
                        })
                    })
                    .unwrap_or_else(|| "_".to_string())
                })
                .collect();
            let mut spans = vec![DocSpan::Text(format!("({})", labels.join(", ")))];
            for doc in present {
                spans.push(DocSpan::text(" "));
                spans.extend(doc.iter().cloned());
            }
            ReturnDoc::Merged(spans)
        }
    }
}

fn tuple(items: &[String]) -> String {
    match items {
        [single] if single.contains(' ') && !single.starts_with(['(', '[']) => {
            format!("({single})")
        }
        [single] => single.clone(),
        _ => format!("({})", items.join(", ")),
    }
}

fn indent(level: usize, text: &str) -> String {
    format!("{:level$}{text}", "")
}

/// One marshaled parameter of the binding being generated.
struct Marshaled {
    hs_name: String,
    doc: Option<Vec<DocSpan>>,
    nullable: bool,
    marshal: ParamMarshal,
}

/// Generates function bindings for one namespace.
pub struct FunctionGenerator<'a> {
    symbols: &'a SymbolTable,
    marshal: &'a dyn Marshal,
    nullability: &'a dyn Nullability,
    formatter: &'a DocFormatter<'a>,
    naming: &'a Naming,
}

impl<'a> FunctionGenerator<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        marshal: &'a dyn Marshal,
        nullability: &'a dyn Nullability,
        formatter: &'a DocFormatter<'a>,
        naming: &'a Naming,
    ) -> Self {
        Self {
            symbols,
            marshal,
            nullability,
            formatter,
            naming,
        }
    }

    /// Generate the binding of `method`.
    ///
    /// Instance methods must already carry their `self` parameter. The
    /// binding is named after `info.rename` when present, and calls
    /// `info.short_cname` when present.
    pub fn generate(
        &self,
        method: &Method,
        is_constructor: bool,
        doc: Option<&FuncDoc>,
        info: Option<&MemberInfo>,
    ) -> GenResult<GeneratedFunction> {
        let name = self.naming.binding_name(&method.cname, info);

        let mut params = Vec::with_capacity(method.parameters.len());
        for param in &method.parameters {
            let hs_name = if param.name == "self" {
                "self".to_string()
            } else {
                param_name(&param.name)
            };
            let marshal = self
                .marshal
                .param(self.symbols, &method.cname, &hs_name, &param.c_type)?;
            params.push(Marshaled {
                nullable: self.nullability.param_accepts_null(&method.cname, &hs_name),
                doc: doc
                    .and_then(|d| d.param(&param.name))
                    .map(|p| p.spans.clone()),
                hs_name,
                marshal,
            });
        }
        let result = self.marshal.result(
            self.symbols,
            &method.cname,
            is_constructor,
            &method.return_type,
        )?;
        let result_nullable = self.nullability.result_may_be_null(&method.cname);

        let outputs: Vec<&Marshaled> = params
            .iter()
            .filter(|p| p.marshal.direction.is_output())
            .collect();

        let mut returned_types = Vec::new();
        let mut returned_docs: Vec<Option<&[DocSpan]>> = Vec::new();
        let returns_doc = doc.and_then(FuncDoc::returns).map(|p| p.spans.as_slice());
        if !result.is_unit() {
            returned_types.push(result.hs_type.clone());
            returned_docs.push(returns_doc);
        }
        for output in &outputs {
            returned_types.push(output.marshal.hs_type.clone());
            returned_docs.push(output.doc.as_deref());
        }

        let (io_type, return_doc) = if outputs.is_empty() {
            let doc = returns_doc.map_or(ReturnDoc::None, |s| ReturnDoc::Single(s.to_vec()));
            (result.hs_type.clone(), doc)
        } else {
            (tuple(&returned_types), merge_return_docs(&returned_docs))
        };
        let needs_merge = matches!(return_doc, ReturnDoc::Merged(_));
        if needs_merge {
            tracing::warn!("{}: returned values documented separately", method.cname);
        }

        let mut lines = match doc {
            Some(d) => self
                .formatter
                .declaration(&d.paragraphs, d.since.as_deref()),
            None => Vec::new(),
        };
        if needs_merge {
            lines.push(MERGE_MARKER.to_string());
        }
        lines.extend(self.signature(&name, &params, &io_type, return_doc, result_nullable));

        let inputs: Vec<&str> = params
            .iter()
            .filter(|p| p.marshal.direction.is_input())
            .map(|p| p.hs_name.as_str())
            .collect();
        if inputs.is_empty() {
            lines.push(format!("{name} ="));
        } else {
            lines.push(format!("{name} {} =", inputs.join(" ")));
        }

        let call_name = info
            .and_then(|i| i.short_cname.as_deref())
            .unwrap_or(&method.cname);
        let call = if info.is_some_and(|i| i.unsafe_call) {
            format!("{{# call unsafe {call_name} #}}")
        } else {
            format!("{{# call {call_name} #}}")
        };
        lines.extend(self.body(&method.cname, &call, &params, &result)?);

        Ok(GeneratedFunction {
            name,
            text: lines.join("\n"),
            needs_merge,
        })
    }

    fn signature(
        &self,
        name: &str,
        params: &[Marshaled],
        io_type: &str,
        return_doc: ReturnDoc,
        result_nullable: bool,
    ) -> Vec<String> {
        let mut constraints: Vec<&str> = Vec::new();
        for constraint in params.iter().filter_map(|p| p.marshal.constraint.as_deref()) {
            if !constraints.contains(&constraint) {
                constraints.push(constraint);
            }
        }
        let context = match constraints.as_slice() {
            [] => String::new(),
            [single] => format!("{single} => "),
            many => format!("({}) => ", many.join(", ")),
        };

        let mut fragments: Vec<(String, Option<String>)> = params
            .iter()
            .filter(|p| p.marshal.direction.is_input())
            .map(|p| {
                let spans = p.doc.as_deref().unwrap_or_default();
                (p.marshal.hs_type.clone(), self.formatter.value_doc(spans, p.nullable))
            })
            .collect();
        let result_text = match return_doc {
            ReturnDoc::None => self.formatter.value_doc(&[], result_nullable),
            ReturnDoc::Single(spans) | ReturnDoc::Merged(spans) => {
                self.formatter.value_doc(&spans, result_nullable)
            }
        };
        fragments.push((format!("IO {}", parenthesize(io_type)), result_text));

        for (index, (head, _)) in fragments.iter_mut().enumerate() {
            *head = if index == 0 {
                format!("{name} :: {context}{head}")
            } else {
                format!(" -> {head}")
            };
        }
        align_comments(&fragments, self.formatter.width())
    }

    fn body(
        &self,
        cname: &str,
        call: &str,
        params: &[Marshaled],
        result: &ResultMarshal,
    ) -> GenResult<Vec<String>> {
        // (relative indent, text) of the call expression
        let mut chain: Vec<(usize, String)> = Vec::new();
        if let Some(wrapper) = &result.wrapper {
            chain.push((0, wrapper.clone()));
        }
        chain.push((0, call.to_string()));
        for param in params {
            chain.push((2, param.marshal.glue.argument.clone()));
        }
        if let Some(post_call) = &result.post_call {
            chain.push((0, post_call.clone()));
        }

        let wrappers: Vec<&str> = params
            .iter()
            .filter_map(|p| p.marshal.glue.wrapper.as_deref())
            .collect();
        let outputs: Vec<&Marshaled> = params
            .iter()
            .filter(|p| p.marshal.direction.is_output())
            .collect();

        let mut lines = Vec::new();
        if outputs.is_empty() {
            lines.extend(wrappers.iter().map(|w| indent(2, w)));
            lines.extend(chain.iter().map(|(rel, text)| indent(2 + rel, text)));
            return Ok(lines);
        }

        match wrappers.split_last() {
            Some((last, rest)) => {
                lines.extend(rest.iter().map(|w| indent(2, w)));
                lines.push(indent(2, &format!("{last} do")));
            }
            None => lines.push(indent(2, "do")),
        }

        let mut values = Vec::new();
        if result.is_unit() {
            lines.extend(chain.iter().map(|(rel, text)| indent(2 + rel, text)));
        } else {
            let var = if params.iter().any(|p| p.hs_name == "result") {
                "result'"
            } else {
                "result"
            };
            for (index, (rel, text)) in chain.iter().enumerate() {
                if index == 0 {
                    lines.push(indent(2, &format!("{var} <- {text}")));
                } else {
                    lines.push(indent(4 + rel, text));
                }
            }
            values.push(var.to_string());
        }

        for output in outputs {
            let glue = &output.marshal.glue;
            if let Some(read_back) = &glue.read_back {
                lines.push(indent(2, read_back));
            }
            let value = glue.output.clone().ok_or_else(|| GenError::Malformed {
                name: cname.to_string(),
                reason: format!("output parameter {} has no value to return", output.hs_name),
            })?;
            values.push(value);
        }
        lines.push(indent(2, &format!("return {}", tuple(&values))));
        Ok(lines)
    }
}
