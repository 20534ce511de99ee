//! The `generate` command

use crate::inputs::{load_api, load_config, load_docs, load_existing, module_file_name};
use anyhow::{Context, Result, bail};
use apigen_codegen::{DEFAULT_TEMPLATE, Generator, TemplateContext};
use apigen_core::SymbolTable;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Options of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateArgs {
    pub api: String,
    pub output: String,
    pub docs: Option<String>,
    pub existing: Option<String>,
    pub config: Option<String>,
    pub object: Option<String>,
    pub template: Option<String>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let namespaces = load_api(&args.api)?;
    let docs = load_docs(args.docs.as_deref())?;
    let template = match &args.template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read template: {path}"))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let symbols = SymbolTable::build(&namespaces, &config.root_object);
    let generator = Generator::new(&config, &symbols);
    let existing = load_existing(args.existing.as_deref(), &namespaces, |ns| {
        generator.naming(ns)
    })?;

    println!("Generating bindings from: {}", args.api);

    let outcomes = generator.generate_all(&namespaces, &docs, &existing, args.object.as_deref())?;

    let output_dir = Path::new(&args.output);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", args.output))?;

    let mut failed = Vec::new();
    let mut modules = Vec::new();
    for outcome in outcomes {
        match outcome.result {
            Ok(module) => {
                let file_name = module_file_name(module_type_name(&module.module_name));
                let path = output_dir.join(file_name);
                modules.push((outcome.object, path, module));
            }
            Err(err) => {
                println!("✗ {}: {err}", outcome.object);
                failed.push(outcome.object);
            }
        }
    }

    let mut writers: HashMap<PathBuf, Vec<String>> = HashMap::new();
    for (object, path, _) in &modules {
        writers.entry(path.clone()).or_default().push(object.clone());
    }

    for (object, path, module) in modules {
        if let Some(objects) = writers.get(&path).filter(|objects| objects.len() > 1) {
            println!(
                "✗ {object}: {} would also be written by {}",
                path.display(),
                objects
                    .iter()
                    .filter(|other| **other != object)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            failed.push(object);
            continue;
        }

        fs::write(&path, TemplateContext::new(&module).apply(&template))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        println!("✓ {object} -> {}", path.display());
        for cname in &module.not_bound {
            println!("  not bound: {cname}");
        }
    }

    if !failed.is_empty() {
        bail!(
            "{} object(s) failed to generate: {}",
            failed.len(),
            failed.join(", ")
        );
    }

    println!("\nGeneration complete!");
    Ok(())
}

/// Last component of a dotted module name.
fn module_type_name(module_name: &str) -> &str {
    module_name.rsplit('.').next().unwrap_or(module_name)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use tempfile::TempDir;

    const API: &str = r#"[{
        "name": "Gtk",
        "library": "gtk",
        "objects": [
            {
                "name": "Button",
                "cname": "GtkButton",
                "parent": "GObject",
                "constructors": [{ "name": "New", "cname": "gtk_button_new" }],
                "methods": [
                    { "name": "Pressed", "cname": "gtk_button_pressed" },
                    {
                        "name": "Lookup",
                        "cname": "gtk_button_lookup",
                        "parameters": [{ "type": "GHashTable*", "name": "table" }]
                    }
                ]
            },
            {
                "name": "Label",
                "cname": "GtkLabel",
                "parent": "GObject",
                "constructors": [
                    {
                        "name": "New",
                        "cname": "gtk_label_new",
                        "parameters": [{ "type": "const-gchar*", "name": "str" }]
                    }
                ]
            }
        ]
    }]"#;

    fn setup(api: &str) -> (TempDir, GenerateArgs) {
        let temp_dir = TempDir::new().unwrap();
        let api_path = temp_dir.path().join("api.json");
        fs::write(&api_path, api).unwrap();
        let args = GenerateArgs {
            api: api_path.to_string_lossy().to_string(),
            output: temp_dir.path().join("out").to_string_lossy().to_string(),
            ..Default::default()
        };
        (temp_dir, args)
    }

    #[test]
    fn module_type_name___takes_last_component() {
        assert_eq!(module_type_name("Graphics.UI.Gtk.Buttons.Button"), "Button");
        assert_eq!(module_type_name("Button"), "Button");
    }

    #[test]
    fn run___failing_object___still_writes_the_others() {
        let (temp_dir, args) = setup(API);

        let err = run(args).unwrap_err();

        assert!(err.to_string().contains("GtkButton"));
        let label = temp_dir.path().join("out").join("Label.chs");
        assert!(label.exists());
        assert!(!temp_dir.path().join("out").join("Button.chs").exists());
    }

    #[test]
    fn run___object_filter___writes_one_module() {
        let (temp_dir, mut args) = setup(API);
        args.object = Some("GtkLabel".to_string());

        run(args).unwrap();

        let text = fs::read_to_string(temp_dir.path().join("out").join("Label.chs")).unwrap();
        assert!(text.contains("module Graphics.UI.Gtk.Label ("));
        assert!(text.contains("labelNew :: String\n -> IO Label\nlabelNew str =\n"));
    }

    #[test]
    fn run___same_module_file___is_never_overwritten() {
        let (temp_dir, args) = setup(
            r#"[
                {
                    "name": "Gdk",
                    "library": "gdk",
                    "objects": [{ "name": "Window", "cname": "GdkWindow", "parent": "GObject" }]
                },
                {
                    "name": "Gtk",
                    "library": "gtk",
                    "objects": [
                        { "name": "Window", "cname": "GtkWindow", "parent": "GObject" },
                        { "name": "Label", "cname": "GtkLabel", "parent": "GObject" }
                    ]
                }
            ]"#,
        );

        let err = run(args).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("GdkWindow") && message.contains("GtkWindow"));
        assert!(!temp_dir.path().join("out").join("Window.chs").exists());
        assert!(temp_dir.path().join("out").join("Label.chs").exists());
    }

    #[test]
    fn run___module_names_ending_alike___fail_instead_of_overwriting() {
        let (temp_dir, mut args) = setup(
            r#"[{
                "name": "Gtk",
                "library": "gtk",
                "objects": [
                    { "name": "Window", "cname": "GtkWindow", "parent": "GObject" },
                    { "name": "Label", "cname": "GtkLabel", "parent": "GObject" }
                ]
            }]"#,
        );
        let existing = temp_dir.path().join("existing");
        fs::create_dir_all(&existing).unwrap();
        fs::write(
            existing.join("Label.chs"),
            "module Graphics.UI.Gtk.Display.Window (\n  labelNew,\n  ) where\n",
        )
        .unwrap();
        args.existing = Some(existing.to_string_lossy().to_string());

        let err = run(args).unwrap_err();

        assert!(err.to_string().contains("2 object(s) failed"));
        assert!(!temp_dir.path().join("out").join("Window.chs").exists());
    }

    #[test]
    fn run___custom_template___is_applied() {
        let (temp_dir, mut args) = setup(API);
        let template = temp_dir.path().join("module.tmpl");
        fs::write(&template, "-- {{module-name}}\n{{body}}\n").unwrap();
        args.template = Some(template.to_string_lossy().to_string());
        args.object = Some("GtkLabel".to_string());

        run(args).unwrap();

        let text = fs::read_to_string(temp_dir.path().join("out").join("Label.chs")).unwrap();
        assert!(text.starts_with("-- Graphics.UI.Gtk.Label\n--------------------\n-- Constructors\n"));
    }
}
