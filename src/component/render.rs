//! Output for components
//!
//! HTML and Text share one walk over fields, nested components and bundles;
//! JSON builds a `serde_json` object along the same walk.

use super::base::Component;
use super::descriptor::{FieldKind, Placement};
use super::validation::flagged_no_value;
use crate::config::OutputConfig;
use crate::datatypes::{parse_boolean, parse_double};
use crate::documents::write_element;
use crate::error::Result;
use crate::output::{build_index, build_prefix, LineWriter, OutputFormat};
use crate::version::VersionRegistry;
use serde_json::{Map, Number, Value};
use std::fmt;

impl Component {
    /// Canonical XML
    pub fn to_xml(&self) -> Result<String> {
        write_element(&self.element, false)
    }

    /// Indented XML
    pub fn to_xml_pretty(&self) -> Result<String> {
        write_element(&self.element, true)
    }

    /// HTML meta lines with the registry's output options
    pub fn to_html(&self) -> Result<String> {
        self.render(OutputFormat::Html, VersionRegistry::global().output_config())
    }

    /// Text lines with the registry's output options
    pub fn to_text(&self) -> Result<String> {
        self.render(OutputFormat::Text, VersionRegistry::global().output_config())
    }

    /// JSON with the registry's output options
    pub fn to_json(&self) -> Result<String> {
        self.render(OutputFormat::Json, VersionRegistry::global().output_config())
    }

    /// Render in any format with explicit options
    pub fn render(&self, format: OutputFormat, config: OutputConfig) -> Result<String> {
        match format {
            OutputFormat::Xml => self.to_xml(),
            OutputFormat::Json => {
                let value = self.to_json_value(&config);
                Ok(if config.json_pretty {
                    serde_json::to_string_pretty(&value)?
                } else {
                    serde_json::to_string(&value)?
                })
            }
            OutputFormat::Html | OutputFormat::Text => {
                let mut writer = LineWriter::new(format, config);
                self.write_lines(&mut writer, "", "")?;
                Ok(writer.finish())
            }
        }
    }

    /// Emit this component's lines under `prefix`, with `suffix` after its own name
    pub fn write_lines(&self, writer: &mut LineWriter, prefix: &str, suffix: &str) -> Result<()> {
        let descriptor = self.descriptor;
        let local = build_prefix(prefix, descriptor.name, suffix);
        let level = writer.config().index_level;

        for (field, values) in self.field_values() {
            if field.placement == Placement::Text {
                match values.first() {
                    Some(value) => writer.field(&local, value),
                    None if flagged_no_value(self) => writer.field_always(&local, ""),
                    None => {}
                }
                continue;
            }
            let name = descriptor.field_name(field, self.version);
            for (index, value) in values.iter().enumerate() {
                let index = if field.cardinality.max > 1 {
                    build_index(index, values.len(), level)?
                } else {
                    String::new()
                };
                writer.field(&format!("{}.{}{}", local, name, index), value);
            }
        }

        let child_prefix = format!("{}.", local);
        for child in descriptor.children {
            let siblings: Vec<&Component> = self.children_named(child.descriptor.name).collect();
            for (index, sibling) in siblings.iter().enumerate() {
                let suffix = build_index(index, siblings.len(), level)?;
                sibling.write_lines(writer, &child_prefix, &suffix)?;
            }
        }

        self.bundles.write_lines(writer, &child_prefix);
        Ok(())
    }

    /// This component as a JSON object
    pub fn to_json_value(&self, config: &OutputConfig) -> Value {
        let descriptor = self.descriptor;
        let mut object = Map::new();

        for (field, values) in self.field_values() {
            if values.is_empty() {
                continue;
            }
            if field.placement == Placement::Text {
                object.insert(descriptor.name.to_string(), Value::String(values[0].clone()));
                continue;
            }
            let typed: Vec<Value> = values.iter().map(|v| json_scalar(field.kind, v)).collect();
            let value = if field.cardinality.max > 1 {
                Value::Array(typed)
            } else {
                typed.into_iter().next().unwrap_or(Value::Null)
            };
            object.insert(descriptor.field_name(field, self.version), value);
        }

        for child in descriptor.children {
            let siblings: Vec<Value> = self
                .children_named(child.descriptor.name)
                .map(|c| c.to_json_value(config))
                .collect();
            if siblings.is_empty() {
                continue;
            }
            let value = if child.cardinality.max > 1 {
                Value::Array(siblings)
            } else {
                siblings.into_iter().next().unwrap_or(Value::Null)
            };
            object.insert(child.descriptor.name.to_string(), value);
        }

        self.bundles
            .write_json(&mut object, config.json_inline_attributes);
        Value::Object(object)
    }
}

fn json_scalar(kind: FieldKind, value: &str) -> Value {
    match kind {
        FieldKind::Boolean => parse_boolean(value)
            .map(Value::Bool)
            .unwrap_or_else(|| Value::String(value.to_string())),
        FieldKind::Double => parse_double(value)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(value.to_string())),
        _ => Value::String(value.to_string()),
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        write!(f, "{}", xml)
    }
}
