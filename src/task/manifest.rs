/// KDL task manifest parser
///
/// A manifest lists the frozen configuration of a build's tasks:
///
/// ```kdl
/// task "compileJava" {
///     property "version" "1.2.0-SNAPSHOT"
///     output "classes" kind="dir"
///     cache-if "release builds" property="release" equals="true"
///     do-not-cache-if "snapshot version" property="version" ends-with="-SNAPSHOT"
///     overlap "classes" path="build/classes/Stale.class"
/// }
/// ```
use anyhow::{anyhow, bail, Context, Result};
use kdl::{KdlDocument, KdlNode};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Condition, TaskDefinition};
use crate::cacheability::{OutputKind, OutputSpec, OverlappingOutputs};

/// Parse a manifest file
///
/// Relative overlap paths are resolved against the manifest's directory,
/// made absolute from the working directory.
pub fn parse_manifest(manifest_path: &Path) -> Result<Vec<TaskDefinition>> {
    let content = fs::read_to_string(manifest_path)
        .with_context(|| format!("Failed to read manifest: {}", manifest_path.display()))?;

    let parent = manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let base_dir = std::path::absolute(parent)
        .with_context(|| format!("Failed to resolve manifest directory: {}", parent.display()))?;

    parse_document(&content, Some(&base_dir))
        .with_context(|| format!("Failed to parse manifest: {}", manifest_path.display()))
}

/// Parse manifest text, keeping overlap paths as written
pub fn parse_manifest_str(content: &str) -> Result<Vec<TaskDefinition>> {
    parse_document(content, None)
}

fn parse_document(content: &str, base_dir: Option<&Path>) -> Result<Vec<TaskDefinition>> {
    let doc: KdlDocument = content
        .parse()
        .map_err(|e| anyhow!("Invalid KDL syntax: {}", e))?;

    let mut tasks = Vec::new();
    let mut seen = HashSet::new();

    for node in doc.nodes() {
        if node.name().value() != "task" {
            bail!("Unknown top-level node: {} (expected 'task')", node.name());
        }

        let task = parse_task(node, base_dir)?;
        if !seen.insert(task.name().to_string()) {
            bail!("Task '{}' is declared more than once", task.name());
        }
        tasks.push(task);
    }

    Ok(tasks)
}

fn parse_task(node: &KdlNode, base_dir: Option<&Path>) -> Result<TaskDefinition> {
    let name =
        get_positional_string(node, 0).ok_or_else(|| anyhow!("task requires a name argument"))?;

    let mut task = TaskDefinition::new(name);

    if let Some(children) = node.children() {
        for child in children.nodes() {
            parse_task_directive(&mut task, child, base_dir).with_context(|| {
                format!(
                    "Failed to parse directive '{}' of task '{}'",
                    child.name(),
                    task.name()
                )
            })?;
        }
    }

    Ok(task)
}

fn parse_task_directive(
    task: &mut TaskDefinition,
    node: &KdlNode,
    base_dir: Option<&Path>,
) -> Result<()> {
    match node.name().value() {
        "property" => {
            let key = get_positional_string(node, 0)
                .ok_or_else(|| anyhow!("property requires a key argument"))?;
            let value = get_positional_string(node, 1)
                .ok_or_else(|| anyhow!("property requires a value argument"))?;
            task.set_property(key, value);
        }

        "output" => {
            let property_name = get_positional_string(node, 0)
                .ok_or_else(|| anyhow!("output requires a property name argument"))?;

            let kind: OutputKind = get_named_string(node, "kind")
                .unwrap_or("file")
                .parse()?;

            task.add_output(OutputSpec::new(property_name, kind))?;
        }

        "declares-outputs" => {
            let declares = node
                .entries()
                .iter()
                .find(|e| e.name().is_none())
                .and_then(|e| e.value().as_bool())
                .ok_or_else(|| anyhow!("declares-outputs requires a boolean argument"))?;
            task.set_declares_outputs(declares);
        }

        "cache-if" => {
            let (display_name, condition) = parse_condition(node)?;
            task.add_cache_if(condition.into_predicate(display_name));
        }

        "do-not-cache-if" => {
            let (display_name, condition) = parse_condition(node)?;
            task.add_do_not_cache_if(condition.into_predicate(display_name));
        }

        "overlap" => {
            if task.overlap().is_some() {
                bail!("overlap may only be declared once per task");
            }

            let property_name = get_positional_string(node, 0)
                .ok_or_else(|| anyhow!("overlap requires a property name argument"))?;
            let path = get_named_string(node, "path")
                .map(PathBuf::from)
                .ok_or_else(|| anyhow!("overlap requires path="))?;

            let path = match base_dir {
                Some(base) if path.is_relative() => base.join(path),
                _ => path,
            };

            task.set_overlap(OverlappingOutputs::new(property_name, path));
        }

        _ => {
            bail!("Unknown directive: {}", node.name());
        }
    }

    Ok(())
}

/// Parse a `cache-if`/`do-not-cache-if` node into its display name and condition
///
/// Without `property=` the condition is unconditional unless `never=#true`.
fn parse_condition(node: &KdlNode) -> Result<(String, Condition)> {
    let display_name = get_positional_string(node, 0)
        .ok_or_else(|| anyhow!("{} requires a display name argument", node.name()))?;

    let condition = match get_named_string(node, "property") {
        Some(property) => {
            if let Some(value) = get_named_string(node, "equals") {
                Condition::property_equals(property, value)
            } else if let Some(suffix) = get_named_string(node, "ends-with") {
                Condition::property_ends_with(property, suffix)
            } else {
                Condition::property_present(property)
            }
        }
        None => {
            if get_named_string(node, "equals").is_some()
                || get_named_string(node, "ends-with").is_some()
            {
                bail!("equals= and ends-with= require property=");
            }
            let never = node
                .get("never")
                .and_then(|e| e.as_bool())
                .unwrap_or(false);
            if never {
                Condition::Never
            } else {
                Condition::Always
            }
        }
    };

    Ok((display_name, condition))
}

fn get_named_string<'a>(node: &'a KdlNode, key: &str) -> Option<&'a str> {
    node.get(key).and_then(|e| e.as_string())
}

/// Get positional string argument from KDL node
fn get_positional_string(node: &KdlNode, index: usize) -> Option<String> {
    node.entries()
        .iter()
        .filter(|e| e.name().is_none())
        .nth(index)
        .and_then(|e| e.value().as_string())
        .map(|s| s.to_string())
}
