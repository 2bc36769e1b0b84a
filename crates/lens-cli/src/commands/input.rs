//! Input helpers shared by the filter commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use lens_api::models::{AttributeDescriptor, LensConfig, Sort};
use lens_filter::AttributeRegistry;
use serde_json::Value;

use super::{CommandError, Result};

/// Reads a JSON document from a file, or from stdin for `None` and `-`.
pub fn read_json(path: Option<&Path>) -> Result<Value> {
    let content = match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path).map_err(|e| {
            CommandError::Input(format!("Failed to read {}: {}", path.display(), e))
        })?,
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if content.trim().is_empty() {
        return Err(CommandError::Input("expected a JSON document, got nothing".to_string()));
    }
    Ok(serde_json::from_str(&content)?)
}

/// Parses attribute configuration: a config response object or a bare
/// descriptor list.
pub fn parse_attributes(value: Value) -> Result<LensConfig> {
    if value.is_array() {
        let attributes: Vec<AttributeDescriptor> = serde_json::from_value(value)?;
        return Ok(LensConfig {
            attributes,
            ..LensConfig::default()
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Loads the attribute registry and the config it came from.
pub fn load_attributes(path: &Path) -> Result<(AttributeRegistry, LensConfig)> {
    let config = parse_attributes(read_json(Some(path))?)?;
    Ok((AttributeRegistry::from_config(&config), config))
}

/// Parses an index path such as `1.0.2`.
pub fn parse_node_path(path: &str) -> Result<Vec<usize>> {
    path.split('.')
        .map(|segment| {
            segment.trim().parse::<usize>().map_err(|_| {
                CommandError::Input(format!(
                    "Invalid path '{}'. Use dot-separated indexes such as 1.0",
                    path
                ))
            })
        })
        .collect()
}

/// Parses sort keys: `field` ascending, `-field` descending.
pub fn parse_sorts(keys: &[String]) -> Result<Vec<Sort>> {
    keys.iter()
        .map(|key| {
            let (field, descending) = match key.strip_prefix('-') {
                Some(field) => (field, true),
                None => (key.as_str(), false),
            };
            if field.is_empty() {
                return Err(CommandError::Input(format!("Invalid sort key '{}'", key)));
            }
            Ok(if descending {
                Sort::desc(field)
            } else {
                Sort::asc(field)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_api::models::SortDirection;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("filter.json");
        fs::write(&path, r#"{"op":"and","conditions":[]}"#).unwrap();

        let value = read_json(Some(&path)).unwrap();
        assert_eq!(value, json!({"op": "and", "conditions": []}));
    }

    #[test]
    fn test_read_json_missing_file() {
        let err = read_json(Some(Path::new("/nonexistent/filter.json"))).unwrap_err();
        assert!(matches!(err, CommandError::Input(_)));
    }

    #[test]
    fn test_read_json_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.json");
        fs::write(&path, "  \n").unwrap();

        assert!(matches!(read_json(Some(&path)), Err(CommandError::Input(_))));
    }

    #[test]
    fn test_parse_attributes_accepts_both_shapes() {
        let from_list = parse_attributes(json!([{"name": "age", "type": "integer"}])).unwrap();
        assert_eq!(from_list.attributes.len(), 1);
        assert!(!from_list.unique_filters);

        let from_config = parse_attributes(json!({
            "attributes": [{"name": "age", "type": "integer"}],
            "uniqueFilters": true
        }))
        .unwrap();
        assert!(from_config.unique_filters);
    }

    #[test]
    fn test_parse_node_path() {
        assert_eq!(parse_node_path("0").unwrap(), vec![0]);
        assert_eq!(parse_node_path("1.0.2").unwrap(), vec![1, 0, 2]);
        assert!(parse_node_path("").is_err());
        assert!(parse_node_path("a.1").is_err());
    }

    #[test]
    fn test_parse_sorts() {
        let sorts = parse_sorts(&["name".to_string(), "-age".to_string()]).unwrap();
        assert_eq!(sorts[0].field, "name");
        assert_eq!(sorts[0].direction, SortDirection::Asc);
        assert_eq!(sorts[1].field, "age");
        assert_eq!(sorts[1].direction, SortDirection::Desc);
        assert!(parse_sorts(&["-".to_string()]).is_err());
    }
}
