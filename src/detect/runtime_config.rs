//! Generated `*.runtimeconfig.json` descriptors.
//!
//! Only the shared framework reference is read:
//!
//! ```json
//! {
//!   "runtimeOptions": {
//!     // framework-dependent deployment
//!     "framework": { "name": "Microsoft.NETCore.App", "version": "6.0.0" }
//!   }
//! }
//! ```
//!
//! The files are JSON, but tooling tolerates `//` and `/* */` comments, so
//! comments are stripped before decoding.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::RUNTIME_CONFIG_GLOB;
use crate::core::ResolveError;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuntimeConfig {
    #[serde(default)]
    runtime_options: RuntimeOptions,
}

#[derive(Debug, Default, Deserialize)]
struct RuntimeOptions {
    #[serde(default)]
    framework: Option<Framework>,
}

/// The framework an application was built against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Framework {
    /// Shared framework name, e.g. `Microsoft.NETCore.App`
    #[serde(default)]
    pub name: String,
    /// Framework version as written
    #[serde(default)]
    pub version: String,
}

/// Locate the single runtime descriptor in `app_root`.
///
/// # Errors
///
/// Returns [`ResolveError::AmbiguousRuntimeConfig`] if more than one file matches.
pub fn find(app_root: &Path) -> Result<Option<PathBuf>, ResolveError> {
    let root = glob::Pattern::escape(&app_root.to_string_lossy());
    let pattern = Path::new(&root).join(RUNTIME_CONFIG_GLOB);
    let pattern = pattern.to_string_lossy();

    let mut matches: Vec<PathBuf> = match glob::glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_file()).collect(),
        Err(e) => {
            tracing::debug!("Invalid runtime config pattern {}: {}", pattern, e);
            Vec::new()
        }
    };
    matches.sort();

    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        _ => Err(ResolveError::AmbiguousRuntimeConfig {
            paths: matches.iter().map(|p| p.display().to_string()).collect(),
        }),
    }
}

/// Read the framework reference from a descriptor.
///
/// Returns `Ok(None)` for self-contained apps, which declare no framework.
///
/// # Errors
///
/// Returns [`ResolveError::RuntimeConfigError`] if the file cannot be read or decoded.
pub fn parse(path: &Path) -> Result<Option<Framework>, ResolveError> {
    let config_error = |reason: String| ResolveError::RuntimeConfigError {
        path: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
    let config: RuntimeConfig =
        serde_json::from_str(&strip_comments(&content)).map_err(|e| config_error(e.to_string()))?;

    Ok(config.runtime_options.framework.filter(|f| !f.name.is_empty()))
}

/// Remove `//` line comments and `/* */` block comments outside string literals.
#[must_use]
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CONFIG: &str = r#"{
  "runtimeOptions": {
    "tfm": "net6.0",
    "framework": {
      "name": "Microsoft.NETCore.App",
      "version": "6.0.0"
    }
  }
}"#;

    #[test]
    fn test_strip_comments() {
        let input = "{ // line\n \"a\": /* block */ 1, \"url\": \"http://x/*y*/\" }";
        let stripped = strip_comments(input);
        assert!(!stripped.contains("line"));
        assert!(!stripped.contains("block"));
        assert!(stripped.contains("\"http://x/*y*/\""));

        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_strip_comments_escaped_quote() {
        let input = r#"{"a": "say \"hi\" // not a comment"}"#;
        assert_eq!(strip_comments(input), input);
    }

    #[test]
    fn test_parse_framework() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.runtimeconfig.json");
        fs::write(&path, CONFIG).unwrap();

        assert_eq!(
            parse(&path).unwrap(),
            Some(Framework {
                name: "Microsoft.NETCore.App".into(),
                version: "6.0.0".into(),
            })
        );
    }

    #[test]
    fn test_parse_with_comments() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.runtimeconfig.json");
        fs::write(
            &path,
            "{\n  // generated\n  \"runtimeOptions\": { /* fdd */ \"framework\": { \"name\": \"Microsoft.NETCore.App\", \"version\": \"2.1.0\" } }\n}",
        )
        .unwrap();

        assert_eq!(parse(&path).unwrap().map(|f| f.version), Some("2.1.0".to_string()));
    }

    #[test]
    fn test_self_contained_has_no_framework() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.runtimeconfig.json");
        fs::write(&path, r#"{"runtimeOptions": {"configProperties": {}}}"#).unwrap();
        assert_eq!(parse(&path).unwrap(), None);
    }

    #[test]
    fn test_parse_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.runtimeconfig.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(parse(&path).unwrap_err(), ResolveError::RuntimeConfigError { .. }));
    }

    #[test]
    fn test_find() {
        let temp = TempDir::new().unwrap();
        assert_eq!(find(temp.path()).unwrap(), None);

        fs::write(temp.path().join("app.runtimeconfig.json"), CONFIG).unwrap();
        fs::write(temp.path().join("app.deps.json"), "{}").unwrap();
        assert_eq!(find(temp.path()).unwrap(), Some(temp.path().join("app.runtimeconfig.json")));

        fs::write(temp.path().join("other.runtimeconfig.json"), CONFIG).unwrap();
        match find(temp.path()).unwrap_err() {
            ResolveError::AmbiguousRuntimeConfig {
                paths,
            } => assert_eq!(paths.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_find_in_directory_with_glob_characters() {
        let temp = TempDir::new().unwrap();
        let app_root = temp.path().join("app[1]");
        fs::create_dir_all(&app_root).unwrap();
        fs::write(app_root.join("app.runtimeconfig.json"), CONFIG).unwrap();

        assert_eq!(find(&app_root).unwrap(), Some(app_root.join("app.runtimeconfig.json")));
    }
}
