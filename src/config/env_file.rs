//! Application `.env` file inspection.
//!
//! The bot reads its Telegram token, admin id and Flask secret from a
//! `.env` file next to the entry point, falling back to baked-in defaults.
//! The launcher only reads the file to warn about keys that would fall back.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parses `KEY=value` environment files.
///
/// # Supported Formats
///
/// - Simple: `KEY=value`
/// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
/// - Exported: `export KEY=value`
/// - Comments: `# This is a comment`
///
/// # Example
///
/// ```
/// use rentbot_launcher::config::EnvFileParser;
///
/// let vars = EnvFileParser::parse("# bot\nTELEGRAM_BOT_TOKEN=\"123:abc\"\nSECRET_KEY=\n");
/// assert_eq!(vars.get("TELEGRAM_BOT_TOKEN"), Some(&"123:abc".to_string()));
/// assert_eq!(vars.get("SECRET_KEY"), Some(&"".to_string()));
/// ```
pub struct EnvFileParser;

impl EnvFileParser {
    /// Parse file content into a map of variables.
    pub fn parse(content: &str) -> HashMap<String, String> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Self::parse_line)
            .collect()
    }

    fn parse_line(line: &str) -> Option<(String, String)> {
        let line = line.strip_prefix("export ").unwrap_or(line);
        let (key, value) = line.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), Self::unquote(value.trim()).to_string()))
    }

    fn unquote(value: &str) -> &str {
        let quoted = value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')));
        if quoted {
            &value[1..value.len() - 1]
        } else {
            value
        }
    }

    /// Load a file, returning an empty map when it does not exist or
    /// cannot be read.
    pub fn load_optional(path: &Path) -> HashMap<String, String> {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::debug!("No env file at {}: {}", path.display(), e);
                HashMap::new()
            }
        }
    }
}

/// Keys from `required` that have a non-empty value in neither `file_vars`
/// nor the process environment (as seen through `env_fn`).
pub fn missing_keys<F>(
    required: &[String],
    file_vars: &HashMap<String, String>,
    env_fn: F,
) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    required
        .iter()
        .filter(|key| {
            let in_file = file_vars.get(key.as_str()).is_some_and(|v| !v.is_empty());
            let in_env = env_fn(key.as_str()).is_some_and(|v| !v.is_empty());
            !in_file && !in_env
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_simple_and_quoted_values() {
        let vars = EnvFileParser::parse("A=1\nB=\"two words\"\nC='three'\n");
        assert_eq!(vars.get("A"), Some(&"1".to_string()));
        assert_eq!(vars.get("B"), Some(&"two words".to_string()));
        assert_eq!(vars.get("C"), Some(&"three".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let vars = EnvFileParser::parse("# comment\n\n   \nKEY=value\n");
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn keeps_equals_in_value() {
        let vars = EnvFileParser::parse("URL=https://example.com?a=b");
        assert_eq!(vars.get("URL"), Some(&"https://example.com?a=b".to_string()));
    }

    #[test]
    fn handles_export_prefix_and_spacing() {
        let vars = EnvFileParser::parse("export SECRET_KEY = abc");
        assert_eq!(vars.get("SECRET_KEY"), Some(&"abc".to_string()));
    }

    #[test]
    fn ignores_lines_without_key() {
        let vars = EnvFileParser::parse("=value\nnot a pair\n");
        assert!(vars.is_empty());
    }

    #[test]
    fn single_quote_char_is_not_unquoted() {
        let vars = EnvFileParser::parse("Q=\"");
        assert_eq!(vars.get("Q"), Some(&"\"".to_string()));
    }

    #[test]
    fn load_optional_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(EnvFileParser::load_optional(&temp.path().join(".env")).is_empty());
    }

    #[test]
    fn load_optional_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".env");
        std::fs::write(&path, "TELEGRAM_BOT_TOKEN=123\n").unwrap();
        let vars = EnvFileParser::load_optional(&path);
        assert_eq!(vars.get("TELEGRAM_BOT_TOKEN"), Some(&"123".to_string()));
    }

    #[test]
    fn missing_keys_checks_file_and_env() {
        let required = vec![
            "TELEGRAM_BOT_TOKEN".to_string(),
            "ADMIN_TELEGRAM_ID".to_string(),
            "SECRET_KEY".to_string(),
        ];
        let file_vars = EnvFileParser::parse("TELEGRAM_BOT_TOKEN=123\nSECRET_KEY=\n");
        let env = |key: &str| (key == "ADMIN_TELEGRAM_ID").then(|| "42".to_string());

        let missing = missing_keys(&required, &file_vars, env);
        assert_eq!(missing, vec!["SECRET_KEY".to_string()]);
    }
}
