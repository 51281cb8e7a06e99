//! Path variables: parsing `KEY=VALUE` declarations and `${NAME}` substitution

use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Variable name → literal replacement value, in declaration order
pub type VariableMap = IndexMap<String, String>;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("token pattern is valid"));

/// Outcome of substituting variables into a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Text with every known `${NAME}` replaced
    pub text: String,
    /// Names that had no value, in first-seen order; their tokens are left in `text`
    pub undefined: Vec<String>,
}

/// Replace `${NAME}` tokens in `text` with values from `vars`
///
/// Single pass: values inserted by a substitution are not scanned again.
/// Unknown names are not an error; they are reported in
/// [`Substitution::undefined`] and their tokens are kept verbatim.
///
/// # Examples
///
/// ```
/// use arsync_config::variables::{substitute, VariableMap};
///
/// let mut vars = VariableMap::new();
/// vars.insert("ROOT".to_string(), "/mnt/backup".to_string());
///
/// let result = substitute("${ROOT}/docs/${MISSING}", &vars);
/// assert_eq!(result.text, "/mnt/backup/docs/${MISSING}");
/// assert_eq!(result.undefined, vec!["MISSING".to_string()]);
/// ```
#[must_use]
pub fn substitute(text: &str, vars: &VariableMap) -> Substitution {
    if !text.contains("${") {
        return Substitution {
            text: text.to_string(),
            undefined: Vec::new(),
        };
    }

    let mut undefined: Vec<String> = Vec::new();
    let replaced = TOKEN.replace_all(text, |caps: &Captures<'_>| {
        let name = &caps[1];
        if let Some(value) = vars.get(name) {
            value.clone()
        } else {
            if !undefined.iter().any(|n| n == name) {
                undefined.push(name.to_string());
            }
            caps[0].to_string()
        }
    });

    Substitution {
        text: replaced.into_owned(),
        undefined,
    }
}

/// Build a [`VariableMap`] from the `variables` section
///
/// Each entry must be a string of the form `KEY=VALUE`. The key is trimmed;
/// the value is trimmed and any wrapping `'`/`"` characters are stripped.
/// Entries of any other shape are skipped. Later duplicates win.
#[must_use]
pub fn parse_variables(entries: &[serde_yaml::Value]) -> VariableMap {
    let mut variables = VariableMap::new();

    for entry in entries {
        let Some(declaration) = entry.as_str() else {
            tracing::debug!("Skipping non-string variable entry: {:?}", entry);
            continue;
        };

        match parse_declaration(declaration) {
            Some((key, value)) => {
                variables.insert(key, value);
            }
            None => {
                tracing::debug!("Skipping malformed variable entry: {}", declaration);
            }
        }
    }

    variables
}

fn parse_declaration(declaration: &str) -> Option<(String, String)> {
    let (key, value) = declaration.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
    Some((key.to_string(), value.to_string()))
}
