//! Object name normalization.
//!
//! Turns a user-supplied, optionally schema-qualified name into the canonical
//! (schema, object) pair used as the cache key and as the describe request.
//! Unquoted parts are folded to upper case; quoted parts are kept verbatim,
//! quotes included.

use std::fmt;

use log::warn;

use crate::config::{IdentifierOverflow, TypeInfoOptions};
use crate::error::{Error, Result};
use crate::protocol::describe::SynonymTarget;

const QUOTE: char = '"';

/// Canonical identity of a catalog object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectName {
    /// Schema, empty when the name was not qualified.
    pub schema: String,
    /// Object name.
    pub object: String,
    /// Database link, for objects reached through a remote synonym.
    pub link: Option<String>,
}

impl ObjectName {
    /// Build a name from parts that are already canonical.
    pub fn new(schema: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            object: object.into(),
            link: None,
        }
    }

    /// Parse and normalize a raw name under the given options.
    pub fn parse(raw: &str, options: &TypeInfoOptions) -> Result<Self> {
        if raw.is_empty() {
            return Err(Error::invalid_argument("object name is empty"));
        }

        let (schema, rest) = match split_unquoted(raw, '.') {
            Some((schema, rest)) => (schema, rest),
            None => ("", raw),
        };
        let (object, link) = match split_unquoted(rest, '@') {
            Some((object, link)) => (object, Some(link)),
            None => (rest, None),
        };

        if object.is_empty() {
            return Err(Error::invalid_argument(format!(
                "object name '{}' has no object part",
                raw
            )));
        }

        Ok(Self {
            schema: canonical_part(schema, options)?,
            object: canonical_part(object, options)?,
            link: match link {
                Some(link) if !link.is_empty() => Some(canonical_part(link, options)?),
                _ => None,
            },
        })
    }

    /// Name of a synonym's target. The parts come from the catalog already
    /// canonical, so no case folding is applied.
    pub fn from_synonym_target(target: &SynonymTarget) -> Self {
        Self {
            schema: target.schema.clone(),
            object: target.object.clone(),
            link: target.link.clone().filter(|link| !link.is_empty()),
        }
    }

    /// Fully qualified name as sent in a describe request.
    pub fn qualified(&self) -> String {
        self.to_string()
    }

    /// Case-insensitive identity comparison.
    pub fn matches(&self, other: &ObjectName) -> bool {
        eq_ignore_case(&self.schema, &other.schema)
            && eq_ignore_case(&self.object, &other.object)
            && match (&self.link, &other.link) {
                (None, None) => true,
                (Some(a), Some(b)) => eq_ignore_case(a, b),
                _ => false,
            }
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.schema.is_empty() {
            write!(f, "{}.", self.schema)?;
        }
        write!(f, "{}", self.object)?;
        if let Some(link) = &self.link {
            write!(f, "@{}", link)?;
        }
        Ok(())
    }
}

/// Normalize a raw name with the default options.
///
/// ```
/// use oracle_typeinfo::typeinfo::name::normalize;
///
/// let name = normalize("hr.emp").unwrap();
/// assert_eq!((name.schema.as_str(), name.object.as_str()), ("HR", "EMP"));
/// ```
pub fn normalize(raw_name: &str) -> Result<ObjectName> {
    ObjectName::parse(raw_name, &TypeInfoOptions::default())
}

/// Split at the first `sep` that is not inside a quoted identifier.
fn split_unquoted(s: &str, sep: char) -> Option<(&str, &str)> {
    let mut quoted = false;
    for (i, c) in s.char_indices() {
        if c == QUOTE {
            quoted = !quoted;
        } else if c == sep && !quoted {
            return Some((&s[..i], &s[i + c.len_utf8()..]));
        }
    }
    None
}

fn canonical_part(part: &str, options: &TypeInfoOptions) -> Result<String> {
    // folding may lengthen a part (ß -> SS), so the bound applies afterwards
    let folded = if part.starts_with(QUOTE) {
        part.to_string()
    } else {
        part.to_uppercase()
    };

    let max_len = options.max_identifier_len;
    if folded.chars().count() <= max_len {
        return Ok(folded);
    }
    match options.identifier_overflow {
        IdentifierOverflow::Reject => Err(Error::IdentifierTooLong {
            identifier: part.to_string(),
            max_len,
        }),
        IdentifierOverflow::Truncate => {
            warn!("identifier '{}' truncated to {} characters", part, max_len);
            Ok(folded.chars().take(max_len).collect())
        }
    }
}

pub(crate) fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_uppercase)
        .eq(b.chars().flat_map(char::to_uppercase))
}
