use brand_site_core::{Error, Result};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

const DELIMITER: &str = "---";

/// One Markdown source file split into its frontmatter and body
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub source_path: PathBuf,
    pub frontmatter: Mapping,
    pub body: String,
}

impl ContentRecord {
    /// Split `content` into a YAML frontmatter mapping and the Markdown body.
    ///
    /// Files without a leading `---` block have an empty mapping and the whole
    /// file as body.
    pub fn parse<P: Into<PathBuf>>(source_path: P, content: &str) -> Result<Self> {
        let source_path = source_path.into();
        let content = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");

        let (raw_frontmatter, body) = split_frontmatter(&content);
        let frontmatter = match raw_frontmatter {
            Some(raw) => parse_mapping(raw, &source_path)?,
            None => Mapping::new(),
        };

        Ok(Self {
            source_path,
            frontmatter,
            body: body.to_string(),
        })
    }

    /// Deserialize the frontmatter into a typed struct for one content variant
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_yaml::from_value(Value::Mapping(self.frontmatter.clone()))?)
    }

    /// File stem, used as slug or page key when the frontmatter has none
    pub fn file_stem(&self) -> String {
        self.source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string()
    }
}

/// Text field that accepts any YAML scalar, so `title: 1984` reads as `"1984"`.
///
/// Use with `#[serde(deserialize_with = "scalar_string")]` on `Option<String>`
/// fields. Sequences and mappings are still errors.
pub fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Sequence(_)) => Err(de::Error::custom("expected a scalar, found a list")),
        Some(Value::Mapping(_)) => Err(de::Error::custom("expected a scalar, found a mapping")),
        Some(Value::Tagged(_)) => Err(de::Error::custom("expected a scalar, found a tagged value")),
    }
}

/// Returns `(frontmatter, body)`. The opening delimiter must be the first
/// line; the closing one must sit on its own line.
fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some((opening, rest)) = content.split_once('\n') else {
        return (None, content);
    };
    if opening.trim_end() != DELIMITER {
        return (None, content);
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let frontmatter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(frontmatter), body.trim_start_matches('\n'));
        }
        offset += line.len();
    }

    (None, content)
}

fn parse_mapping(raw: &str, source_path: &Path) -> Result<Mapping> {
    if raw.trim().is_empty() {
        return Ok(Mapping::new());
    }
    match serde_yaml::from_str::<Value>(raw)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(Error::InvalidData(format!(
            "{}: frontmatter must be a key/value mapping",
            source_path.display()
        ))),
    }
}
