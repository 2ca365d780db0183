//! A small INI-like document format.
//!
//! Network descriptions are plain text: `[section]` headers, `key = value`
//! properties, `;` or `#` comments. Values are frequently comma-separated
//! lists, so properties expose both the raw string and the trimmed items.
//! Properties before the first header belong to the root section `""`.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Error;

/// One property value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Property {
    raw: String,
}

impl Property {
    pub fn new(raw: impl Into<String>) -> Self {
        Property { raw: raw.into() }
    }

    pub fn string(&self) -> &str {
        &self.raw
    }

    /// The value split on commas, each item trimmed.
    pub fn items(&self) -> Vec<String> {
        if self.raw.trim().is_empty() {
            return Vec::new();
        }
        self.raw.split(',').map(|s| s.trim().to_string()).collect()
    }
}

pub type Section = BTreeMap<String, Property>;

#[derive(Clone, Debug, Default)]
pub struct IniDoc {
    sections: BTreeMap<String, Section>,
}

impl IniDoc {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut doc = IniDoc::default();
        let mut current = String::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[') {
                let name = name
                    .strip_suffix(']')
                    .ok_or_else(|| {
                        Error::Config(format!("line {}: unterminated section header", number + 1))
                    })?
                    .trim();
                current = name.to_string();
                doc.sections.entry(current.clone()).or_default();
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| {
                Error::Config(format!("line {}: expected 'key = value'", number + 1))
            })?;
            doc.sections
                .entry(current.clone())
                .or_default()
                .insert(key.trim().to_string(), Property::new(value.trim()));
        }
        Ok(doc)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn property(&self, section: &str, key: &str) -> Option<&Property> {
        self.sections.get(section)?.get(key)
    }

    /// Like [`property`](Self::property), but a missing key is a config
    /// error naming the section.
    pub fn require(&self, section: &str, key: &str) -> Result<&Property, Error> {
        self.property(section, key).ok_or_else(|| {
            Error::Config(format!("missing property '{key}' in section [{section}]"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "\
lines = 12, 14
; a comment
[stops]
center = Main square, underground
[12.north]
description = Northbound
stops = a, b, c
";

    #[test]
    fn parses_sections_and_root_properties() {
        let doc = IniDoc::parse(DOC).unwrap();
        assert_eq!(
            doc.require("", "lines").unwrap().items(),
            vec!["12", "14"]
        );
        assert_eq!(
            doc.property("12.north", "description").unwrap().string(),
            "Northbound"
        );
        assert_eq!(
            doc.property("stops", "center").unwrap().items(),
            vec!["Main square", "underground"]
        );
        assert!(doc.section("walking").is_none());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(IniDoc::parse("[unterminated").is_err());
        assert!(IniDoc::parse("no equals sign").is_err());
    }

    #[test]
    fn missing_required_property_names_the_section() {
        let doc = IniDoc::parse(DOC).unwrap();
        let err = doc.require("12.north", "durations").unwrap_err();
        assert!(err.to_string().contains("12.north"));
    }
}
