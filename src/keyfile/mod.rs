//! Reader for the INI-style key-file format.
//!
//! Both portal configuration files and `.desktop` entries use this format:
//! `[Group]` headers followed by `key=value` lines, with `#` comments.

mod error;


use std::{collections::HashMap, fs, path::Path, str::FromStr};

pub use error::KeyFileError;

#[derive(Debug, Clone, Default)]
struct Group {
    name: String,
    entries: HashMap<String, String>,
}

/// A parsed key file.
///
/// Group order follows the file. A group that appears more than once is
/// merged into its first occurrence, and repeated keys keep the last value.
#[derive(Debug, Clone, Default)]
pub struct KeyFile {
    groups: Vec<Group>,
}

impl KeyFile {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    /// Returns `KeyFileError::Io` if the file cannot be read and
    /// `KeyFileError::Parse` if its contents are malformed.
    pub fn load(path: &Path) -> Result<Self, KeyFileError> {
        let contents = fs::read_to_string(path).map_err(|e| KeyFileError::Io {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        Self::parse(&contents)
    }

    /// Parses key-file contents from a string.
    ///
    /// # Errors
    /// Returns `KeyFileError::Parse` with the offending line number when a
    /// line is not blank, a comment, a group header or a `key=value` pair.
    pub fn parse(contents: &str) -> Result<Self, KeyFileError> {
        let mut key_file = KeyFile::default();
        let mut current: Option<usize> = None;

        for (index, raw_line) in contents.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim_start();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .trim_end()
                    .strip_suffix(']')
                    .filter(|name| !name.is_empty() && !name.contains(['[', ']']))
                    .ok_or_else(|| KeyFileError::parse(line_number, "invalid group header"))?;

                current = Some(key_file.group_index_or_insert(name));
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(KeyFileError::parse(
                    line_number,
                    "expected a group header or key=value pair",
                ));
            };

            let key = key.trim_end();
            if key.is_empty() {
                return Err(KeyFileError::parse(line_number, "empty key name"));
            }

            let Some(group_index) = current else {
                return Err(KeyFileError::parse(
                    line_number,
                    "key=value pair found before any group",
                ));
            };

            key_file.groups[group_index]
                .entries
                .insert(key.to_string(), value.trim_start().to_string());
        }

        Ok(key_file)
    }

    fn group_index_or_insert(&mut self, name: &str) -> usize {
        if let Some(index) = self.groups.iter().position(|group| group.name == name) {
            return index;
        }

        self.groups.push(Group {
            name: name.to_string(),
            entries: HashMap::new(),
        });
        self.groups.len() - 1
    }

    /// Iterates group names in file order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.name.as_str())
    }

    /// Whether a group named `group` exists.
    pub fn has_group(&self, group: &str) -> bool {
        self.group(group).is_some()
    }

    fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Returns the undecoded value stored at `group`/`key`.
    ///
    /// # Errors
    /// Returns `GroupNotFound` or `KeyNotFound` when either is absent.
    pub fn raw_value(&self, group: &str, key: &str) -> Result<&str, KeyFileError> {
        let entries = &self
            .group(group)
            .ok_or_else(|| KeyFileError::GroupNotFound(group.to_string()))?
            .entries;

        entries
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| KeyFileError::KeyNotFound {
                group: group.to_string(),
                key: key.to_string(),
            })
    }

    /// Returns the value at `group`/`key` with escape sequences decoded.
    ///
    /// # Errors
    /// Returns a lookup error when the entry is missing, or `InvalidValue`
    /// for an unknown escape sequence.
    pub fn string(&self, group: &str, key: &str) -> Result<String, KeyFileError> {
        let raw = self.raw_value(group, key)?;
        unescape(raw).map_err(|reason| KeyFileError::invalid_value(group, key, reason))
    }

    /// Returns the value at `group`/`key` as a signed 32-bit integer.
    ///
    /// # Errors
    /// Returns a lookup error when the entry is missing, or `InvalidValue`
    /// if it does not parse as an `i32`.
    pub fn integer(&self, group: &str, key: &str) -> Result<i32, KeyFileError> {
        self.parsed(group, key, "integer")
    }

    /// Returns the value at `group`/`key` as a boolean.
    ///
    /// Accepts `true`, `false`, `1` and `0`.
    ///
    /// # Errors
    /// Returns a lookup error when the entry is missing, or `InvalidValue`
    /// for any other spelling.
    pub fn boolean(&self, group: &str, key: &str) -> Result<bool, KeyFileError> {
        match self.raw_value(group, key)?.trim_end() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(KeyFileError::invalid_value(
                group,
                key,
                format!("'{other}' is not a boolean"),
            )),
        }
    }

    /// Returns the `;`-separated list at `group`/`key` as strings.
    ///
    /// A single trailing separator is ignored and `\;` is kept as a literal
    /// semicolon inside an element.
    ///
    /// # Errors
    /// Returns a lookup error when the entry is missing, or `InvalidValue`
    /// for an unknown escape sequence.
    pub fn string_list(&self, group: &str, key: &str) -> Result<Vec<String>, KeyFileError> {
        let raw = self.raw_value(group, key)?;
        split_list(raw)
            .into_iter()
            .map(|item| unescape(&item))
            .collect::<Result<_, _>>()
            .map_err(|reason| KeyFileError::invalid_value(group, key, reason))
    }

    /// Returns the `;`-separated list at `group`/`key` as doubles.
    ///
    /// # Errors
    /// Returns a lookup error when the entry is missing, or `InvalidValue`
    /// if any element is not a number.
    pub fn double_list(&self, group: &str, key: &str) -> Result<Vec<f64>, KeyFileError> {
        self.string_list(group, key)?
            .iter()
            .map(|item| {
                item.trim().parse::<f64>().map_err(|_| {
                    KeyFileError::invalid_value(group, key, format!("'{item}' is not a number"))
                })
            })
            .collect()
    }

    fn parsed<T: FromStr>(&self, group: &str, key: &str, kind: &str) -> Result<T, KeyFileError> {
        let raw = self.raw_value(group, key)?.trim_end();
        raw.parse::<T>().map_err(|_| {
            KeyFileError::invalid_value(group, key, format!("'{raw}' is not a valid {kind}"))
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                current.push(c);
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            ';' => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        items.push(current);
    }

    items
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(';') => out.push(';'),
            Some(other) => return Err(format!("invalid escape sequence '\\{other}'")),
            None => return Err("trailing backslash".to_string()),
        }
    }

    Ok(out)
}
