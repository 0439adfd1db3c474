//! Text format of the cache file
//!
//! One `Key=Value` pair per line. Records are written in a fixed key order
//! and read in any order.

use crate::error::Warning;
use crate::options::{BuildType, Compiler};
use std::fmt;
use std::path::PathBuf;

/// Keys the cache file may contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheKey {
    BuildDir,
    InstallDir,
    CompilerDir,
    Compiler,
    Generator,
    BuildType,
}

impl CacheKey {
    /// Keys in the order they are written
    pub const ORDER: [CacheKey; 6] = [
        CacheKey::BuildDir,
        CacheKey::InstallDir,
        CacheKey::CompilerDir,
        CacheKey::Compiler,
        CacheKey::Generator,
        CacheKey::BuildType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuildDir => "BuildDir",
            Self::InstallDir => "InstallDir",
            Self::CompilerDir => "CompilerDir",
            Self::Compiler => "Compiler",
            Self::Generator => "Generator",
            Self::BuildType => "BuildType",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single decoded cache line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    BuildDir(PathBuf),
    InstallDir(PathBuf),
    CompilerDir(PathBuf),
    /// `None` is the "default" compiler
    Compiler(Option<Compiler>),
    Generator(String),
    BuildType(BuildType),
}

impl CacheEntry {
    /// Decode a value for a known key, `None` if the value is not valid for it
    fn decode(key: CacheKey, value: &str) -> Option<Self> {
        match key {
            CacheKey::BuildDir => Some(Self::BuildDir(PathBuf::from(value))),
            CacheKey::InstallDir => Some(Self::InstallDir(PathBuf::from(value))),
            CacheKey::CompilerDir => Some(Self::CompilerDir(PathBuf::from(value))),
            CacheKey::Compiler => Compiler::parse_label(value).map(Self::Compiler),
            CacheKey::Generator => Some(Self::Generator(value.to_string())),
            CacheKey::BuildType => BuildType::parse(value).map(Self::BuildType),
        }
    }
}

/// Entries read from a cache file, plus lines that were skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedCache {
    pub entries: Vec<CacheEntry>,
    pub warnings: Vec<Warning>,
}

/// Decode cache text
///
/// A line without exactly one `=` makes the whole file malformed and the
/// offending line number is returned as the error. Unknown keys and
/// invalid values are skipped with a warning.
pub fn decode(text: &str) -> Result<DecodedCache, String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut decoded = DecodedCache::default();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split('=');
        let (key, value) = match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => (key, value),
            _ => return Err(format!("line {} is not a Key=Value pair", index + 1)),
        };

        let Some(key) = CacheKey::parse(key) else {
            decoded.warnings.push(Warning::InvalidCacheKey(key.to_string()));
            continue;
        };

        match CacheEntry::decode(key, value) {
            Some(entry) => decoded.entries.push(entry),
            None => decoded.warnings.push(Warning::InvalidCacheValue {
                key: key.as_str(),
                value: value.to_string(),
            }),
        }
    }

    Ok(decoded)
}

/// Everything persisted at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheRecord {
    pub build_dir: PathBuf,
    pub install_dir: PathBuf,
    pub compiler_dir: PathBuf,
    pub compiler: Option<Compiler>,
    pub generator: String,
    pub build_type: BuildType,
}

impl CacheRecord {
    fn value(&self, key: CacheKey) -> String {
        match key {
            CacheKey::BuildDir => self.build_dir.display().to_string(),
            CacheKey::InstallDir => self.install_dir.display().to_string(),
            CacheKey::CompilerDir => self.compiler_dir.display().to_string(),
            CacheKey::Compiler => Compiler::label(self.compiler).to_string(),
            CacheKey::Generator => self.generator.clone(),
            CacheKey::BuildType => self.build_type.to_string(),
        }
    }

    /// Keys whose values the line format cannot carry
    ///
    /// A value with `=` or a line break encodes fine but makes the file
    /// malformed for `decode`.
    pub fn unencodable(&self) -> Vec<(CacheKey, String)> {
        CacheKey::ORDER
            .into_iter()
            .map(|key| (key, self.value(key)))
            .filter(|(_, value)| value.contains(['=', '\n', '\r']))
            .collect()
    }

    /// Encode as six `Key=Value` lines in fixed order
    pub fn encode(&self) -> String {
        CacheKey::ORDER
            .into_iter()
            .map(|key| format!("{}={}\n", key, self.value(key)))
            .collect()
    }
}
