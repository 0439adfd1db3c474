//! The option store
//!
//! `Options` is rebuilt on every run: defaults first, then command-line
//! values, then whatever the cache contributes. It is passed by value from
//! the parser to the resolver and only read after that.

pub mod schema;

pub use schema::{BuildType, Compiler, Flag, OptionKey, OptionValue, ValueOption};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Default build directory, relative to the source root
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Generator sentinel meaning "let CMake or the compiler choose"
pub const DEFAULT_GENERATOR: &str = "default";

/// Current values of every recognized option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    flags: BTreeSet<Flag>,
    pub build_dir: PathBuf,
    /// Empty means no install prefix
    pub install_dir: PathBuf,
    /// Empty means compilers are looked up on PATH
    pub compiler_dir: PathBuf,
    pub generator: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            flags: BTreeSet::new(),
            build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
            install_dir: PathBuf::new(),
            compiler_dir: PathBuf::new(),
            generator: DEFAULT_GENERATOR.to_string(),
        }
    }
}

impl Options {
    /// Check whether a switch is on
    pub fn is_set(&self, flag: Flag) -> bool {
        self.flags.contains(&flag)
    }

    /// Turn a switch on or off
    pub fn set_flag(&mut self, flag: Flag, on: bool) {
        if on {
            self.flags.insert(flag);
        } else {
            self.flags.remove(&flag);
        }
    }

    /// Store a value for a value-taking option
    ///
    /// A `Path` value given to the generator is stored by its display form,
    /// a `Choice` given to a directory option becomes a path; `Bool` values
    /// are ignored since no value option is boolean.
    pub fn assign(&mut self, option: ValueOption, value: OptionValue) {
        let value = match value {
            OptionValue::Path(path) => path,
            OptionValue::Choice(choice) => PathBuf::from(choice),
            OptionValue::Bool(_) => return,
        };
        match option {
            ValueOption::BuildDir => self.build_dir = value,
            ValueOption::InstallDir => self.install_dir = value,
            ValueOption::CompilerDir => self.compiler_dir = value,
            ValueOption::Generator => self.generator = value.to_string_lossy().into_owned(),
        }
    }

    /// Current value of any option as a tagged value
    pub fn get(&self, key: OptionKey) -> OptionValue {
        match key {
            OptionKey::Flag(flag) => OptionValue::Bool(self.is_set(flag)),
            OptionKey::Value(ValueOption::BuildDir) => OptionValue::Path(self.build_dir.clone()),
            OptionKey::Value(ValueOption::InstallDir) => {
                OptionValue::Path(self.install_dir.clone())
            }
            OptionKey::Value(ValueOption::CompilerDir) => {
                OptionValue::Path(self.compiler_dir.clone())
            }
            OptionKey::Value(ValueOption::Generator) => {
                OptionValue::Choice(self.generator.clone())
            }
        }
    }

    /// Compilers whose switch is on, in `Compiler::ALL` order
    pub fn compilers(&self) -> Vec<Compiler> {
        Compiler::ALL
            .into_iter()
            .filter(|c| self.is_set(c.flag()))
            .collect()
    }

    /// The single selected compiler, `None` when zero or several are on
    pub fn compiler(&self) -> Option<Compiler> {
        match self.compilers().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Build type implied by the switches; release only wins when debug is off
    pub fn build_type(&self) -> BuildType {
        if !self.is_set(Flag::Debug) && self.is_set(Flag::Release) {
            BuildType::Release
        } else {
            BuildType::Debug
        }
    }

    pub fn install_dir(&self) -> Option<&Path> {
        if self.install_dir.as_os_str().is_empty() {
            None
        } else {
            Some(&self.install_dir)
        }
    }

    /// Whether the cache file should be read and written this run
    pub fn caching_enabled(&self) -> bool {
        !self.is_set(Flag::NoCache)
    }
}

/// Option names present in the raw argument list
///
/// The cache only overrides options the user did not type, so restoration
/// consults presence here rather than the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitArgs {
    present: BTreeSet<OptionKey>,
}

impl ExplicitArgs {
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self {
            present: tokens
                .iter()
                .filter_map(|t| OptionKey::from_token(t.as_ref()))
                .collect(),
        }
    }

    pub fn contains(&self, key: OptionKey) -> bool {
        self.present.contains(&key)
    }

    pub fn has_flag(&self, flag: Flag) -> bool {
        self.contains(OptionKey::Flag(flag))
    }

    pub fn has_value(&self, option: ValueOption) -> bool {
        self.contains(OptionKey::Value(option))
    }
}
