//! The closed set of recognized options
//!
//! Every option the bootstrapper understands is a variant here. Boolean
//! switches are `Flag`s, value-taking options are `ValueOption`s, and the
//! parser branches on which of the two a token names.

use std::fmt;
use std::path::PathBuf;

/// Boolean command-line switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    Install,
    Msvc,
    Gcc,
    Clang,
    Debug,
    Release,
    Rebuild,
    Clean,
    CleanCache,
    NoCache,
    BuildTests,
    BuildBenchmarks,
    BuildDocs,
    Static,
    Shared,
    Verbose,
    Help,
}

impl Flag {
    /// All flags in help order
    pub const ALL: [Flag; 17] = [
        Flag::Install,
        Flag::Gcc,
        Flag::Clang,
        Flag::Msvc,
        Flag::Debug,
        Flag::Release,
        Flag::Rebuild,
        Flag::Clean,
        Flag::CleanCache,
        Flag::NoCache,
        Flag::BuildTests,
        Flag::BuildBenchmarks,
        Flag::BuildDocs,
        Flag::Static,
        Flag::Shared,
        Flag::Verbose,
        Flag::Help,
    ];

    /// Long name without the leading dashes
    pub fn name(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Msvc => "msvc",
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::Debug => "debug",
            Self::Release => "release",
            Self::Rebuild => "rebuild",
            Self::Clean => "clean",
            Self::CleanCache => "clean-cache",
            Self::NoCache => "no-cache",
            Self::BuildTests => "build-tests",
            Self::BuildBenchmarks => "build-benchmarks",
            Self::BuildDocs => "build-docs",
            Self::Static => "static",
            Self::Shared => "shared",
            Self::Verbose => "verbose",
            Self::Help => "help",
        }
    }

    /// The token as typed on the command line
    pub fn token(&self) -> &'static str {
        match self {
            Self::Install => "--install",
            Self::Msvc => "--msvc",
            Self::Gcc => "--gcc",
            Self::Clang => "--clang",
            Self::Debug => "--debug",
            Self::Release => "--release",
            Self::Rebuild => "--rebuild",
            Self::Clean => "--clean",
            Self::CleanCache => "--clean-cache",
            Self::NoCache => "--no-cache",
            Self::BuildTests => "--build-tests",
            Self::BuildBenchmarks => "--build-benchmarks",
            Self::BuildDocs => "--build-docs",
            Self::Static => "--static",
            Self::Shared => "--shared",
            Self::Verbose => "--verbose",
            Self::Help => "--help",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Self::Install => "Run the installation step after building the project",
            Self::Msvc => "Use MSVC as the compiler",
            Self::Gcc => "Use GCC as the compiler",
            Self::Clang => "Use Clang as the compiler",
            Self::Debug => "Configure the project in Debug mode",
            Self::Release => "Configure the project in Release mode",
            Self::Rebuild => "Delete the build directory and perform a clean rebuild",
            Self::Clean => "Delete the build directory and exit",
            Self::CleanCache => "Delete the cache file",
            Self::NoCache => "Ignore the cache file for this run",
            Self::BuildTests => "Build the unit tests",
            Self::BuildBenchmarks => "Build the benchmarks",
            Self::BuildDocs => "Build the documentation",
            Self::Static => "Build static libraries",
            Self::Shared => "Build shared libraries",
            Self::Verbose => "Show detailed output",
            Self::Help => "Print this help and exit",
        }
    }
}

/// Options that take a value from the following token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueOption {
    BuildDir,
    InstallDir,
    CompilerDir,
    Generator,
}

impl ValueOption {
    pub const ALL: [ValueOption; 4] = [
        ValueOption::BuildDir,
        ValueOption::InstallDir,
        ValueOption::CompilerDir,
        ValueOption::Generator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BuildDir => "build-dir",
            Self::InstallDir => "install-dir",
            Self::CompilerDir => "compiler-dir",
            Self::Generator => "generator",
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::BuildDir => "--build-dir",
            Self::InstallDir => "--install-dir",
            Self::CompilerDir => "--compiler-dir",
            Self::Generator => "--generator",
        }
    }

    /// Placeholder shown in help output
    pub fn value_name(&self) -> &'static str {
        match self {
            Self::Generator => "NAME",
            Self::BuildDir | Self::InstallDir | Self::CompilerDir => "PATH",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Self::BuildDir => "Build directory (default: 'build')",
            Self::InstallDir => "Install directory",
            Self::CompilerDir => "Directory holding a custom compiler toolchain",
            Self::Generator => "CMake generator, e.g. 'Ninja' or 'Unix Makefiles'",
        }
    }

    /// Wrap a raw token in the value kind this option holds
    pub fn parse_value(&self, raw: impl Into<String>) -> OptionValue {
        match self {
            Self::BuildDir | Self::InstallDir | Self::CompilerDir => {
                OptionValue::Path(PathBuf::from(raw.into()))
            }
            Self::Generator => OptionValue::Choice(raw.into()),
        }
    }
}

/// Any recognized option name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    Flag(Flag),
    Value(ValueOption),
}

impl OptionKey {
    /// Look up a command-line token, `None` when it names no option
    pub fn from_token(token: &str) -> Option<Self> {
        if let Some(flag) = Flag::ALL.iter().find(|f| f.token() == token) {
            return Some(Self::Flag(*flag));
        }
        ValueOption::ALL
            .iter()
            .find(|v| v.token() == token)
            .map(|v| Self::Value(*v))
    }

    /// Every recognized option, value options first
    pub fn all() -> impl Iterator<Item = OptionKey> {
        ValueOption::ALL
            .into_iter()
            .map(OptionKey::Value)
            .chain(Flag::ALL.into_iter().map(OptionKey::Flag))
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Flag(flag) => flag.token(),
            Self::Value(option) => option.token(),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// The value held by an option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Path(PathBuf),
    Choice(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{}", value),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Choice(choice) => write!(f, "{}", choice),
        }
    }
}

/// Compiler toolchains the bootstrapper can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Compiler {
    Gcc,
    Clang,
    Msvc,
}

impl Compiler {
    pub const ALL: [Compiler; 3] = [Compiler::Gcc, Compiler::Clang, Compiler::Msvc];

    /// The switch that selects this compiler
    pub fn flag(&self) -> Flag {
        match self {
            Self::Gcc => Flag::Gcc,
            Self::Clang => Flag::Clang,
            Self::Msvc => Flag::Msvc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::Msvc => "msvc",
        }
    }

    /// Parse a cached compiler label. `Some(None)` is the "default" label.
    pub fn parse_label(label: &str) -> Option<Option<Self>> {
        match label {
            "default" => Some(None),
            "gcc" => Some(Some(Self::Gcc)),
            "clang" => Some(Some(Self::Clang)),
            "msvc" => Some(Some(Self::Msvc)),
            _ => None,
        }
    }

    /// Label for an optional compiler, "default" when none is selected
    pub fn label(compiler: Option<Self>) -> &'static str {
        compiler.map_or("default", |c| c.as_str())
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CMake build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
        }
    }

    /// Parse a cached build type, case-insensitive
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("debug") {
            Some(Self::Debug)
        } else if value.eq_ignore_ascii_case("release") {
            Some(Self::Release)
        } else {
            None
        }
    }

    /// The switch that selects this build type
    pub fn flag(&self) -> Flag {
        match self {
            Self::Debug => Flag::Debug,
            Self::Release => Flag::Release,
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
