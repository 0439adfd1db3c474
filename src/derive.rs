//! CMake argument derivation
//!
//! Turns a resolved configuration into the configure arguments CMake gets,
//! plus the compiler, generator and build type that end up in the cache.

use crate::cache::CacheRecord;
use crate::options::{BuildType, Compiler, Flag, Options, DEFAULT_GENERATOR};
use crate::resolve::ResolvedConfig;
use tracing::debug;

const NINJA: &str = "Ninja";
const UNIX_MAKEFILES: &str = "Unix Makefiles";
const VISUAL_STUDIO: &str = "Visual Studio 17 2022";

/// Feature switches and the CMake cache variable each one turns on
const FEATURES: [(Flag, &str); 5] = [
    (Flag::BuildTests, "HEPH_BUILD_TESTS"),
    (Flag::BuildBenchmarks, "HEPH_BUILD_BENCHMARKS"),
    (Flag::BuildDocs, "HEPH_BUILD_DOCS"),
    (Flag::Static, "HEPH_BUILD_STATIC"),
    (Flag::Shared, "HEPH_BUILD_SHARED"),
];

/// Host operating system family, as far as generator defaults care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Windows,
    Posix,
}

impl HostPlatform {
    /// Detect the current platform
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "windows" => HostPlatform::Windows,
            _ => HostPlatform::Posix,
        }
    }
}

impl Compiler {
    /// C and C++ compiler executable names
    pub fn executables(&self) -> (&'static str, &'static str) {
        match self {
            Self::Gcc => ("gcc", "g++"),
            Self::Clang => ("clang", "clang++"),
            Self::Msvc => ("cl", "cl"),
        }
    }

    /// Generators this toolchain can be driven with
    pub fn supported_generators(&self) -> &'static [&'static str] {
        match self {
            Self::Gcc | Self::Clang => &[NINJA, UNIX_MAKEFILES],
            Self::Msvc => &[VISUAL_STUDIO],
        }
    }

    /// Generator used when the requested one is unsupported
    pub fn default_generator(&self, host: HostPlatform) -> &'static str {
        match (self, host) {
            (Self::Msvc, _) => VISUAL_STUDIO,
            (Self::Gcc | Self::Clang, HostPlatform::Windows) => NINJA,
            (Self::Gcc | Self::Clang, HostPlatform::Posix) => UNIX_MAKEFILES,
        }
    }

    /// The requested generator if supported, otherwise the default one
    pub fn select_generator(&self, requested: &str, host: HostPlatform) -> &'static str {
        self.supported_generators()
            .iter()
            .copied()
            .find(|g| *g == requested)
            .unwrap_or_else(|| self.default_generator(host))
    }
}

/// Everything derived from a resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    /// Configure arguments, after `-S` and `-B`
    pub cmake_args: Vec<String>,
    pub compiler: Option<Compiler>,
    /// Effective generator, "default" when CMake chooses
    pub generator: String,
    pub build_type: BuildType,
}

impl Derivation {
    /// Record to persist for the next run
    pub fn cache_record(&self, options: &Options) -> CacheRecord {
        CacheRecord {
            build_dir: options.build_dir.clone(),
            install_dir: options.install_dir.clone(),
            compiler_dir: options.compiler_dir.clone(),
            compiler: self.compiler,
            generator: self.generator.clone(),
            build_type: self.build_type,
        }
    }
}

/// Compute CMake configure arguments
pub fn derive(config: &ResolvedConfig, host: HostPlatform) -> Derivation {
    let options = &config.options;
    let compiler = config.compiler();
    let build_type = config.build_type();
    let mut cmake_args = Vec::new();

    if let Some(install_dir) = options.install_dir() {
        cmake_args.push(format!("-DCMAKE_INSTALL_PREFIX={}", install_dir.display()));
    }

    let generator = match compiler {
        Some(compiler) => {
            let (c, cxx) = compiler.executables();
            cmake_args.push(format!(
                "-DCMAKE_C_COMPILER={}",
                options.compiler_dir.join(c).display()
            ));
            cmake_args.push(format!(
                "-DCMAKE_CXX_COMPILER={}",
                options.compiler_dir.join(cxx).display()
            ));

            let generator = compiler.select_generator(&options.generator, host);
            if generator != options.generator {
                debug!(
                    "Generator '{}' is not supported by {}, using '{}'",
                    options.generator, compiler, generator
                );
            }
            generator.to_string()
        }
        None => options.generator.clone(),
    };

    if generator != DEFAULT_GENERATOR {
        cmake_args.push("-G".to_string());
        cmake_args.push(generator.clone());
    }

    cmake_args.push(format!("-DCMAKE_BUILD_TYPE={}", build_type));

    for (flag, variable) in FEATURES {
        if options.is_set(flag) {
            cmake_args.push(format!("-D{}=ON", variable));
        }
    }

    Derivation {
        cmake_args,
        compiler,
        generator,
        build_type,
    }
}
