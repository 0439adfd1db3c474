//! Option resolution
//!
//! Merges command-line values, the cache and defaults (in that order of
//! precedence) and corrects conflicts inside the two mutually exclusive
//! groups: compilers and build types.

use crate::cache::CacheEntry;
use crate::error::Warning;
use crate::options::{BuildType, Compiler, ExplicitArgs, Flag, Options, ValueOption};
use tracing::debug;

/// Conflict-free configuration handed to derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub options: Options,
    /// The cached compiler or build type disagrees with this run
    pub rebuild_required: bool,
}

impl ResolvedConfig {
    pub fn compiler(&self) -> Option<Compiler> {
        self.options.compiler()
    }

    pub fn build_type(&self) -> BuildType {
        self.options.build_type()
    }

    /// The build directory has to go before configuring
    pub fn needs_clean(&self) -> bool {
        self.rebuild_required
            || self.options.is_set(Flag::Rebuild)
            || self.options.is_set(Flag::Clean)
    }
}

/// Enforce at most one active member per exclusive group
///
/// Debug wins over release; several compilers fall back to none. Running it
/// on already corrected options changes nothing and warns nothing.
pub fn correct_conflicts(options: &mut Options, warnings: &mut Vec<Warning>) {
    if options.is_set(Flag::Debug) && options.is_set(Flag::Release) {
        options.set_flag(Flag::Release, false);
        warnings.push(Warning::ConflictingBuildTypes);
    }

    if options.compilers().len() > 1 {
        for compiler in Compiler::ALL {
            options.set_flag(compiler.flag(), false);
        }
        warnings.push(Warning::ConflictingCompilers);
    }
}

/// Apply cached entries to options the command line left alone
///
/// Returns true when the cache records a compiler or build type that
/// differs from an explicit choice made this run.
pub fn restore_cache(
    options: &mut Options,
    explicit: &ExplicitArgs,
    entries: &[CacheEntry],
) -> bool {
    let mut rebuild_required = false;

    for entry in entries {
        match entry {
            CacheEntry::BuildDir(path) => {
                if !explicit.has_value(ValueOption::BuildDir) {
                    options.build_dir = path.clone();
                }
            }
            CacheEntry::InstallDir(path) => {
                if !explicit.has_value(ValueOption::InstallDir) {
                    options.install_dir = path.clone();
                }
            }
            CacheEntry::CompilerDir(path) => {
                if !explicit.has_value(ValueOption::CompilerDir) {
                    options.compiler_dir = path.clone();
                }
            }
            CacheEntry::Generator(generator) => {
                if !explicit.has_value(ValueOption::Generator) {
                    options.generator = generator.clone();
                }
            }
            CacheEntry::Compiler(cached) => match options.compilers().as_slice() {
                [] => {
                    if let Some(compiler) = cached {
                        options.set_flag(compiler.flag(), true);
                    }
                }
                [active] => {
                    if *cached != Some(*active) {
                        debug!(
                            "Compiler changed from {} to {}",
                            Compiler::label(*cached),
                            active
                        );
                        rebuild_required = true;
                    }
                }
                _ => {}
            },
            CacheEntry::BuildType(cached) => {
                if !explicit.has_flag(Flag::Debug) && !explicit.has_flag(Flag::Release) {
                    options.set_flag(cached.flag(), true);
                } else if options.build_type() != *cached {
                    debug!(
                        "Build type changed from {} to {}",
                        cached,
                        options.build_type()
                    );
                    rebuild_required = true;
                }
            }
        }
    }

    rebuild_required
}

/// Produce the resolved configuration
///
/// `cache` is `None` when caching is off or there is no usable cache file.
pub fn resolve(
    mut options: Options,
    explicit: &ExplicitArgs,
    cache: Option<&[CacheEntry]>,
    warnings: &mut Vec<Warning>,
) -> ResolvedConfig {
    correct_conflicts(&mut options, warnings);

    let rebuild_required = match cache {
        Some(entries) => restore_cache(&mut options, explicit, entries),
        None => false,
    };

    correct_conflicts(&mut options, warnings);

    ResolvedConfig {
        options,
        rebuild_required,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::decode;
    use crate::cli::parse_args;
    use std::path::PathBuf;

    fn resolve_tokens(tokens: &[&str], cache: Option<&str>) -> (ResolvedConfig, Vec<Warning>) {
        let parsed = parse_args(tokens.iter().copied());
        let entries = cache.map(|text| decode(text).unwrap().entries);
        let mut warnings = Vec::new();
        let config = resolve(
            parsed.options,
            &parsed.explicit,
            entries.as_deref(),
            &mut warnings,
        );
        (config, warnings)
    }

    #[test]
    fn debug_wins_over_release() {
        for tokens in [["--debug", "--release"], ["--release", "--debug"]] {
            let (config, warnings) = resolve_tokens(&tokens, None);
            assert_eq!(config.build_type(), BuildType::Debug);
            assert!(!config.options.is_set(Flag::Release));
            assert_eq!(warnings, vec![Warning::ConflictingBuildTypes]);
        }
    }

    #[test]
    fn several_compilers_fall_back_to_default() {
        let cases: [&[&str]; 4] = [
            &["--gcc", "--clang"],
            &["--gcc", "--msvc"],
            &["--clang", "--msvc"],
            &["--msvc", "--gcc", "--clang"],
        ];
        for tokens in cases {
            let (config, warnings) = resolve_tokens(tokens, None);
            assert_eq!(config.compiler(), None, "{:?}", tokens);
            assert!(config.options.compilers().is_empty());
            assert_eq!(warnings, vec![Warning::ConflictingCompilers]);
        }
    }

    #[test]
    fn correction_is_idempotent() {
        let mut options = parse_args(["--gcc", "--clang", "--debug", "--release"]).options;
        let mut warnings = Vec::new();

        correct_conflicts(&mut options, &mut warnings);
        let once = options.clone();
        assert_eq!(warnings.len(), 2);

        correct_conflicts(&mut options, &mut warnings);
        assert_eq!(options, once);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn cache_fills_in_when_cli_is_silent() {
        let (config, warnings) =
            resolve_tokens(&[], Some("BuildDir=foo\nCompiler=gcc\nBuildType=Release\n"));

        assert!(warnings.is_empty());
        assert_eq!(config.options.build_dir, PathBuf::from("foo"));
        assert_eq!(config.compiler(), Some(Compiler::Gcc));
        assert_eq!(config.build_type(), BuildType::Release);
        assert!(!config.rebuild_required);
    }

    #[test]
    fn cli_values_beat_cache() {
        let cache = "BuildDir=foo\nInstallDir=/cached\nCompilerDir=/cached/bin\nGenerator=Ninja\n";
        let (config, _) = resolve_tokens(
            &["--build-dir", "bar", "--generator", "Unix Makefiles"],
            Some(cache),
        );

        assert_eq!(config.options.build_dir, PathBuf::from("bar"));
        assert_eq!(config.options.generator, "Unix Makefiles");
        assert_eq!(config.options.install_dir, PathBuf::from("/cached"));
        assert_eq!(config.options.compiler_dir, PathBuf::from("/cached/bin"));
    }

    #[test]
    fn compiler_change_requires_rebuild() {
        let (config, _) = resolve_tokens(&["--clang"], Some("Compiler=gcc\n"));
        assert_eq!(config.compiler(), Some(Compiler::Clang));
        assert!(config.rebuild_required);
        assert!(config.needs_clean());
    }

    #[test]
    fn explicit_compiler_over_cached_default_requires_rebuild() {
        let (config, _) = resolve_tokens(&["--msvc"], Some("Compiler=default\n"));
        assert_eq!(config.compiler(), Some(Compiler::Msvc));
        assert!(config.rebuild_required);
    }

    #[test]
    fn matching_compiler_is_a_no_op() {
        let (config, _) = resolve_tokens(&["--gcc"], Some("Compiler=gcc\n"));
        assert_eq!(config.compiler(), Some(Compiler::Gcc));
        assert!(!config.rebuild_required);
    }

    #[test]
    fn cached_default_compiler_leaves_none_active() {
        let (config, _) = resolve_tokens(&[], Some("Compiler=default\n"));
        assert_eq!(config.compiler(), None);
        assert!(!config.rebuild_required);
    }

    #[test]
    fn ambiguous_compilers_then_adopt_cache() {
        let (config, warnings) = resolve_tokens(&["--gcc", "--clang"], Some("Compiler=msvc\n"));
        assert_eq!(warnings, vec![Warning::ConflictingCompilers]);
        assert_eq!(config.compiler(), Some(Compiler::Msvc));
        assert!(!config.rebuild_required);
    }

    #[test]
    fn build_type_change_requires_rebuild() {
        let (config, _) = resolve_tokens(&["--debug"], Some("BuildType=Release\n"));
        assert_eq!(config.build_type(), BuildType::Debug);
        assert!(config.rebuild_required);

        let (config, _) = resolve_tokens(&["--release"], Some("BuildType=Debug\n"));
        assert_eq!(config.build_type(), BuildType::Release);
        assert!(config.rebuild_required);
    }

    #[test]
    fn matching_build_type_is_a_no_op() {
        let (config, _) = resolve_tokens(&["--release"], Some("BuildType=Release\n"));
        assert_eq!(config.build_type(), BuildType::Release);
        assert!(!config.rebuild_required);
    }

    #[test]
    fn conflicting_build_types_compare_the_winner() {
        let (config, _) = resolve_tokens(&["--debug", "--release"], Some("BuildType=Debug\n"));
        assert_eq!(config.build_type(), BuildType::Debug);
        assert!(!config.rebuild_required);
    }

    #[test]
    fn explicit_rebuild_and_clean_need_clean() {
        let (config, _) = resolve_tokens(&["--rebuild"], None);
        assert!(config.needs_clean());
        assert!(!config.rebuild_required);

        let (config, _) = resolve_tokens(&[], None);
        assert!(!config.needs_clean());
    }
}
