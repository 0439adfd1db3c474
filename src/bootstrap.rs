//! A single bootstrap run
//!
//! Sequences parsing results, cache handling, resolution, directory
//! lifecycle and the driver calls. Warnings are printed the moment they
//! are found and kept for the caller.

use crate::build_dir::{ensure_build_dir, remove_build_dir};
use crate::cache::CacheFile;
use crate::cli::{render_help, ParsedArgs};
use crate::derive::{derive, Derivation, HostPlatform};
use crate::driver::{BuildDriver, Invocation};
use crate::error::{BootstrapResult, Warning};
use crate::options::{Flag, OptionKey};
use crate::resolve::{correct_conflicts, resolve, ResolvedConfig};
use crate::ui;
use std::path::PathBuf;
use tracing::debug;

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `--help` was printed
    Help,
    /// `--clean` removed the build directory and stopped
    Cleaned,
    /// The driver configured and built the project
    Built {
        build_dir: PathBuf,
        derivation: Derivation,
    },
}

/// Runs the bootstrap sequence against a source root
pub struct Bootstrap {
    root: PathBuf,
    host: HostPlatform,
    warnings: Vec<Warning>,
}

impl Bootstrap {
    /// Bootstrap the project at `root` for the current platform
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            host: HostPlatform::detect(),
            warnings: Vec::new(),
        }
    }

    /// Override the platform used for generator defaults
    pub fn with_host(mut self, host: HostPlatform) -> Self {
        self.host = host;
        self
    }

    /// Warnings reported so far
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    fn warn_all(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        for warning in warnings {
            ui::step_warn(&warning);
            self.warnings.push(warning);
        }
    }

    /// Execute one run
    pub async fn run(
        &mut self,
        parsed: ParsedArgs,
        driver: &dyn BuildDriver,
    ) -> BootstrapResult<Outcome> {
        let ParsedArgs {
            mut options,
            explicit,
            warnings,
        } = parsed;
        self.warn_all(warnings);

        let mut found = Vec::new();
        correct_conflicts(&mut options, &mut found);
        self.warn_all(found);

        if options.is_set(Flag::Help) {
            println!("{}", render_help());
            return Ok(Outcome::Help);
        }

        let cache = CacheFile::new(&self.root);

        if options.is_set(Flag::CleanCache) && cache.exists() {
            ui::step("Removing the cache file");
            if !cache.remove() {
                self.warn_all([Warning::CacheRemoveFailed(cache.path().to_path_buf())]);
            }
        }

        let entries = if options.caching_enabled()
            && !options.is_set(Flag::CleanCache)
            && cache.exists()
        {
            ui::step("Restoring options from the cache file");
            match cache.load() {
                Ok(decoded) => {
                    self.warn_all(decoded.warnings);
                    Some(decoded.entries)
                }
                Err(e) => {
                    self.warn_all([Warning::CacheIgnored(e.to_string())]);
                    None
                }
            }
        } else {
            None
        };

        let mut found = Vec::new();
        let config = resolve(options, &explicit, entries.as_deref(), &mut found);
        self.warn_all(found);
        log_resolved(&config);

        let build_dir = self.root.join(&config.options.build_dir);

        if config.needs_clean() {
            ui::step("Cleaning");
            if !remove_build_dir(&build_dir) {
                self.warn_all([Warning::BuildDirRemoveFailed(build_dir.clone())]);
            }
            if config.options.is_set(Flag::Clean) {
                return Ok(Outcome::Cleaned);
            }
        }

        ui::step("Building");
        ui::step("Checking for the build directory");
        if ensure_build_dir(&build_dir)? {
            ui::step("Created the build directory");
        } else {
            ui::step("Build directory found");
        }

        let derivation = derive(&config, self.host);

        if config.options.caching_enabled() {
            ui::step("Updating the cache");
            let record = derivation.cache_record(&config.options);
            self.warn_all(
                record
                    .unencodable()
                    .into_iter()
                    .map(|(key, value)| Warning::UncacheableValue {
                        key: key.as_str(),
                        value,
                    }),
            );
            if let Err(e) = cache.save(&record) {
                self.warn_all([Warning::CacheWriteFailed(e.to_string())]);
            }
        }

        ui::step("Configuring CMake");
        let mut invocations = vec![
            Invocation::configure(&self.root, &build_dir, &derivation.cmake_args),
            Invocation::build(&build_dir, derivation.build_type),
        ];
        if config.options.is_set(Flag::Install) {
            invocations.push(Invocation::install(&build_dir, derivation.build_type));
        }

        let verbose = config.options.is_set(Flag::Verbose);
        for invocation in &invocations {
            if verbose {
                ui::step(format!(
                    "Running command: {}",
                    invocation.command_line(driver.program())
                ));
            }
            driver.execute(invocation).await?;
        }

        ui::success(format!(
            "Build files have been written to {}",
            build_dir.display()
        ));

        Ok(Outcome::Built {
            build_dir,
            derivation,
        })
    }
}

fn log_resolved(config: &ResolvedConfig) {
    for key in OptionKey::all() {
        debug!("{} = {}", key, config.options.get(key));
    }
    if config.rebuild_required {
        debug!("Cached toolchain differs from this run, rebuild required");
    }
}
