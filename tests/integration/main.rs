//! Integration tests for heph-bootstrap

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    const MISSING_CMAKE: &str = "heph-bootstrap-test-missing-cmake";

    fn heph(dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("heph-bootstrap");
        cmd.current_dir(dir.path())
            .env("HEPH_CMAKE", MISSING_CMAKE)
            .env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        heph(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--build-dir"))
            .stdout(predicate::str::contains("--clean-cache"))
            .stdout(predicate::str::contains("Examples:"));

        assert!(!dir.path().join("build").exists());
    }

    #[test]
    fn clean_removes_build_dir_and_exits() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        fs::create_dir_all(build.join("CMakeFiles").join("tmp")).unwrap();
        fs::write(build.join("CMakeCache.txt"), "").unwrap();
        fs::write(build.join("CMakeFiles").join("tmp").join("a.o"), "").unwrap();

        // The driver is missing, so any attempt to run it would fail the run
        heph(&dir)
            .arg("--clean")
            .assert()
            .success()
            .stdout(predicate::str::contains("[Heph] Cleaning"));

        assert!(!build.exists());
    }

    #[test]
    fn unknown_argument_warns_but_continues() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();

        heph(&dir)
            .args(["--bogus", "--build-dir", "out", "--clean"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Invalid argument: --bogus"));

        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn missing_cmake_fails_with_exit_code_one() {
        let dir = TempDir::new().unwrap();

        heph(&dir)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to run command"))
            .stderr(predicate::str::contains(MISSING_CMAKE));

        // Cache is written before the driver runs
        assert!(dir.path().join(".bootstrap_cache").is_file());
        assert!(dir.path().join("build").is_dir());
    }

    #[test]
    fn build_dir_creation_failure_exits_one() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("build"), "not a directory").unwrap();

        heph(&dir)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to create the build directory"));
    }

    #[cfg(unix)]
    mod fake_cmake {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use std::path::PathBuf;

        /// Write a cmake stand-in that logs its arguments and exits with `code`
        fn fake_cmake(dir: &TempDir, code: i32) -> (PathBuf, PathBuf) {
            let script = dir.path().join("fake-cmake.sh");
            let log = dir.path().join("cmake.log");
            fs::write(
                &script,
                format!("#!/bin/sh\necho \"$@\" >> \"{}\"\nexit {}\n", log.display(), code),
            )
            .unwrap();
            fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
            (script, log)
        }

        #[test]
        fn runs_configure_build_install() {
            let dir = TempDir::new().unwrap();
            let (script, log) = fake_cmake(&dir, 0);

            let assert = heph(&dir)
                .env("HEPH_CMAKE", &script)
                .args(["--gcc", "--release", "--install", "--verbose"])
                .assert()
                .success()
                .stdout(predicate::str::contains("Running command:"))
                .stdout(predicate::str::contains("Build files have been written to"));

            // Each command line is echoed once
            let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
            let build = dir.path().join("build");
            for echoed in [
                format!(" -S {}", dir.path().display()),
                format!(" --build {}", build.display()),
                format!(" --install {}", build.display()),
            ] {
                assert_eq!(stdout.matches(&echoed).count(), 1, "{}", echoed);
            }

            let calls = fs::read_to_string(&log).unwrap();
            let lines: Vec<&str> = calls.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines[0].starts_with("-S "));
            assert!(lines[0].contains("-DCMAKE_C_COMPILER=gcc"));
            assert!(lines[0].contains("-DCMAKE_BUILD_TYPE=Release"));
            assert!(lines[1].starts_with("--build "));
            assert!(lines[1].ends_with("--config Release"));
            assert!(lines[2].starts_with("--install "));

            let cache = fs::read_to_string(dir.path().join(".bootstrap_cache")).unwrap();
            assert!(cache.contains("Compiler=gcc\n"));
            assert!(cache.contains("Generator=Unix Makefiles\n"));
            assert!(cache.contains("BuildType=Release\n"));
        }

        #[test]
        fn cached_options_apply_on_next_run() {
            let dir = TempDir::new().unwrap();
            let (script, log) = fake_cmake(&dir, 0);

            heph(&dir)
                .env("HEPH_CMAKE", &script)
                .args(["--clang", "--build-dir", "out"])
                .assert()
                .success();
            fs::remove_file(&log).unwrap();

            heph(&dir)
                .env("HEPH_CMAKE", &script)
                .assert()
                .success()
                .stdout(predicate::str::contains("Restoring options from the cache file"));

            let calls = fs::read_to_string(&log).unwrap();
            assert!(calls.contains("-DCMAKE_C_COMPILER=clang"));
            assert!(calls.contains(&dir.path().join("out").display().to_string()));
        }

        #[test]
        fn failing_build_step_exits_one() {
            let dir = TempDir::new().unwrap();
            let (script, _) = fake_cmake(&dir, 3);

            heph(&dir)
                .env("HEPH_CMAKE", &script)
                .assert()
                .code(1)
                .stderr(predicate::str::contains("exit code: 3"));
        }
    }
}
