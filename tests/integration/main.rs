//! Integration tests for pgdump

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    /// Command isolated from the user's config and log settings
    fn pgdump(config: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("pgdump");
        cmd.env("PGDUMP_CONFIG", config).env_remove("RUST_LOG");
        cmd
    }

    /// Write a config whose cache lives under `temp`
    fn write_config(temp: &TempDir, extra: &str) -> std::path::PathBuf {
        let cache_dir = temp.path().join("cache");
        let config = temp.path().join("config.toml");
        std::fs::write(
            &config,
            format!("[cache]\ndir = {:?}\n{}", cache_dir.display().to_string(), extra),
        )
        .unwrap();
        config
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        pgdump(&temp.path().join("none.toml"))
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("pg_dump"))
            .stdout(predicate::str::contains("--schema-only"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        pgdump(&temp.path().join("none.toml"))
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("pgdump"));
    }

    #[test]
    fn dump_requires_db() {
        let temp = TempDir::new().unwrap();
        pgdump(&temp.path().join("none.toml"))
            .arg("--schema-only")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--db"));
    }

    #[test]
    fn dump_without_install_points_to_install() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");
        pgdump(&config)
            .args(["--db", "mydb"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("pg_dump binary not found"))
            .stderr(predicate::str::contains("pgdump install"));
    }

    #[test]
    fn invalid_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.toml");
        std::fs::write(&config, "[cache\n").unwrap();
        pgdump(&config)
            .args(["cache", "path"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn cache_path_follows_config() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");
        pgdump(&config)
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                temp.path().join("cache").display().to_string(),
            ));
    }

    #[test]
    fn cache_clear_removes_entries() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");
        let entry = temp.path().join("cache").join("pg_dump-ubuntu-x64");
        std::fs::create_dir_all(&entry).unwrap();
        std::fs::write(entry.join("pg_dump"), "stale").unwrap();

        pgdump(&config)
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed 1 item(s)"));
        assert!(!entry.exists());

        pgdump(&config)
            .args(["cache", "clear"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already empty"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "");
        pgdump(&config)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        let config = write_config(&temp, "[connection]\nport = 6432\n");
        pgdump(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[release]"))
            .stdout(predicate::str::contains("port = 6432"));
    }

    #[test]
    fn install_reports_download_failure() {
        let temp = TempDir::new().unwrap();
        // Nothing listens on port 9 of the loopback interface
        let config = write_config(&temp, "[release]\nbase_url = \"http://127.0.0.1:9/releases\"\n");
        let result = pgdump(&config).arg("install").assert().failure();

        if pgdump::Platform::resolve().is_ok() {
            result
                .stderr(predicate::str::contains("Failed to download"))
                .stderr(predicate::str::contains("pgdump install"));
            let leftovers: Vec<_> = std::fs::read_dir(temp.path().join("cache"))
                .map(|entries| entries.flatten().collect())
                .unwrap_or_default();
            assert!(leftovers.is_empty());
        } else {
            result.stderr(predicate::str::contains("Unsupported platform"));
        }
    }
}

#[cfg(unix)]
mod dump_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use pgdump::cache::CacheStore;
    use pgdump::Platform;
    use predicates::prelude::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        config: PathBuf,
    }

    /// Cache with a shell script standing in for pg_dump, or `None` on
    /// hosts without a prebuilt release
    fn fixture(script: &str, extra_config: &str) -> Option<Fixture> {
        let platform = Platform::resolve().ok()?;
        let temp = TempDir::new().unwrap();
        let cache_dir = temp.path().join("cache");

        let binary = CacheStore::new(&cache_dir).binary_path(platform);
        std::fs::create_dir_all(binary.parent().unwrap()).unwrap();
        std::fs::write(&binary, format!("#!/bin/sh\n{}\n", script)).unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = temp.path().join("config.toml");
        std::fs::write(
            &config,
            format!("[cache]\ndir = {:?}\n{}", cache_dir.display().to_string(), extra_config),
        )
        .unwrap();

        Some(Fixture { temp, config })
    }

    fn pgdump(config: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("pgdump");
        cmd.env("PGDUMP_CONFIG", config).env_remove("RUST_LOG");
        cmd
    }

    #[test]
    fn dump_prints_to_stdout() {
        let Some(fx) = fixture(r#"echo "args: $*""#, "") else {
            return;
        };
        pgdump(&fx.config)
            .args(["--db", "mydb", "--user", "admin", "--schema-only"])
            .assert()
            .success()
            .stdout(predicate::str::diff(
                "args: --username admin --host localhost --port 5432 --schema-only mydb\n",
            ));
    }

    #[test]
    fn dump_uses_connection_config_and_raw_flags() {
        let Some(fx) = fixture(
            r#"echo "args: $*""#,
            "[connection]\nhost = \"db.internal\"\nport = 6432\n",
        ) else {
            return;
        };
        pgdump(&fx.config)
            .args(["--db", "mydb", "--raw", "--no-owner --table 'a b'"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "args: --host db.internal --port 6432 --no-owner --table a b mydb",
            ));
    }

    #[test]
    fn dump_passes_child_stderr_through() {
        let Some(fx) = fixture("echo 'pg_dump: warning: notice' >&2; echo body", "") else {
            return;
        };
        pgdump(&fx.config)
            .args(["--db", "mydb"])
            .assert()
            .success()
            .stdout(predicate::str::diff("body\n"))
            .stderr(predicate::str::contains("pg_dump: warning: notice"));
    }

    #[test]
    fn dump_keeps_non_utf8_output_intact() {
        let Some(fx) = fixture(r"printf 'caf\351\n'", "") else {
            return;
        };
        let output = pgdump(&fx.config)
            .args(["--db", "mydb"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout, b"caf\xe9\n");
    }

    #[test]
    fn verbose_logs_command_line_to_stderr() {
        let Some(fx) = fixture("echo body", "") else {
            return;
        };
        let binary = CacheStore::new(fx.temp.path().join("cache"))
            .binary_path(Platform::resolve().unwrap());
        pgdump(&fx.config)
            .args(["--db", "mydb", "--verbose"])
            .assert()
            .success()
            .stdout(predicate::str::diff("body\n"))
            .stderr(predicate::str::contains(format!(
                "Spawning pg_dump: {} --host localhost --port 5432 mydb",
                binary.display()
            )));
    }

    #[test]
    fn install_skips_download_when_cached() {
        let Some(fx) = fixture("echo body", "[release]\nbase_url = \"http://127.0.0.1:9/releases\"\n")
        else {
            return;
        };
        pgdump(&fx.config)
            .arg("install")
            .assert()
            .success()
            .stdout(predicate::str::contains("already installed"))
            .stdout(predicate::str::contains("Installing").not());
    }

    #[test]
    fn dump_writes_file() {
        let Some(fx) = fixture("echo 'CREATE TABLE t ();'", "") else {
            return;
        };
        let target = fx.temp.path().join("schema.sql");
        pgdump(&fx.config)
            .args(["--db", "mydb", "--file"])
            .arg(&target)
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "CREATE TABLE t ();\n"
        );
    }

    #[test]
    fn dump_failure_reports_exit_code() {
        let Some(fx) = fixture("echo 'pg_dump: error: connection refused' >&2; exit 1", "") else {
            return;
        };
        pgdump(&fx.config)
            .args(["--db", "mydb"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("connection refused"))
            .stderr(predicate::str::contains("pg_dump exited with code 1"));
    }
}
