//! Integration tests: run the gatsby binary and check exit codes and output.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gatsby() -> Command {
    Command::cargo_bin("gatsby").unwrap()
}

/// Delegation spawns `node`; skip those tests where it is unavailable.
fn node_available() -> bool {
    std::process::Command::new("node")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn write_site_manifest(dir: &Path) {
    fs::write(
        dir.join("package.json"),
        r#"{"dependencies": {"gatsby": "^4.0.0"}}"#,
    )
    .unwrap();
}

fn install_command(site: &Path, layout: &str, name: &str, body: &str) {
    let dir = site.join("node_modules/gatsby/dist").join(layout);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.js")), body).unwrap();
}

#[test]
fn help_lists_all_commands() {
    gatsby()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("develop")
                .and(predicate::str::contains("build"))
                .and(predicate::str::contains("serve"))
                .and(predicate::str::contains("new")),
        );
}

#[test]
fn short_version_flag_works() {
    gatsby()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_command_shows_help_and_the_fixed_guidance() {
    gatsby().assert().failure().code(1).stderr(
        predicate::str::contains("Pass --help to see all available commands and options.")
            .and(predicate::str::contains("develop")),
    );
}

#[test]
fn develop_outside_a_site_panics_without_resolution() {
    let dir = TempDir::new().unwrap();

    gatsby()
        .arg("develop")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "gatsby <develop> can only be run for a gatsby site.",
        ));
}

#[test]
fn local_site_without_an_install_may_not_be_installed() {
    let dir = TempDir::new().unwrap();
    write_site_manifest(dir.path());

    gatsby()
        .arg("serve")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "There was a problem loading the local serve command. Gatsby may not be installed.",
        ));
}

#[test]
fn new_rejects_a_nonsense_starter() {
    let dir = TempDir::new().unwrap();

    gatsby()
        .args(["new", "my-app", "not a starter"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "is not an owner/repository shorthand or a valid git URL",
        ));
}

#[test]
fn new_refuses_an_existing_root_path() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("my-app")).unwrap();

    gatsby()
        .args(["new", "my-app", "gatsbyjs/gatsby-starter-default"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn serve_delegates_with_the_full_bundle() {
    if !node_available() {
        eprintln!("skipping: node not on PATH");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_site_manifest(dir.path());
    install_command(
        dir.path(),
        "commands",
        "serve",
        r#"module.exports = (args) => {
            console.log("PORT=" + args.port);
            console.log("HOST=" + args.host);
            console.log("BROWSERS=" + args.browserslist.join("|"));
            console.log("HAS_MANIFEST=" + (args.sitePackageJson.dependencies.gatsby === "^4.0.0"));
        };"#,
    );

    gatsby()
        .args(["serve", "-p", "9000"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("PORT=9000")
                .and(predicate::str::contains("HOST=localhost"))
                .and(predicate::str::contains(
                    "BROWSERS=> 1%|last 2 versions|IE >= 9",
                ))
                .and(predicate::str::contains("HAS_MANIFEST=true")),
        );
}

#[test]
fn resolution_prefers_the_commands_layout_and_logs_it() {
    if !node_available() {
        eprintln!("skipping: node not on PATH");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_site_manifest(dir.path());
    install_command(
        dir.path(),
        "commands",
        "serve",
        "module.exports = () => { console.log('FROM=commands'); };",
    );
    install_command(
        dir.path(),
        "utils",
        "serve",
        "module.exports = () => { console.log('FROM=utils'); };",
    );

    gatsby()
        .args(["serve", "--verbose"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("FROM=commands"))
        .stderr(predicate::str::contains("loading local command from:"));
}

#[test]
fn build_sets_production_mode_before_delegating() {
    if !node_available() {
        eprintln!("skipping: node not on PATH");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_site_manifest(dir.path());
    install_command(
        dir.path(),
        "commands",
        "build",
        r#"module.exports = (args) => {
            console.log("NODE_ENV=" + process.env.NODE_ENV);
            console.log("PREFIX=" + args.prefixPaths);
        };"#,
    );

    gatsby()
        .arg("build")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("NODE_ENV=production")
                .and(predicate::str::contains("PREFIX=false")),
        );
}

#[test]
fn a_failing_delegate_fails_the_invocation() {
    if !node_available() {
        eprintln!("skipping: node not on PATH");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_site_manifest(dir.path());
    install_command(
        dir.path(),
        "commands",
        "develop",
        "module.exports = () => { throw new Error('bootstrap failed'); };",
    );

    gatsby()
        .arg("develop")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bootstrap failed"));
}

#[test]
fn a_rejecting_delegate_fails_the_invocation() {
    if !node_available() {
        eprintln!("skipping: node not on PATH");
        return;
    }

    let dir = TempDir::new().unwrap();
    write_site_manifest(dir.path());
    install_command(
        dir.path(),
        "commands",
        "build",
        "module.exports = () => Promise.reject(new Error('stage failed'));",
    );

    gatsby()
        .arg("build")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("stage failed"));
}
