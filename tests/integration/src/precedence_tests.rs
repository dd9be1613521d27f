//! End-to-end source precedence scenarios using realistic zypper.conf files.

use pretty_assertions::assert_eq;
use rstest::rstest;
use zconf_core::{ConfigEngine, Environment, Error, OptionId, SourceKind};
use zconf_test_utils::{DEFAULT_HOME, TestSystem};

const GLOBAL_CONF: &str = "\
## Configuration file for Zypper.
##
## Boolean values are 0 1 yes no on off true false

[main]

## Show repository alias instead of name.
showAlias = no

## Repository list columns.
repoListColumns = anr

[solver]

## Do not install soft dependencies (recommended packages)
installRecommends = yes

[download]
max_concurrent = 5
";

const USER_CONF: &str = "\
# personal overrides
[main]
showAlias = yes

[solver]
installRecommends = no
";

fn id(raw: &str) -> OptionId {
    raw.parse().unwrap()
}

fn open(
    system: &TestSystem,
    explicit: Option<&str>,
    home: bool,
) -> zconf_core::Result<ConfigEngine> {
    let mut env = Environment::new(system.root()).with_cwd("/srv");
    if home {
        env = env.with_home(DEFAULT_HOME);
    }
    ConfigEngine::open(explicit, &env)
}

#[rstest]
#[case("main/showAlias", "yes", Some(SourceKind::User))]
#[case("main/repoListColumns", "anr", Some(SourceKind::Global))]
#[case("solver/installRecommends", "no", Some(SourceKind::User))]
#[case("download/max_concurrent", "5", Some(SourceKind::Global))]
#[case("download/missing_key", "", None)]
#[case("nosuchsection/key", "", None)]
fn user_over_global(
    #[case] option: &str,
    #[case] value: &str,
    #[case] source: Option<SourceKind>,
) {
    let system = TestSystem::new();
    system.write_global(GLOBAL_CONF);
    system.write_user(USER_CONF);

    let engine = open(&system, None, true).unwrap();

    assert_eq!(engine.get_option(&id(option)), value);
    assert_eq!(engine.lookup(&id(option)).map(|r| r.source), source);
}

#[test]
fn no_home_reads_only_global() {
    let system = TestSystem::new();
    system.write_global(GLOBAL_CONF);
    system.write_user(USER_CONF);

    let engine = open(&system, None, false).unwrap();

    assert_eq!(engine.sources().len(), 1);
    assert_eq!(engine.get_option(&id("main/showAlias")), "no");
}

#[test]
fn custom_file_is_exclusive() {
    let system = TestSystem::new();
    system.write_global(GLOBAL_CONF);
    system.write_user(USER_CONF);
    system.write_file("/srv/zypper-test.conf", "[download]\nmax_concurrent = 1\n");

    let engine = open(&system, Some("zypper-test.conf"), true).unwrap();

    assert_eq!(engine.get_option(&id("download/max_concurrent")), "1");
    assert_eq!(engine.get_option(&id("main/showAlias")), "");
    assert_eq!(engine.get_option(&id("main/repoListColumns")), "");
    assert_eq!(engine.sources()[0].file.as_str(), "/srv/zypper-test.conf");
}

#[test]
fn custom_file_under_home_does_not_double_load() {
    let system = TestSystem::new();
    system.write_global(GLOBAL_CONF);
    system.write_user(USER_CONF);

    let explicit = format!("{DEFAULT_HOME}/.zypper.conf");
    let engine = open(&system, Some(&explicit), true).unwrap();

    let kinds: Vec<_> = engine.sources().iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![SourceKind::Custom]);
    assert_eq!(engine.get_option(&id("main/showAlias")), "yes");
    assert_eq!(engine.get_option(&id("download/max_concurrent")), "");
}

#[test]
fn global_failure_with_user_success_still_opens() {
    let system = TestSystem::new();
    system.write_global("[main\nshowAlias = no\n");
    system.write_user(USER_CONF);

    let engine = open(&system, None, true).unwrap();

    let global = &engine.sources()[1];
    assert_eq!(global.kind, SourceKind::Global);
    assert!(!global.loaded);
    assert!(global.error.as_deref().unwrap().ends_with("on line 1"));
    assert_eq!(engine.get_option(&id("main/showAlias")), "yes");
}

#[test]
fn unreadable_sources_fail_open() {
    let system = TestSystem::new();
    // A directory where a file is expected cannot be read
    system.create_dir("/etc/zypp/zypper.conf");

    let err = open(&system, None, true).unwrap_err();
    assert!(matches!(err, Error::ConfigParse { .. }));
}

#[test]
fn empty_files_load_with_no_options() {
    let system = TestSystem::new();
    system.write_global("");
    system.write_user("# nothing here\n");

    let engine = open(&system, None, true).unwrap();

    assert!(engine.sources().iter().all(|s| s.loaded));
    assert_eq!(engine.get_option(&id("main/showAlias")), "");
}

#[test]
fn raw_get_reads_engine_metadata() {
    let system = TestSystem::new();
    system.write_global(GLOBAL_CONF);

    let engine = open(&system, None, true).unwrap();

    assert_eq!(
        engine
            .get("/augeas/files/etc/zypp/zypper.conf/path")
            .unwrap()
            .as_deref(),
        Some("/files/etc/zypp/zypper.conf")
    );
    assert_eq!(
        engine
            .get("/files/etc/zypp/zypper.conf/main/*/showAlias")
            .unwrap()
            .as_deref(),
        Some("no")
    );
}
