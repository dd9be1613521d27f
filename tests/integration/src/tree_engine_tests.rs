//! Tree engine behavior below the configuration layer.

use pretty_assertions::assert_eq;
use zconf_tree::{OpenFlags, TreeHandle};
use zconf_test_utils::{DEFAULT_HOME, TestSystem};

#[test]
fn user_and_global_mount_side_by_side() {
    let system = TestSystem::new();
    system.write_global("[main]\nshowAlias = no\n");
    system.write_user("[main]\nshowAlias = yes\n");

    let mut handle =
        TreeHandle::open(system.root(), OpenFlags::NO_STDINC | OpenFlags::NO_LOAD).unwrap();
    handle
        .register_load_target("ZYpper", &format!("{DEFAULT_HOME}/.zypper.conf"))
        .unwrap();
    handle.load().unwrap();

    let matches = handle.match_paths("/files/*/*/*").unwrap();
    let paths: Vec<_> = matches.iter().map(|n| n.path().to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "/files/etc/zypp/zypper.conf".to_string(),
            "/files/home/tester/.zypper.conf".to_string(),
        ]
    );
    assert_eq!(
        handle
            .match_paths("/augeas/load/ZYpper/incl")
            .unwrap()
            .paths(),
        &[
            "/augeas/load/ZYpper/incl[1]".to_string(),
            "/augeas/load/ZYpper/incl[2]".to_string(),
        ]
    );
}

#[test]
fn match_set_is_restartable() {
    let system = TestSystem::new();
    system.write_global("[main]\na = 1\nb = 2\nc = 3\n");

    let handle = TreeHandle::open(system.root(), OpenFlags::NO_STDINC).unwrap();
    let matches = handle
        .match_paths("/files/etc/zypp/zypper.conf/main/1/*")
        .unwrap();

    let first: Vec<_> = matches.iter().map(|n| n.label()).collect();
    let second: Vec<_> = matches.iter().map(|n| n.label()).collect();
    assert_eq!(first, vec!["a", "b", "c"]);
    assert_eq!(first, second);
    assert_eq!(matches.iter().len(), 3);
}

#[test]
fn files_root_maps_host_paths() {
    let system = TestSystem::new();
    system.write_global("[main]\n");

    let handle = TreeHandle::open(system.root(), OpenFlags::NO_STDINC).unwrap();

    let canonical = zconf_fs::io::canonical_dir(system.root()).unwrap();
    assert_eq!(handle.root(), canonical.as_path());
    assert!(handle.exists("/files/etc/zypp/zypper.conf/main").unwrap());
}
