//! Integration tests for `hostmgr`.
//!
//! Tests marked `#[ignore]` read the real system hosts file:
//!
//! ```bash
//! cargo test -- --ignored
//! ```

use hostmgr::commands::{add_host, get_hosts, remove_host, set_host_address};
use hostmgr::{
    AddressFamily, HostEntry, HostsDataService, HostsError, HostsFile, LogService, NullLog,
    Registry, ServiceConfig, ServiceContext, register_defaults,
};
use std::collections::BTreeSet;
use std::rc::Rc;

fn pair_set(entries: &[HostEntry]) -> BTreeSet<(String, String)> {
    entries
        .iter()
        .map(|e| (e.hostname().to_string(), e.address().to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tempdir tests
// ---------------------------------------------------------------------------

#[test]
fn full_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts");
    std::fs::write(&path, "").unwrap();

    let ctx = ServiceContext::new();
    ctx.register::<dyn LogService>(|| Rc::new(NullLog)).unwrap();
    register_defaults(&ctx, &ServiceConfig::new().with_hosts_path(&path)).unwrap();

    let hosts = ctx.resolve::<dyn HostsDataService>().unwrap();
    let log = ctx.resolve::<dyn LogService>().unwrap();
    let (hosts, log) = (hosts.as_ref(), log.as_ref());

    assert!(get_hosts(hosts, &[]).unwrap().is_empty());

    add_host(hosts, log, "abc.com", "127.0.0.2").unwrap();
    add_host(hosts, log, "def.com", "::1").unwrap();

    let entries = get_hosts(hosts, &[]).unwrap();
    assert_eq!(
        pair_set(&entries),
        BTreeSet::from([
            ("abc.com".to_string(), "127.0.0.2".to_string()),
            ("def.com".to_string(), "::1".to_string()),
        ])
    );

    // Adding again before removing is rejected.
    let err = add_host(hosts, log, "abc.com", "10.0.0.1").unwrap_err();
    assert!(matches!(err, HostsError::DuplicateHost { .. }));

    let updated = set_host_address(hosts, log, "ABC.COM", "10.0.0.9").unwrap();
    assert_eq!(updated[0].address_family(), AddressFamily::Ipv4);

    remove_host(hosts, log, "abc.com").unwrap();
    let left = get_hosts(hosts, &[]).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].hostname(), "def.com");

    assert!(remove_host(hosts, log, "abc.com").unwrap_err().is_not_found());
}

#[test]
fn round_trip_preserves_pairs() {
    let dir = tempfile::tempdir().unwrap();
    let hosts = HostsFile::with_path(dir.path().join("hosts"));
    let entries = vec![
        HostEntry::new("localhost", "::1").unwrap(),
        HostEntry::new("sqlserver.domain.net", "10.1.44.19").unwrap(),
        HostEntry::new("bigv6.net", "2001:0db8:85a3:0000:0000:8a2e:0370:7334").unwrap(),
        HostEntry::new("weird.local", "notanip").unwrap(),
        // The engine itself allows duplicate hostnames.
        HostEntry::new("localhost", "127.0.0.1").unwrap(),
    ];

    hosts.write_entries(&entries).unwrap();
    let read = hosts.get_entries().unwrap();

    assert_eq!(pair_set(&read), pair_set(&entries));
    assert_eq!(read.len(), entries.len());
    assert_eq!(read[3].address_family(), AddressFamily::Unknown);

    let text = std::fs::read_to_string(hosts.path()).unwrap();
    assert!(text.contains("# MODIFIED BY HOST MANAGER: "));
}

#[test]
fn commented_address_is_never_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts");
    std::fs::write(&path, "").unwrap();
    let hosts = HostsFile::with_path(&path);
    add_host(&hosts, &NullLog, "keep.local", "10.0.0.2").unwrap();

    let err = add_host(&hosts, &NullLog, "abc.com", "#10.0.0.1").unwrap_err();
    assert!(matches!(err, HostsError::InvalidEntry(_)));
    assert_eq!(
        set_host_address(&hosts, &NullLog, "keep.local", "#10.0.0.3")
            .unwrap_err()
            .kind(),
        hostmgr::ErrorKind::MalformedInput
    );

    // Every entry that was accepted reads back.
    let read = hosts.get_entries().unwrap();
    assert_eq!(
        pair_set(&read),
        BTreeSet::from([("keep.local".to_string(), "10.0.0.2".to_string())])
    );
    assert!(add_host(&hosts, &NullLog, "abc.com", "10.0.0.1").is_ok());
}

#[test]
fn failed_stage_keeps_original_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts");
    let original = "# hand written\n10.0.0.1\tkeep.me\n";
    std::fs::write(&path, original).unwrap();

    let hosts = HostsFile::with_path(&path);
    let staged = hosts.stage(&[]).unwrap();
    // Simulate a crash between writing the temp file and the rename.
    drop(staged);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn mocked_services_via_provider() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts");
    std::fs::write(&path, "10.0.0.1 mock.local\n").unwrap();

    let mut ctx = ServiceContext::new();
    register_defaults(&ctx, &ServiceConfig::new()).unwrap();

    let mock_path = path.clone();
    ctx.set_provider(move || {
        let registry = Registry::new();
        let p = mock_path.clone();
        registry
            .register::<dyn HostsDataService>(move || Rc::new(HostsFile::with_path(p)))
            .unwrap();
        registry
            .register::<dyn LogService>(|| Rc::new(NullLog))
            .unwrap();
        registry
    });

    let hosts = ctx.resolve::<dyn HostsDataService>().unwrap();
    assert_eq!(hosts.hosts_path(), path.as_path());
    let found = get_hosts(hosts.as_ref(), &["MOCK.local".to_string()]).unwrap();
    assert_eq!(found.len(), 1);
}

// ---------------------------------------------------------------------------
// System hosts file
// ---------------------------------------------------------------------------

#[test]
#[ignore = "reads the real system hosts file"]
fn read_system_hosts_file() {
    let hosts = HostsFile::new();
    for entry in hosts.entries().unwrap() {
        let entry = entry.unwrap();
        assert!(!entry.hostname().is_empty());
        assert!(!entry.address().is_empty());
    }
}
