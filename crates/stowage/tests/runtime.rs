//! End-to-end behavior of the runtime: probing, fallback selection,
//! backer failure propagation, and the cross-context bridge.

use stowage::{ChangeEvent, FacilityKind, StorageRuntime, StoreError};
use stowage_testkit::{MemFacility, RecordingListener, TestFixture, TestHost};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn working_host_keeps_both_facilities() {
    init_tracing();
    let runtime = StorageRuntime::new(&TestHost::working());
    assert!(!runtime.durable().is_fallback());
    assert!(!runtime.session().is_fallback());
}

#[test]
fn empty_host_falls_back_everywhere() {
    let runtime = StorageRuntime::new(&TestHost::empty());
    assert!(runtime.durable().is_fallback());
    assert!(runtime.session().is_fallback());
}

#[test]
fn probes_are_independent_per_adapter() {
    init_tracing();
    let host = TestHost {
        durable: Some(MemFacility::broken(FacilityKind::Durable)),
        session: Some(MemFacility::working(FacilityKind::Session)),
    };
    let runtime = StorageRuntime::new(&host);

    // The broken durable facility is silently replaced; the session
    // adapter keeps its working facility.
    assert!(runtime.durable().is_fallback());
    assert!(!runtime.session().is_fallback());

    // The fallen-back adapter still works.
    runtime.durable().set_item("foo", "bar").unwrap();
    assert_eq!(
        runtime.durable().get_item("foo").unwrap().as_deref(),
        Some("bar")
    );
}

#[test]
fn writes_land_in_the_host_facility() {
    let host = TestHost::working();
    let durable = host.durable.clone().unwrap();
    let runtime = StorageRuntime::new(&host);

    runtime.durable().set_item("foo", "bar").unwrap();

    use stowage::Facility;
    assert_eq!(durable.get_item("foo").unwrap().as_deref(), Some("bar"));
}

#[test]
fn quota_failure_propagates_and_emits_nothing() {
    let host = TestHost {
        durable: Some(MemFacility::with_quota(FacilityKind::Durable, 1)),
        session: None,
    };
    let runtime = StorageRuntime::new(&host);
    let storage = runtime.durable();

    let recorder = RecordingListener::new();
    recorder.attach(storage);

    storage.set_item("a", "1").unwrap();
    assert_eq!(recorder.len(), 1);

    // Overwrites stay within quota; a second key does not.
    storage.set_item("a", "2").unwrap();
    let err = storage.set_item("b", "1").unwrap_err();
    assert!(matches!(err, StoreError::QuotaExceeded));

    // The failed write emitted no event and changed nothing.
    assert_eq!(recorder.len(), 2);
    assert_eq!(storage.length(), 1);
    assert_eq!(storage.get_item("b").unwrap(), None);
}

#[test]
fn cross_context_change_reaches_the_matching_adapter() {
    let fixture = TestFixture::new();

    let durable_rec = RecordingListener::new();
    durable_rec.attach(fixture.runtime.durable());
    let session_rec = RecordingListener::new();
    session_rec.attach(fixture.runtime.session());

    fixture.durable_change_from_elsewhere("foo", None, Some("bar"));

    // The session adapter ignores the durable area's notification.
    assert!(session_rec.is_empty());

    assert_eq!(
        durable_rec.events(),
        vec![ChangeEvent {
            key: Some("foo".into()),
            old_value: None,
            new_value: Some("bar".into()),
        }]
    );

    // The mutation really happened: the adapter reads the new value.
    assert_eq!(
        fixture.runtime.durable().get_item("foo").unwrap().as_deref(),
        Some("bar")
    );
}

#[test]
fn cross_context_removal_leaves_nothing_behind() {
    let fixture = TestFixture::new();
    fixture.runtime.durable().set_item("foo", "bar").unwrap();

    let recorder = RecordingListener::new();
    recorder.attach(fixture.runtime.durable());

    fixture.durable_change_from_elsewhere("foo", Some("bar"), None);

    // The remote delete really removed the entry, not just announced it.
    assert_eq!(fixture.runtime.durable().get_item("foo").unwrap(), None);
    assert_eq!(fixture.runtime.durable().length(), 0);

    assert_eq!(
        recorder.events(),
        vec![ChangeEvent {
            key: Some("foo".into()),
            old_value: Some("bar".into()),
            new_value: None,
        }]
    );
}

#[test]
fn local_and_remote_mutations_emit_one_event_each() {
    let fixture = TestFixture::new();
    let recorder = RecordingListener::new();
    recorder.attach(fixture.runtime.durable());

    fixture.runtime.durable().set_item("local", "1").unwrap();
    fixture.durable_change_from_elsewhere("remote", None, Some("2"));

    let events = recorder.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].key.as_deref(), Some("local"));
    assert_eq!(events[1].key.as_deref(), Some("remote"));
}

#[test]
fn scoped_keys_are_persisted_literally() {
    let fixture = TestFixture::new();
    let storage = fixture.runtime.durable();

    storage.scope("prefs").set_item("theme", "dark").unwrap();
    storage
        .scope("prefs")
        .scope("editor")
        .set_item("font", "mono")
        .unwrap();

    use stowage::Facility;
    assert_eq!(
        fixture.durable_facility.get_item("prefs-theme").unwrap().as_deref(),
        Some("dark")
    );
    assert_eq!(
        fixture
            .durable_facility
            .get_item("editor:prefs-font")
            .unwrap()
            .as_deref(),
        Some("mono")
    );
}

#[test]
fn expiry_tagged_values_pass_through_the_adapter_untouched() {
    use stowage::{decode_expiry_value_at, encode_expiry_value};
    use stowage_testkit::ManualClock;

    let runtime = StorageRuntime::detached();
    let storage = runtime.durable();
    let clock = ManualClock::at(1_000);

    let encoded = encode_expiry_value("payload", 5_000);
    storage.set_item("ttl-key", &encoded).unwrap();

    // The adapter stores the envelope as an ordinary opaque value.
    let stored = storage.get_item("ttl-key").unwrap().unwrap();
    assert_eq!(stored, encoded);

    assert_eq!(
        decode_expiry_value_at(&stored, &clock).unwrap().as_deref(),
        Some("payload")
    );

    clock.set(5_000);
    assert_eq!(decode_expiry_value_at(&stored, &clock).unwrap(), None);

    // Nothing swept the entry; only the decode observed the expiry.
    assert_eq!(storage.get_item("ttl-key").unwrap().as_deref(), Some(&*encoded));
}
