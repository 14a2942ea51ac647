//! End-to-end header behaviour: provider updates in, display state out

use std::time::{Duration, Instant};

use nanoscope::app::App;
use nanoscope::core::Action;
use nanoscope::domain::account::{
    classify, format_address, AccountHeader, Clipboard, CopyState, KnownAccount,
    RepresentativeRecord, Representatives, Role, COPY_RESET,
};
use nanoscope::domain::{ConfirmationQuorum, Sources};
use nanoscope::infrastructure::runtime::RuntimeEvent;
use nanoscope::store::KnownAccountStore;

const ADDR: &str = "nano_3x7cjioqahgs5ppheys6prpqtb4rdknked83chf97bot1unrbdkaux37zq6x";

fn rep(weight: u128) -> RepresentativeRecord {
    RepresentativeRecord {
        account: ADDR.into(),
        weight,
    }
}

struct RecordingClipboard(Vec<String>);

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.0.push(text.into());
        Ok(())
    }
}

#[test]
fn test_principal_scenarios() {
    let reps = Representatives::loaded(vec![rep(100)]);

    let result = classify(ADDR, &reps, Some(50), &[]);
    assert!(result.is_representative());
    assert!(result.is_principal());

    let result = classify(ADDR, &reps, Some(150), &[]);
    assert!(result.is_representative());
    assert!(!result.is_principal());
}

#[test]
fn test_loading_hides_representative_for_any_contents() {
    for records in [vec![], vec![rep(1)], vec![rep(u128::MAX), rep(0)]] {
        let reps = Representatives {
            records,
            is_loading: true,
        };
        let result = classify(ADDR, &reps, Some(1), &[]);
        assert!(!result.is_representative());
        assert!(!result.is_principal());
    }
}

#[test]
fn test_alias_lookup() {
    let known = vec![
        KnownAccount {
            account: "nano_1other".into(),
            alias: "Other".into(),
        },
        KnownAccount {
            account: ADDR.into(),
            alias: "Binance".into(),
        },
    ];
    assert_eq!(
        classify(ADDR, &Representatives::default(), None, &known).alias(),
        Some("Binance")
    );
    assert_eq!(
        classify("nano_1nobody", &Representatives::default(), None, &known).alias(),
        None
    );
}

#[test]
fn test_format_round_trips_for_any_length() {
    for len in 0..=70 {
        let address: String = ADDR.chars().cycle().take(len).collect();
        let segments = format_address(&address);
        assert_eq!(segments.concat(), address, "length {len}");
        if len >= 60 {
            assert_eq!(segments.prefix.len(), len - 60);
            assert_eq!(segments.first_unique.len(), 7);
            assert_eq!(segments.middle.len(), 46);
            assert_eq!(segments.last_unique.len(), 7);
        }
    }
}

#[test]
fn test_second_mark_restarts_reset_window() {
    let start = Instant::now();
    let second = start + Duration::from_millis(1500);
    let mut state = CopyState::new();
    state.mark_copied(start);
    state.mark_copied(second);

    state.tick(start + COPY_RESET);
    assert!(state.is_copied());
    state.tick(second + COPY_RESET);
    assert!(!state.is_copied());
}

#[test]
fn test_two_headers_keep_independent_timers() {
    let start = Instant::now();
    let mut clipboard = RecordingClipboard(Vec::new());
    let mut left = AccountHeader::new(ADDR);
    let mut right = AccountHeader::new("nano_1other");

    assert!(left.copy(&mut clipboard, start).unwrap());
    assert!(right
        .copy(&mut clipboard, start + Duration::from_millis(1000))
        .unwrap());

    left.tick(start + COPY_RESET);
    right.tick(start + COPY_RESET);
    assert!(!left.is_copied());
    assert!(right.is_copied());
    assert_eq!(clipboard.0, vec![ADDR.to_string(), "nano_1other".to_string()]);
}

#[test]
fn test_header_waits_for_quorum_before_titling() {
    let mut sources = Sources::new();
    sources.set_representatives(vec![rep(100)]);
    let mut header = AccountHeader::new(ADDR);
    header.refresh(&sources);
    assert!(header.classification().is_representative());
    assert_eq!(header.title(), None);

    sources.set_quorum(ConfirmationQuorum {
        principal_representative_min_weight: 100,
    });
    header.refresh(&sources);
    assert_eq!(header.title(), Some("Principal Representative"));
}

#[test]
fn test_app_with_persistent_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("known_accounts.sqlite3");

    {
        let mut app = App::new(ADDR);
        app.attach_store(KnownAccountStore::open(&db).unwrap()).unwrap();
        app.dispatch(Action::SetAlias("Cold storage".into()), None, Instant::now());
        app.apply_event(RuntimeEvent::KnownAccountsReady {
            accounts: vec![KnownAccount {
                account: "nano_1registry".into(),
                alias: "Registry entry".into(),
            }],
        });
    }

    let mut app = App::new(ADDR);
    app.attach_store(KnownAccountStore::open(&db).unwrap()).unwrap();
    assert_eq!(app.header.alias(), Some("Cold storage"));
    assert_eq!(app.sources.known_accounts.len(), 2);

    app.dispatch(Action::Open("nano_1registry".into()), None, Instant::now());
    assert_eq!(app.header.alias(), Some("Registry entry"));
    assert_eq!(app.header.role(), Role::Plain);
}
