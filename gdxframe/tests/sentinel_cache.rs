//! Process-wide special value cache
//!
//! Kept in its own test binary: it clears the global cache, which would race
//! with sessions created by other tests.
#![cfg(feature = "serde")]

use gdxframe::{ContainerSession, Error, JsonCodec, SentinelTable, SessionConfig};
use gdxframe_core::constants::sentinel;

#[test]
fn snapshot_is_written_once() {
    SentinelTable::clear_cache();
    assert!(SentinelTable::cached().is_none());

    // duplicate codes are rejected, and there is nothing to fall back to yet
    let broken = || JsonCodec::new().with_special_values([7.0; 5]);
    let err = SentinelTable::load(&broken()).unwrap_err();
    assert!(matches!(err, Error::Sentinel(_)));
    assert!(matches!(
        ContainerSession::new(broken(), SessionConfig::default()),
        Err(Error::Sentinel(_))
    ));

    let custom = [-1.0, -2.0, -3.0, -4.0, -5.0];
    let good = SentinelTable::load(&JsonCodec::new().with_special_values(custom)).unwrap();
    assert_eq!(good.codes(), custom);

    let fallback = SentinelTable::load(&broken()).unwrap();
    assert_eq!(fallback, good);
    let session = ContainerSession::new(broken(), SessionConfig::default()).unwrap();
    assert_eq!(session.special_values().codes(), custom);

    // later successful loads use their own table but leave the snapshot alone
    let standard = SentinelTable::load(&JsonCodec::new()).unwrap();
    assert_eq!(standard.codes(), sentinel::DEFAULT_TABLE);
    assert_eq!(SentinelTable::cached().unwrap().codes(), custom);
    assert_eq!(SentinelTable::load(&broken()).unwrap().codes(), custom);

    SentinelTable::clear_cache();
    assert!(SentinelTable::cached().is_none());
}
