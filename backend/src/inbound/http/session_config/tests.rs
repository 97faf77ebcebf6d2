//! Unit tests for session settings validation.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create key file");
    file.write_all(&vec![b'k'; len]).expect("write key file");
    file
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |name| vars.get(name).cloned());
    env
}

#[fixture]
fn strong_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn release_vars(key: &NamedTempFile) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key.path().to_string_lossy().into_owned()),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(strong_key: NamedTempFile, #[case] missing: &'static str) {
    let mut vars = release_vars(&strong_key);
    vars.remove(missing);
    let err = release_error(vars);
    assert!(
        matches!(err, SessionConfigError::MissingEnv { name } if name == missing),
        "unexpected error: {err}"
    );
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(ALLOW_EPHEMERAL_ENV, "")]
#[case(SAMESITE_ENV, "sometimes")]
fn release_rejects_malformed_toggles(
    strong_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &str,
) {
    let mut vars = release_vars(&strong_key);
    vars.insert(name, value.to_owned());
    let err = release_error(vars);
    assert!(
        matches!(err, SessionConfigError::InvalidEnv { name: rejected, .. } if rejected == name),
        "unexpected error: {err}"
    );
}

#[rstest]
fn release_rejects_ephemeral_keys(strong_key: NamedTempFile) {
    let mut vars = release_vars(&strong_key);
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file(strong_key: NamedTempFile) {
    let mut vars = release_vars(&strong_key);
    let missing = strong_key.path().with_extension("missing");
    vars.insert(KEY_FILE_ENV, missing.to_string_lossy().into_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(32);
    let err = release_error(release_vars(&short));
    assert!(matches!(
        err,
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn release_rejects_same_site_none_without_secure(strong_key: NamedTempFile) {
    let mut vars = release_vars(&strong_key);
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_accepts_complete_settings(strong_key: NamedTempFile) {
    let env = mock_env(release_vars(&strong_key));
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(
        fingerprint::key_fingerprint(&settings.key),
        fingerprint::key_fingerprint(&Key::derive_from(&[b'k'; SESSION_KEY_MIN_LEN]))
    );
}

#[rstest]
fn debug_falls_back_to_defaults(strong_key: NamedTempFile) {
    let missing = strong_key.path().with_extension("missing");
    let env = mock_env(HashMap::from([(
        KEY_FILE_ENV,
        missing.to_string_lossy().into_owned(),
    )]));
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_malformed_same_site(strong_key: NamedTempFile) {
    let mut vars = release_vars(&strong_key);
    vars.insert(SAMESITE_ENV, "unexpected".to_owned());
    let settings =
        session_settings_from_env(&mock_env(vars), BuildMode::Debug).expect("debug fallback");
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_accepts_short_keys() {
    let short = key_file(48);
    let settings = session_settings_from_env(&mock_env(release_vars(&short)), BuildMode::Debug)
        .expect("short keys allowed in debug");
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
fn debug_replaces_underived_keys() {
    let tiny = key_file(8);
    let settings = session_settings_from_env(&mock_env(release_vars(&tiny)), BuildMode::Debug)
        .expect("tiny keys fall back in debug");
    assert_ne!(
        fingerprint::key_fingerprint(&settings.key),
        fingerprint::key_fingerprint(&Key::derive_from(&[b'k'; KEY_DERIVE_MIN_LEN]))
    );
}
