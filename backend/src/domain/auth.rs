//! Authentication primitives: login credentials, password digests, callers.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::{Login, Role, User, UserId};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Login was missing or blank once trimmed.
    #[error("login must not be empty")]
    EmptyLogin,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `login` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use project_registry::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" aitest ", "aitest").unwrap();
/// assert_eq!(creds.login(), "aitest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    login: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw login/password inputs.
    pub fn try_from_parts(login: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = login.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyLogin);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            login: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login string suitable for account lookups.
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Argon2id hash of a password, stored as a PHC string.
///
/// Each hash carries its own random salt, so identical passwords never share
/// a stored value. Equality is evaluated in constant time.
#[derive(Clone)]
pub struct PasswordDigest(String);

/// Raised when a stored value is not a PHC-formatted password hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password digest must be a PHC-formatted argon2 hash")]
pub struct InvalidPasswordDigest;

/// Raised when the password hasher rejects its input or parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct PasswordHashingError(argon2::password_hash::Error);

impl PasswordDigest {
    /// Hash `password` with Argon2id and a fresh random salt.
    ///
    /// # Examples
    /// ```
    /// use project_registry::domain::PasswordDigest;
    ///
    /// let digest = PasswordDigest::compute("aitest").expect("hashing succeeds");
    /// assert!(digest.as_ref().starts_with("$argon2id$"));
    /// assert!(digest.matches("aitest"));
    /// assert!(!digest.matches("admin"));
    /// ```
    pub fn compute(password: &str) -> Result<Self, PasswordHashingError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(PasswordHashingError)
    }

    /// Parse a PHC string loaded from storage.
    pub fn from_phc(raw: impl Into<String>) -> Result<Self, InvalidPasswordDigest> {
        let raw = raw.into();
        match PhcHash::new(&raw) {
            Ok(hash) if hash.algorithm == argon2::ARGON2ID_IDENT => Ok(Self(raw)),
            _ => Err(InvalidPasswordDigest),
        }
    }

    /// Whether `password` verifies against this hash.
    #[must_use]
    pub fn matches(&self, password: &str) -> bool {
        PhcHash::new(&self.0).is_ok_and(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &hash)
                .is_ok()
        })
    }
}

impl PartialEq for PasswordDigest {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for PasswordDigest {}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// User record together with its credential digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub password_digest: PasswordDigest,
}

impl UserAccount {
    /// Build an account whose digest is derived from `password`.
    pub fn with_password(user: User, password: &str) -> Result<Self, PasswordHashingError> {
        let password_digest = PasswordDigest::compute(password)?;
        Ok(Self {
            user,
            password_digest,
        })
    }
}

/// Authenticated user behind a request.
///
/// Resolved once per request from the session; the role does not change for
/// the lifetime of the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    id: UserId,
    login: Login,
    role: Role,
}

impl Caller {
    /// Construct a caller from its parts.
    #[must_use]
    pub fn new(id: UserId, login: Login, role: Role) -> Self {
        Self { id, login, role }
    }

    /// Identifier of the calling user.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login of the calling user.
    #[must_use]
    pub fn login(&self) -> &Login {
        &self.login
    }

    /// Authority tier of the calling user.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

impl From<User> for Caller {
    fn from(user: User) -> Self {
        let role = user.role();
        Self::new(user.id().clone(), user.login().clone(), role)
    }
}
