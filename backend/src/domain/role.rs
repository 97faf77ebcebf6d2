//! Authority tiers held by users.
//!
//! Every user holds exactly one [`Role`]. Roles serialise as the authority
//! strings used on the wire and in storage (`ROLE_AITESTER`, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Authority tier of a user.
///
/// Only one distinction drives authorization: the restricted
/// [`Role::AiTester`] tier versus every more privileged tier. No precedence is
/// defined between [`Role::AiCreator`] and [`Role::Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    /// Restricted tier: sees its own and peer tester projects, cannot create.
    #[serde(rename = "ROLE_AITESTER")]
    AiTester,
    /// Tier allowed to create projects.
    #[serde(rename = "ROLE_AICREATOR")]
    AiCreator,
    /// Administrative tier.
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

/// Raised when an authority string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown authority: {authority}")]
pub struct UnknownAuthority {
    authority: String,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 3] = [Self::AiTester, Self::AiCreator, Self::Admin];

    /// Authority string for this role.
    ///
    /// # Examples
    /// ```
    /// use project_registry::domain::Role;
    ///
    /// assert_eq!(Role::AiTester.authority(), "ROLE_AITESTER");
    /// assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
    /// ```
    #[must_use]
    pub const fn authority(self) -> &'static str {
        match self {
            Self::AiTester => "ROLE_AITESTER",
            Self::AiCreator => "ROLE_AICREATOR",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    /// Whether this is the restricted tester tier.
    #[must_use]
    pub const fn is_tester(self) -> bool {
        matches!(self, Self::AiTester)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.authority())
    }
}

impl FromStr for Role {
    type Err = UnknownAuthority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.authority() == s)
            .ok_or_else(|| UnknownAuthority {
                authority: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::AiTester)]
    #[case(Role::AiCreator)]
    #[case(Role::Admin)]
    fn authority_strings_parse_back(#[case] role: Role) {
        assert_eq!(role.authority().parse::<Role>(), Ok(role));
        let json = serde_json::to_string(&role).expect("serialise role");
        assert_eq!(json, format!("\"{}\"", role.authority()));
    }

    #[rstest]
    #[case("ROLE_USER")]
    #[case("role_admin")]
    #[case("")]
    fn unknown_authorities_are_rejected(#[case] raw: &str) {
        let err = raw.parse::<Role>().expect_err("unknown authority");
        assert!(err.to_string().contains("unknown authority"));
    }

    #[rstest]
    fn only_the_tester_tier_is_restricted() {
        assert!(Role::AiTester.is_tester());
        assert!(!Role::AiCreator.is_tester());
        assert!(!Role::Admin.is_tester());
    }
}
