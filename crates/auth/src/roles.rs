use core::str::FromStr;

use serde::{Deserialize, Serialize};

use gatehouse_core::DomainError;

/// Role of a user account.
///
/// This is a closed set: permission grants and token claims reference roles
/// by these names, and an unknown role name is a hard error rather than a
/// silently-denied string.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    SuperAdmin,
    PanoramaAdmin,
    ContentAdmin,
    AccountManager,
    ConsumerParent,
    ConsumerChild,
    Consultant,
    ReferralPartner,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "superAdmin",
            Role::PanoramaAdmin => "panoramaAdmin",
            Role::ContentAdmin => "contentAdmin",
            Role::AccountManager => "accountManager",
            Role::ConsumerParent => "consumerParent",
            Role::ConsumerChild => "consumerChild",
            Role::Consultant => "consultant",
            Role::ReferralPartner => "referralPartner",
            Role::User => "user",
        }
    }

    /// Roles allowed to authenticate against the administrative surface.
    ///
    /// Consumer-facing roles hold valid credentials but may not open an
    /// admin session.
    pub fn admin_surface() -> &'static [Role] {
        &[
            Role::SuperAdmin,
            Role::PanoramaAdmin,
            Role::ContentAdmin,
            Role::AccountManager,
        ]
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superAdmin" => Ok(Role::SuperAdmin),
            "panoramaAdmin" => Ok(Role::PanoramaAdmin),
            "contentAdmin" => Ok(Role::ContentAdmin),
            "accountManager" => Ok(Role::AccountManager),
            "consumerParent" => Ok(Role::ConsumerParent),
            "consumerChild" => Ok(Role::ConsumerChild),
            "consultant" => Ok(Role::Consultant),
            "referralPartner" => Ok(Role::ReferralPartner),
            "user" => Ok(Role::User),
            other => Err(DomainError::invalid_id(format!("unknown role '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in [
            Role::SuperAdmin,
            Role::PanoramaAdmin,
            Role::ContentAdmin,
            Role::AccountManager,
            Role::ConsumerParent,
            Role::ConsumerChild,
            Role::Consultant,
            Role::ReferralPartner,
            Role::User,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("rootAdmin".parse::<Role>().is_err());
    }

    #[test]
    fn admin_surface_excludes_consumer_roles() {
        assert!(!Role::admin_surface().contains(&Role::User));
        assert!(!Role::admin_surface().contains(&Role::ConsumerParent));
        assert!(Role::admin_surface().contains(&Role::ContentAdmin));
    }

    #[test]
    fn serde_uses_camel_case_names() {
        let json = serde_json::to_string(&Role::ContentAdmin).unwrap();
        assert_eq!(json, "\"contentAdmin\"");
    }
}
