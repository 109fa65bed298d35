//! Host platform collaborators: permission query, request and rationale heuristic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Outcome of a permission check or request.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GrantResult {
    Granted,
    Denied,
}

impl GrantResult {
    /// Platform result code: `0` means granted, anything else denied.
    pub fn from_code(code: i32) -> Self {
        if code == 0 {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    pub fn is_granted(self) -> bool {
        self == Self::Granted
    }
}

/// Permission API of the UI context the flow runs in.
pub trait PermissionHost {
    /// Current grant status of one permission.
    fn check_permission(&self, permission: &str) -> GrantResult;

    /// Whether the platform suggests explaining `permission` before asking again.
    fn should_show_rationale(&self, permission: &str) -> bool;

    /// Start an asynchronous request. The host answers later through
    /// [`PermissionFlow::deliver_request_result`](super::PermissionFlow::deliver_request_result)
    /// with the same `request_code`.
    fn request_permissions(&self, permissions: &[String], request_code: i32);

    /// Whether the host currently has a usable context.
    ///
    /// A detached fragment-like host has none and reports every
    /// permission as not granted.
    fn is_attached(&self) -> bool {
        true
    }
}

/// The UI context a flow is bound to.
#[derive(Clone)]
pub enum HostContext {
    Activity(Rc<dyn PermissionHost>),
    Fragment(Rc<dyn PermissionHost>),
}

impl HostContext {
    pub fn host(&self) -> &dyn PermissionHost {
        match self {
            Self::Activity(host) | Self::Fragment(host) => host.as_ref(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Activity(_) => "activity",
            Self::Fragment(_) => "fragment",
        }
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HostContext").field(&self.kind()).finish()
    }
}

/// True if every permission is granted by `host`.
pub fn has_permissions<P: AsRef<str>>(host: &dyn PermissionHost, permissions: &[P]) -> bool {
    permissions
        .iter()
        .all(|p| host.check_permission(p.as_ref()).is_granted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct FixedHost {
        granted: HashSet<&'static str>,
    }

    impl PermissionHost for FixedHost {
        fn check_permission(&self, permission: &str) -> GrantResult {
            if self.granted.contains(permission) {
                GrantResult::Granted
            } else {
                GrantResult::Denied
            }
        }

        fn should_show_rationale(&self, _permission: &str) -> bool {
            false
        }

        fn request_permissions(&self, _permissions: &[String], _request_code: i32) {}
    }

    #[test]
    fn grant_result_from_code() {
        assert_eq!(GrantResult::from_code(0), GrantResult::Granted);
        assert_eq!(GrantResult::from_code(-1), GrantResult::Denied);
        assert_eq!(GrantResult::from_code(7), GrantResult::Denied);
    }

    #[test]
    fn has_permissions_requires_all() {
        let host = FixedHost {
            granted: ["camera"].into_iter().collect(),
        };

        assert!(has_permissions(&host, &["camera"]));
        assert!(!has_permissions(&host, &["camera", "microphone"]));
        assert!(has_permissions::<&str>(&host, &[]));
    }

    #[test]
    fn context_reports_kind() {
        let host: Rc<dyn PermissionHost> = Rc::new(FixedHost {
            granted: HashSet::new(),
        });

        assert_eq!(HostContext::Activity(Rc::clone(&host)).kind(), "activity");
        assert_eq!(HostContext::Fragment(host).kind(), "fragment");
    }
}
