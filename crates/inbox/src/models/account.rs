//! Account model supplied by the hosting application
//!
//! The core does not manage accounts. The host hands over the list it
//! knows about; the core only uses it to populate the account filter and
//! to resolve a sending/sync account when none was specified.

use serde::{Deserialize, Serialize};

/// An email account known to the hosting application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAccount {
    /// Backend account identifier
    pub id: String,
    /// Display name shown in the account filter
    pub name: String,
}

impl EmailAccount {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Resolve the default account: the first in the host-supplied list.
    ///
    /// An unspecified "all accounts" intent falls back to the first
    /// available account, always the same one for a given list. Returns
    /// `None` when no accounts exist.
    pub fn default_account(accounts: &[EmailAccount]) -> Option<&EmailAccount> {
        accounts.first()
    }

    /// Resolve an optional requested account id against the known list.
    ///
    /// `None` falls back to [`default_account`](Self::default_account);
    /// an id that matches no known account resolves to `None`.
    pub fn resolve<'a>(
        requested: Option<&str>,
        accounts: &'a [EmailAccount],
    ) -> Option<&'a EmailAccount> {
        match requested {
            Some(id) => accounts.iter().find(|a| a.id == id),
            None => Self::default_account(accounts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<EmailAccount> {
        vec![
            EmailAccount::new("acc-1", "Work"),
            EmailAccount::new("acc-2", "Personal"),
        ]
    }

    #[test]
    fn test_default_account_is_first() {
        let accounts = accounts();
        let def = EmailAccount::default_account(&accounts).unwrap();
        assert_eq!(def.id, "acc-1");
    }

    #[test]
    fn test_default_account_empty() {
        assert!(EmailAccount::default_account(&[]).is_none());
    }

    #[test]
    fn test_resolve_by_id() {
        let accounts = accounts();
        let acc = EmailAccount::resolve(Some("acc-2"), &accounts).unwrap();
        assert_eq!(acc.name, "Personal");
    }

    #[test]
    fn test_resolve_unknown_id() {
        let accounts = accounts();
        assert!(EmailAccount::resolve(Some("acc-9"), &accounts).is_none());
    }

    #[test]
    fn test_resolve_none_falls_back_to_first() {
        let accounts = accounts();
        let acc = EmailAccount::resolve(None, &accounts).unwrap();
        assert_eq!(acc.id, "acc-1");
    }
}
