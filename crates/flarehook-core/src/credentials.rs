//! Credential resolution from the process environment.
//!
//! `CF_API_TOKEN` holds one or more whitespace-separated API tokens. When it is
//! absent, `CF_EMAIL` and `CF_KEY` are read as parallel lists and zipped by
//! position. Contexts are tried in the order they were given.

use tracing::warn;

use crate::error::{HookError, Result};
use crate::types::AuthContext;

/// Environment variable holding API tokens
pub const ENV_API_TOKEN: &str = "CF_API_TOKEN";
/// Environment variable holding account emails
pub const ENV_EMAIL: &str = "CF_EMAIL";
/// Environment variable holding global API keys
pub const ENV_KEY: &str = "CF_KEY";

/// Which environment source produced the credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `CF_API_TOKEN`
    Token,
    /// `CF_EMAIL` / `CF_KEY`
    EmailKey,
}

/// Ordered, non-empty list of authentication contexts
#[derive(Debug, Clone)]
pub struct Credentials {
    contexts: Vec<AuthContext>,
    mode: AuthMode,
}

impl Credentials {
    /// Build credentials from an explicit list
    pub fn new(contexts: Vec<AuthContext>, mode: AuthMode) -> Result<Self> {
        if contexts.is_empty() {
            return Err(HookError::NoCredentials);
        }
        Ok(Self { contexts, mode })
    }

    /// Resolve credentials from the real process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tokens) = lookup(ENV_API_TOKEN) {
            if lookup(ENV_EMAIL).is_some() || lookup(ENV_KEY).is_some() {
                warn!("{ENV_API_TOKEN} is set; ignoring {ENV_EMAIL}/{ENV_KEY}");
            }

            let contexts = tokens.split_whitespace().map(AuthContext::bearer).collect();
            return Self::new(contexts, AuthMode::Token);
        }

        let (Some(emails), Some(keys)) = (lookup(ENV_EMAIL), lookup(ENV_KEY)) else {
            return Err(HookError::NoCredentials);
        };

        let emails: Vec<&str> = emails.split_whitespace().collect();
        let keys: Vec<&str> = keys.split_whitespace().collect();
        if emails.len() != keys.len() {
            warn!(
                emails = emails.len(),
                keys = keys.len(),
                "{ENV_EMAIL} and {ENV_KEY} differ in length; unmatched entries are ignored"
            );
        }

        let contexts = emails
            .iter()
            .zip(keys.iter())
            .map(|(email, key)| AuthContext::email_key(*email, *key))
            .collect();
        Self::new(contexts, AuthMode::EmailKey)
    }

    /// Contexts in the order they should be tried
    #[must_use]
    pub fn contexts(&self) -> &[AuthContext] {
        &self.contexts
    }

    /// Source of the contexts
    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Number of contexts
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Whether the list is empty (never true once constructed)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    /// Iterate over contexts in order
    pub fn iter(&self) -> std::slice::Iter<'_, AuthContext> {
        self.contexts.iter()
    }
}

impl<'a> IntoIterator for &'a Credentials {
    type Item = &'a AuthContext;
    type IntoIter = std::slice::Iter<'a, AuthContext>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn tokens_become_bearer_contexts_in_order() {
        let creds = Credentials::from_lookup(env(&[("CF_API_TOKEN", "first  second\tthird")]))
            .unwrap();
        assert_eq!(creds.mode(), AuthMode::Token);
        assert_eq!(
            creds.contexts(),
            &[
                AuthContext::bearer("first"),
                AuthContext::bearer("second"),
                AuthContext::bearer("third"),
            ]
        );
    }

    #[test]
    fn tokens_take_precedence_over_email_key() {
        let creds = Credentials::from_lookup(env(&[
            ("CF_API_TOKEN", "tok"),
            ("CF_EMAIL", "a@example.com"),
            ("CF_KEY", "key"),
        ]))
        .unwrap();
        assert_eq!(creds.mode(), AuthMode::Token);
        assert_eq!(creds.contexts(), &[AuthContext::bearer("tok")]);
    }

    #[test]
    fn email_key_pairs_zip_by_position() {
        let creds = Credentials::from_lookup(env(&[
            ("CF_EMAIL", "a@example.com b@example.com"),
            ("CF_KEY", "key-a key-b"),
        ]))
        .unwrap();
        assert_eq!(creds.mode(), AuthMode::EmailKey);
        assert_eq!(
            creds.contexts(),
            &[
                AuthContext::email_key("a@example.com", "key-a"),
                AuthContext::email_key("b@example.com", "key-b"),
            ]
        );
    }

    #[test]
    fn uneven_email_key_lists_truncate() {
        let creds = Credentials::from_lookup(env(&[
            ("CF_EMAIL", "a@example.com b@example.com"),
            ("CF_KEY", "key-a"),
        ]))
        .unwrap();
        assert_eq!(creds.len(), 1);
    }

    #[test]
    fn nothing_set_is_an_error() {
        let err = Credentials::from_lookup(env(&[])).unwrap_err();
        assert!(matches!(err, HookError::NoCredentials));
    }

    #[test]
    fn email_without_key_is_an_error() {
        let err = Credentials::from_lookup(env(&[("CF_EMAIL", "a@example.com")])).unwrap_err();
        assert!(matches!(err, HookError::NoCredentials));
    }

    #[test]
    fn blank_token_variable_is_an_error() {
        let err = Credentials::from_lookup(env(&[
            ("CF_API_TOKEN", "   "),
            ("CF_EMAIL", "a@example.com"),
            ("CF_KEY", "key"),
        ]))
        .unwrap_err();
        assert!(matches!(err, HookError::NoCredentials));
    }
}
