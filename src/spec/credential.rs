//! `user:pass` credential tokens.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Username and password parsed from a single `user:pass` token.
///
/// The token is split on the first `:`, so passwords may contain colons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CredentialPair {
    username: String,
    password: String,
}

impl CredentialPair {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl FromStr for CredentialPair {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (user, pass) = token
            .split_once(':')
            .ok_or_else(|| "credential token has no ':' separator".to_string())?;

        let (user, pass) = (user.trim(), pass.trim());
        if user.is_empty() {
            return Err("credential token has an empty username".to_string());
        }
        if pass.is_empty() {
            return Err("credential token has an empty password".to_string());
        }

        Ok(Self {
            username: user.to_string(),
            password: pass.to_string(),
        })
    }
}

impl fmt::Display for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.username, self.password)
    }
}
