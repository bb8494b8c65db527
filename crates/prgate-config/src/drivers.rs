use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Invalid driver kind: {kind}")]
    InvalidDriverKind { kind: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitDriver {
    Null,
    Cli,
}

impl FromStr for GitDriver {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.to_lowercase()[..] {
            "null" => Ok(Self::Null),
            "cli" => Ok(Self::Cli),
            _ => Err(DriverError::InvalidDriverKind { kind: s.into() }),
        }
    }
}

impl std::fmt::Display for GitDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Cli => "cli",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_git_driver() {
        assert_eq!(GitDriver::from_str("cli").unwrap(), GitDriver::Cli);
        assert_eq!(GitDriver::from_str("NULL").unwrap(), GitDriver::Null);
        assert!(matches!(
            GitDriver::from_str("libgit"),
            Err(DriverError::InvalidDriverKind { kind }) if kind == "libgit"
        ));
    }
}
