//! Identifier types for platform groups, connectors, and hybrid agents.
//!
//! Identifiers are opaque strings assigned by the platform. Caller-supplied
//! identifiers are validated through [`ConnectorId::parse`] and
//! [`AgentId::parse`], which reject blank input and name the offending tool
//! parameter in the error.

use super::InventoryDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-')
}

macro_rules! platform_id {
    ($(#[$meta:meta])* $name:ident, $parameter:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier received from the platform without validation.
            #[must_use]
            pub fn from_platform(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Validates a caller-supplied identifier.
            ///
            /// The input is trimmed before validation.
            ///
            /// # Errors
            ///
            /// Returns [`InventoryDomainError::EmptyIdentifier`] when the
            /// value is absent or blank after trimming, and
            /// [`InventoryDomainError::InvalidIdentifier`] when it contains
            /// characters other than ASCII letters, digits, `_`, and `-`.
            pub fn parse(value: Option<&str>) -> Result<Self, InventoryDomainError> {
                let trimmed = value.map(str::trim).unwrap_or_default();
                if trimmed.is_empty() {
                    return Err(InventoryDomainError::EmptyIdentifier {
                        parameter: $parameter,
                    });
                }
                if !trimmed.chars().all(is_identifier_char) {
                    return Err(InventoryDomainError::InvalidIdentifier {
                        parameter: $parameter,
                        value: trimmed.to_owned(),
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(self.as_str())
            }
        }
    };
}

platform_id!(
    /// Identifier of a platform group (destination).
    GroupId,
    "group_id"
);

platform_id!(
    /// Identifier of a connector.
    ConnectorId,
    "connector_id"
);

platform_id!(
    /// Identifier of a hybrid deployment agent.
    AgentId,
    "agent_id"
);
