use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Wraps customer data so it never shows up in `Debug` output or log lines.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Snapshots written back to disk need the real address.
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_value() {
        let email = Masked("buyer@example.com".to_string());
        assert_eq!(format!("{:?}", email), "********");
        assert_eq!(email.to_string(), "********");
        assert_eq!(email.expose(), "buyer@example.com");
    }

    #[test]
    fn test_serialize_keeps_value() {
        let email = Masked("buyer@example.com".to_string());
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"buyer@example.com\"");

        let back: Masked<String> = serde_json::from_str("\"x@y.z\"").unwrap();
        assert_eq!(back.into_inner(), "x@y.z");
    }
}
