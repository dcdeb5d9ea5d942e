//! Resume token codec.

use std::fmt;
use std::str::FromStr;

use fc_domain::error::Error;

/// Position in the pre-order walk: how many walk steps earlier pages
/// already consumed (admitted or skipped).
///
/// A cursor is only meaningful against the same document snapshot and the
/// same filter configuration that produced it. Resuming with a different
/// tree or different `node_types` / `max_depth` replays a different walk and
/// lands on a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Cursor(usize);

impl Cursor {
    pub fn new(position: usize) -> Self {
        Self(position)
    }

    pub fn position(self) -> usize {
        self.0
    }
}

impl FromStr for Cursor {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidCursor(raw.to_owned()));
        }
        raw.parse::<usize>()
            .map(Cursor)
            .map_err(|_| Error::InvalidCursor(raw.to_owned()))
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_tokens() {
        assert_eq!("0".parse::<Cursor>().unwrap().position(), 0);
        assert_eq!("42".parse::<Cursor>().unwrap().position(), 42);
        assert_eq!(Cursor::new(7).to_string(), "7");
    }

    #[test]
    fn rejects_malformed_tokens() {
        for raw in ["", "abc", "-1", "+1", "1.5", " 2", "2 ", "99999999999999999999999999"] {
            let err = raw.parse::<Cursor>().unwrap_err();
            assert!(matches!(err, Error::InvalidCursor(ref s) if s == raw), "{raw:?}");
        }
    }
}
