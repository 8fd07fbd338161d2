//! Player identification for two-player games.

use std::fmt;

/// Identifies one of the two players of a zero-sum game.
///
/// Games map their own colour/side representation onto `FIRST` and `SECOND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The player who moves first.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// The other player.
    #[inline]
    pub fn opponent(self) -> PlayerId {
        if self == Self::FIRST {
            Self::SECOND
        } else {
            Self::FIRST
        }
    }

    /// Zero-based index, handy for per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
        assert_eq!(PlayerId::FIRST.opponent().opponent(), PlayerId::FIRST);
    }

    #[test]
    fn test_index_and_display() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::SECOND.index(), 1);
        assert_eq!(PlayerId::SECOND.to_string(), "P2");
    }
}
