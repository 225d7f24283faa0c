use serde::{Deserialize, Serialize};

/// A movement action the camera understands.
///
/// Hosts translate their raw key events into these; physics never sees raw
/// key identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoveKey {
    /// Step along the view direction.
    Forward,
    /// Step against the view direction.
    Backward,
    /// Decrease yaw.
    RotateLeft,
    /// Increase yaw.
    RotateRight,
}

impl MoveKey {
    pub const ALL: [Self; 4] = [
        Self::Forward,
        Self::Backward,
        Self::RotateLeft,
        Self::RotateRight,
    ];

    /// Default WASD binding, case-insensitive. Anything else is unbound.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Self::Forward),
            's' => Some(Self::Backward),
            'a' => Some(Self::RotateLeft),
            'd' => Some(Self::RotateRight),
            _ => None,
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            Self::Forward => 1,
            Self::Backward => 1 << 1,
            Self::RotateLeft => 1 << 2,
            Self::RotateRight => 1 << 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_bindings() {
        assert_eq!(MoveKey::from_char('w'), Some(MoveKey::Forward));
        assert_eq!(MoveKey::from_char('S'), Some(MoveKey::Backward));
        assert_eq!(MoveKey::from_char('a'), Some(MoveKey::RotateLeft));
        assert_eq!(MoveKey::from_char('d'), Some(MoveKey::RotateRight));
    }

    #[test]
    fn unknown_keys_are_unbound() {
        assert_eq!(MoveKey::from_char('q'), None);
        assert_eq!(MoveKey::from_char(' '), None);
    }
}
