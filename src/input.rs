use serde::{Deserialize, Serialize};

/// Directional intent bound to W/A/S/D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    /// Maps a DOM style key name (`"w"`, `"W"`, ...) to movement. Only
    /// W/A/S/D move the character.
    pub fn from_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return None;
        };
        match ch.to_ascii_uppercase() {
            'W' => Some(Self::Forward),
            'S' => Some(Self::Back),
            'A' => Some(Self::Left),
            'D' => Some(Self::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_is_case_insensitive() {
        assert_eq!(MoveKey::from_name("w"), Some(MoveKey::Forward));
        assert_eq!(MoveKey::from_name("W"), Some(MoveKey::Forward));
        assert_eq!(MoveKey::from_name("a"), Some(MoveKey::Left));
        assert_eq!(MoveKey::from_name("S"), Some(MoveKey::Back));
        assert_eq!(MoveKey::from_name("d"), Some(MoveKey::Right));
    }

    #[test]
    fn other_keys_are_ignored() {
        assert_eq!(MoveKey::from_name("ArrowUp"), None);
        assert_eq!(MoveKey::from_name("q"), None);
        assert_eq!(MoveKey::from_name("wd"), None);
        assert_eq!(MoveKey::from_name(""), None);
    }
}
