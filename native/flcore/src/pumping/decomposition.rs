//! Pumping length and `x · y · z` decompositions.
//!
//! Lengths are counted in characters, not bytes, so multi-byte input splits
//! on character boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FlError, Result};

/// Pumping length `p` used when checking `|xy| <= p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PumpingLength(pub usize);

impl PumpingLength {
    pub const DEFAULT: PumpingLength = PumpingLength(3);

    /// `min(3, |s| / 2)`, the length chosen for a user-entered string.
    pub fn for_input(s: &str) -> Self {
        PumpingLength(Self::DEFAULT.0.min(s.chars().count() / 2))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Check `1 <= p <= |s|`, the range in which the lemma's splits exist.
    pub fn check_fits(self, s: &str) -> Result<()> {
        let len = s.chars().count();
        if self.0 == 0 || self.0 > len {
            return Err(FlError::invalid(format!(
                "pumping length {self} must be between 1 and |s| = {len}"
            )));
        }
        Ok(())
    }
}

impl Default for PumpingLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PumpingLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split of a string into `x`, `y` and `z`, given as lengths in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decomposition {
    pub x_len: usize,
    pub y_len: usize,
    pub z_len: usize,
}

impl Decomposition {
    /// Fails when `y` would be empty.
    pub fn new(x_len: usize, y_len: usize, z_len: usize) -> Result<Self> {
        if y_len == 0 {
            return Err(FlError::invalid("y must not be empty"));
        }
        Ok(Self {
            x_len,
            y_len,
            z_len,
        })
    }

    /// `x` empty and `y` as long as `p` allows: the default split of a
    /// demonstration.
    pub fn leading(s: &str, p: PumpingLength) -> Result<Self> {
        let len = s.chars().count();
        let y_len = p.get().min(len);
        Self::new(0, y_len, len - y_len)
    }

    /// `|x| + |y| + |z|`.
    pub fn total_len(&self) -> usize {
        self.x_len + self.y_len + self.z_len
    }

    /// Check that the lengths cover `s` exactly and, if `p` is given, that
    /// `|xy| <= p`.
    pub fn validate(&self, s: &str, p: Option<PumpingLength>) -> Result<()> {
        if self.y_len == 0 {
            return Err(FlError::invalid("y must not be empty"));
        }
        let len = s.chars().count();
        if self.total_len() != len {
            return Err(FlError::invalid(format!(
                "decomposition {self} covers {} characters but the string has {len}",
                self.total_len()
            )));
        }
        if let Some(p) = p {
            if self.x_len + self.y_len > p.get() {
                return Err(FlError::invalid(format!(
                    "|xy| = {} exceeds the pumping length {p}",
                    self.x_len + self.y_len
                )));
            }
        }
        Ok(())
    }

    /// Borrow `x`, `y` and `z` from `s`.
    pub fn split<'s>(&self, s: &'s str) -> Result<(&'s str, &'s str, &'s str)> {
        self.validate(s, None)?;
        let x_end = byte_offset(s, self.x_len);
        let y_end = byte_offset(s, self.x_len + self.y_len);
        Ok((&s[..x_end], &s[x_end..y_end], &s[y_end..]))
    }

    /// Every valid decomposition of a string of length `len` with `|xy| <= p`,
    /// ordered by `x` length then `y` length.
    pub fn enumerate(len: usize, p: PumpingLength) -> impl Iterator<Item = Decomposition> {
        let bound = p.get().min(len);
        (0..bound).flat_map(move |x_len| {
            (1..=bound - x_len).map(move |y_len| Decomposition {
                x_len,
                y_len,
                z_len: len - x_len - y_len,
            })
        })
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(|x|={}, |y|={}, |z|={})", self.x_len, self.y_len, self.z_len)
    }
}

fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pumping_length() {
        assert_eq!(PumpingLength::default().get(), 3);
        assert_eq!(PumpingLength::for_input("aaaabbbb"), PumpingLength(3));
        assert_eq!(PumpingLength::for_input("aabb"), PumpingLength(2));
        assert_eq!(PumpingLength::for_input("a"), PumpingLength(0));

        assert!(PumpingLength(2).check_fits("aλ").is_ok());
        assert!(PumpingLength(3).check_fits("aλ").is_err());
        assert!(PumpingLength::for_input("a").check_fits("a").is_err());
    }

    #[test]
    fn test_split() {
        let d = Decomposition::new(1, 2, 3).unwrap();
        assert_eq!(d.split("aaabbb").unwrap(), ("a", "aa", "bbb"));
        assert!(d.split("aaabb").is_err());

        let multibyte = Decomposition::new(1, 1, 1).unwrap();
        assert_eq!(multibyte.split("aλb").unwrap(), ("a", "λ", "b"));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            Decomposition::new(1, 0, 2),
            Err(FlError::InvalidArgument(_))
        ));

        let d = Decomposition::new(3, 2, 4).unwrap();
        assert!(d.validate("aaaaabbbb", None).is_ok());
        assert!(matches!(
            d.validate("aaaaabbbb", Some(PumpingLength(3))),
            Err(FlError::InvalidArgument(_))
        ));
        assert!(d.validate("aaaaabbbb", Some(PumpingLength(5))).is_ok());
    }

    #[test]
    fn test_leading() {
        let d = Decomposition::leading("aabb", PumpingLength(3)).unwrap();
        assert_eq!(d, Decomposition { x_len: 0, y_len: 3, z_len: 1 });

        let d = Decomposition::leading("ab", PumpingLength(3)).unwrap();
        assert_eq!(d, Decomposition { x_len: 0, y_len: 2, z_len: 0 });

        assert!(Decomposition::leading("ab", PumpingLength(0)).is_err());
        assert!(Decomposition::leading("", PumpingLength(3)).is_err());
    }

    #[test]
    fn test_enumerate() {
        let all: Vec<_> = Decomposition::enumerate(4, PumpingLength(2)).collect();
        assert_eq!(
            all,
            vec![
                Decomposition { x_len: 0, y_len: 1, z_len: 3 },
                Decomposition { x_len: 0, y_len: 2, z_len: 2 },
                Decomposition { x_len: 1, y_len: 1, z_len: 2 },
            ]
        );
        assert_eq!(Decomposition::enumerate(0, PumpingLength(3)).count(), 0);
        // p larger than the string is capped at its length.
        assert_eq!(Decomposition::enumerate(2, PumpingLength(9)).count(), 3);
    }
}
