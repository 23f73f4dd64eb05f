//! Pattern definitions and stock shapes.
//!
//! A pattern is an ordered list of integer offsets relative to its anchor.
//! It carries no state of its own and is handed to the grid fresh for each
//! placement attempt.

use glam::IVec3;

/// An ordered set of local offsets describing a multi-cell shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    offsets: Vec<IVec3>,
}

/// Stock shapes by name, offsets normalized so the minimum is at the origin.
const STOCK: &[(&str, &[[i32; 3]])] = &[
    // 6-cell L with arms of three and four
    (
        "hexa-l",
        &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [0, 1, 0], [0, 2, 0], [0, 3, 0]],
    ),
    // the seven Soma cube pieces
    ("tri-v", &[[0, 0, 0], [1, 0, 0], [0, 1, 0]]),
    ("tetra-l", &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [0, 1, 0]]),
    ("tetra-t", &[[0, 0, 0], [1, 0, 0], [2, 0, 0], [1, 1, 0]]),
    ("tetra-s", &[[0, 0, 0], [1, 0, 0], [1, 1, 0], [2, 1, 0]]),
    ("corner-a", &[[0, 0, 0], [1, 0, 0], [0, 1, 0], [1, 0, 1]]),
    ("corner-b", &[[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]]),
    ("corner-c", &[[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 1, 1]]),
];

impl Pattern {
    /// Names accepted by [`Pattern::named`].
    pub const NAMES: [&'static str; 8] = [
        "hexa-l", "tri-v", "tetra-l", "tetra-t", "tetra-s", "corner-a", "corner-b", "corner-c",
    ];

    pub fn new(offsets: impl IntoIterator<Item = IVec3>) -> Self {
        Self {
            offsets: offsets.into_iter().collect(),
        }
    }

    /// Looks up a stock shape.
    pub fn named(name: &str) -> Option<Self> {
        STOCK
            .iter()
            .find(|(stock_name, _)| *stock_name == name)
            .map(|(_, offsets)| offsets.iter().copied().map(IVec3::from_array).collect())
    }

    /// The six-cell L shape used by the default exploration run.
    pub fn l_hexacube() -> Self {
        Self::new([
            IVec3::new(0, 0, 0),
            IVec3::new(1, 0, 0),
            IVec3::new(2, 0, 0),
            IVec3::new(0, 1, 0),
            IVec3::new(0, 2, 0),
            IVec3::new(0, 3, 0),
        ])
    }

    #[inline]
    pub fn offsets(&self) -> &[IVec3] {
        &self.offsets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IVec3> {
        self.offsets.iter()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Returns the inclusive (min, max) corners of the offsets.
    pub fn bounds(&self) -> Option<(IVec3, IVec3)> {
        let first = *self.offsets.first()?;
        Some(
            self.offsets
                .iter()
                .fold((first, first), |(min, max), &offset| {
                    (min.min(offset), max.max(offset))
                }),
        )
    }
}

impl AsRef<[IVec3]> for Pattern {
    fn as_ref(&self) -> &[IVec3] {
        &self.offsets
    }
}

impl FromIterator<IVec3> for Pattern {
    fn from_iter<I: IntoIterator<Item = IVec3>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a IVec3;
    type IntoIter = std::slice::Iter<'a, IVec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.offsets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        for name in Pattern::NAMES {
            let pattern = Pattern::named(name);
            assert!(pattern.is_some(), "Stock pattern {name} is missing");
        }
        assert_eq!(STOCK.len(), Pattern::NAMES.len());
        assert!(Pattern::named("dodecahedron").is_none());
    }

    #[test]
    fn test_named_hexa_l_matches_constructor() {
        assert_eq!(Pattern::named("hexa-l"), Some(Pattern::l_hexacube()));
    }

    #[test]
    fn test_stock_shapes_are_normalized() {
        for name in Pattern::NAMES {
            let pattern = Pattern::named(name).unwrap();
            let (min, _) = pattern.bounds().unwrap();
            assert_eq!(min, IVec3::ZERO, "{name} should start at the origin");
        }
    }

    #[test]
    fn test_bounds() {
        let pattern = Pattern::new([IVec3::new(-1, 2, 0), IVec3::new(3, -4, 1), IVec3::ZERO]);
        assert_eq!(
            pattern.bounds(),
            Some((IVec3::new(-1, -4, 0), IVec3::new(3, 2, 1)))
        );
        assert_eq!(Pattern::default().bounds(), None);
    }

    #[test]
    fn test_order_is_preserved() {
        let offsets = [IVec3::Z, IVec3::X, IVec3::Y];
        let pattern: Pattern = offsets.into_iter().collect();
        assert_eq!(pattern.offsets(), &offsets);
        assert_eq!(pattern.len(), 3);
        assert!(!pattern.is_empty());
    }
}
