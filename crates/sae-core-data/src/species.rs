/// Iris species, coded 0..=2 in file order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Species {
    Setosa = 0,
    Versicolor = 1,
    Virginica = 2,
}

/// Label <-> species table. Index equals the species code.
pub const SPECIES: [(&str, Species); 3] = [
    ("Iris-setosa", Species::Setosa),
    ("Iris-versicolor", Species::Versicolor),
    ("Iris-virginica", Species::Virginica),
];

impl Species {
    #[inline(always)]
    pub const fn code(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn name(self) -> &'static str {
        SPECIES[self as usize].0
    }

    pub fn from_label(label: &str) -> Option<Self> {
        SPECIES
            .iter()
            .find(|(name, _)| *name == label)
            .map(|&(_, s)| s)
    }

    pub fn from_code(code: usize) -> Option<Self> {
        SPECIES.get(code).map(|&(_, s)| s)
    }
}
