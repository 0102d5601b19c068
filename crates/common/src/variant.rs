use std::fmt;
use std::str::FromStr;

/// One of the three texture sets the skybox can show.
///
/// Cycling order is Interstellar, Miramar, Storm, then back to Interstellar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum SkyboxVariant {
    #[default]
    Interstellar,
    Miramar,
    Storm,
}

impl SkyboxVariant {
    /// Every variant, in cycling order.
    pub const ALL: [SkyboxVariant; 3] = [
        SkyboxVariant::Interstellar,
        SkyboxVariant::Miramar,
        SkyboxVariant::Storm,
    ];

    /// Number of variants.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this variant in [`SkyboxVariant::ALL`].
    pub fn index(self) -> usize {
        match self {
            SkyboxVariant::Interstellar => 0,
            SkyboxVariant::Miramar => 1,
            SkyboxVariant::Storm => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// The variant that follows this one in the cycle.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Directory name holding this variant's face images.
    pub fn dir_name(self) -> &'static str {
        match self {
            SkyboxVariant::Interstellar => "interstellar",
            SkyboxVariant::Miramar => "miramar",
            SkyboxVariant::Storm => "storm",
        }
    }
}

impl fmt::Display for SkyboxVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkyboxVariant::Interstellar => "Interstellar",
            SkyboxVariant::Miramar => "Miramar",
            SkyboxVariant::Storm => "Storm",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown skybox variant: {0:?}")]
pub struct ParseVariantError(pub String);

impl FromStr for SkyboxVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.dir_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseVariantError(s.to_string()))
    }
}

/// One value per skybox variant, indexed by variant.
///
/// Replaces per-variant branching: the driver builds one renderer per
/// variant up front and looks the active one up each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantTable<T> {
    entries: [T; SkyboxVariant::COUNT],
}

impl<T> VariantTable<T> {
    pub fn from_fn(f: impl FnMut(SkyboxVariant) -> T) -> Self {
        Self {
            entries: SkyboxVariant::ALL.map(f),
        }
    }

    /// Build every entry, stopping at the first error.
    pub fn try_from_fn<E>(
        mut f: impl FnMut(SkyboxVariant) -> Result<T, E>,
    ) -> Result<Self, E> {
        let [a, b, c] = SkyboxVariant::ALL;
        Ok(Self {
            entries: [f(a)?, f(b)?, f(c)?],
        })
    }

    pub fn get(&self, variant: SkyboxVariant) -> &T {
        &self.entries[variant.index()]
    }

    pub fn get_mut(&mut self, variant: SkyboxVariant) -> &mut T {
        &mut self.entries[variant.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SkyboxVariant, &T)> {
        SkyboxVariant::ALL.into_iter().zip(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_order() {
        assert_eq!(SkyboxVariant::Interstellar.next(), SkyboxVariant::Miramar);
        assert_eq!(SkyboxVariant::Miramar.next(), SkyboxVariant::Storm);
        assert_eq!(SkyboxVariant::Storm.next(), SkyboxVariant::Interstellar);
    }

    #[test]
    fn n_cycles_wrap_modulo_three() {
        for n in 0..20 {
            let mut v = SkyboxVariant::Interstellar;
            for _ in 0..n {
                v = v.next();
            }
            assert_eq!(v.index(), n % 3);
        }
    }

    #[test]
    fn parse_from_dir_name() {
        assert_eq!("storm".parse::<SkyboxVariant>(), Ok(SkyboxVariant::Storm));
        assert_eq!(
            "MIRAMAR".parse::<SkyboxVariant>(),
            Ok(SkyboxVariant::Miramar)
        );
        assert!("nebula".parse::<SkyboxVariant>().is_err());
    }

    #[test]
    fn table_lookup_by_variant() {
        let table = VariantTable::from_fn(|v| v.dir_name().len());
        assert_eq!(*table.get(SkyboxVariant::Interstellar), 12);
        assert_eq!(*table.get(SkyboxVariant::Storm), 5);
        assert_eq!(table.iter().count(), 3);
    }

    #[test]
    fn table_try_from_fn_propagates_error() {
        let result: Result<VariantTable<u8>, &str> = VariantTable::try_from_fn(|v| {
            if v == SkyboxVariant::Miramar {
                Err("missing")
            } else {
                Ok(1)
            }
        });
        assert_eq!(result, Err("missing"));
    }
}
