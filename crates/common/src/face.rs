/// A side of the skybox cube.
///
/// Images are always supplied in [`CubeFace::ALL`] order and face `i` is
/// uploaded to cubemap array layer `i`. Supplying them in another order does
/// not fail; the sky just renders rotated or mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    Front,
    Back,
    Top,
    Bottom,
    Right,
    Left,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Front,
        CubeFace::Back,
        CubeFace::Top,
        CubeFace::Bottom,
        CubeFace::Right,
        CubeFace::Left,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Cubemap array layer this face is uploaded to.
    pub fn layer(self) -> u32 {
        match self {
            CubeFace::Front => 0,
            CubeFace::Back => 1,
            CubeFace::Top => 2,
            CubeFace::Bottom => 3,
            CubeFace::Right => 4,
            CubeFace::Left => 5,
        }
    }

    /// File stem used for this face on disk.
    pub fn file_stem(self) -> &'static str {
        match self {
            CubeFace::Front => "front",
            CubeFace::Back => "back",
            CubeFace::Top => "top",
            CubeFace::Bottom => "bottom",
            CubeFace::Right => "right",
            CubeFace::Left => "left",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_follow_declaration_order() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.layer() as usize, i);
        }
    }

    #[test]
    fn file_stems_are_distinct() {
        let mut stems: Vec<_> = CubeFace::ALL.iter().map(|f| f.file_stem()).collect();
        stems.sort();
        stems.dedup();
        assert_eq!(stems.len(), CubeFace::COUNT);
    }
}
