//! The die: six upgradable face values
//!
//! Face values decide how many projectiles a roll fires. They only grow, via
//! the three level-up upgrades.

use rand::Rng;

use crate::consts::FACE_COUNT;

/// Compile-time face identifiers, in cube material order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceId {
    Right,
    Left,
    Top,
    Bottom,
    Front,
    Back,
}

impl FaceId {
    pub const ALL: [FaceId; FACE_COUNT] = [
        FaceId::Right,
        FaceId::Left,
        FaceId::Top,
        FaceId::Bottom,
        FaceId::Front,
        FaceId::Back,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Uniformly random face
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..FACE_COUNT)]
    }

    /// Cube rotation (x, y radians) that shows this face to the camera
    pub fn orientation(self) -> (f32, f32) {
        use std::f32::consts::{FRAC_PI_2, PI};
        match self {
            FaceId::Front => (0.0, 0.0),
            FaceId::Back => (0.0, PI),
            FaceId::Right => (0.0, FRAC_PI_2),
            FaceId::Left => (0.0, -FRAC_PI_2),
            FaceId::Top => (-FRAC_PI_2, 0.0),
            FaceId::Bottom => (FRAC_PI_2, 0.0),
        }
    }
}

/// Order in which the presenter searches for a face showing a requested value
const LANDING_ORDER: [FaceId; FACE_COUNT] = [
    FaceId::Front,
    FaceId::Back,
    FaceId::Right,
    FaceId::Left,
    FaceId::Top,
    FaceId::Bottom,
];

/// Values printed on the six faces (all >= 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieFaces([u32; FACE_COUNT]);

impl Default for DieFaces {
    fn default() -> Self {
        Self([1, 2, 1, 2, 1, 2])
    }
}

impl DieFaces {
    /// Build from explicit values; zeros are raised to 1
    pub fn new(values: [u32; FACE_COUNT]) -> Self {
        Self(values.map(|v| v.max(1)))
    }

    #[inline]
    pub fn get(&self, face: FaceId) -> u32 {
        self.0[face.index()]
    }

    pub fn values(&self) -> [u32; FACE_COUNT] {
        self.0
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Add to one face (saturating)
    pub fn bump(&mut self, face: FaceId, amount: u32) {
        let v = &mut self.0[face.index()];
        *v = v.saturating_add(amount);
    }

    /// Face the die should land on to show `value`
    ///
    /// First match in landing order; falls back to the front face when no
    /// face carries the value.
    pub fn landing_face(&self, value: u32) -> FaceId {
        LANDING_ORDER
            .into_iter()
            .find(|&f| self.get(f) == value)
            .unwrap_or(FaceId::Front)
    }
}

/// Level-up upgrade options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upgrade {
    /// +3 on one random face
    Single,
    /// +2 on two random faces (may pick the same face twice)
    Pair,
    /// +1 on three random faces (may repeat)
    Triple,
}

impl Upgrade {
    pub const ALL: [Upgrade; 3] = [Upgrade::Single, Upgrade::Pair, Upgrade::Triple];

    /// Map the UI's option id (1, 2 or 3)
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Upgrade::Single),
            2 => Some(Upgrade::Pair),
            3 => Some(Upgrade::Triple),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            Upgrade::Single => 1,
            Upgrade::Pair => 2,
            Upgrade::Triple => 3,
        }
    }

    /// (number of picks, amount per pick)
    pub fn picks(self) -> (u32, u32) {
        match self {
            Upgrade::Single => (1, 3),
            Upgrade::Pair => (2, 2),
            Upgrade::Triple => (3, 1),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Upgrade::Single => "+3 on 1 face",
            Upgrade::Pair => "+2 on 2 faces",
            Upgrade::Triple => "+1 on 3 faces",
        }
    }
}

/// Apply an upgrade to the die, returning the faces that were picked
pub fn apply_upgrade(faces: &mut DieFaces, upgrade: Upgrade, rng: &mut impl Rng) -> Vec<FaceId> {
    let (count, amount) = upgrade.picks();
    (0..count)
        .map(|_| {
            let face = FaceId::random(rng);
            faces.bump(face, amount);
            log::debug!(
                "Upgrade {:?}: +{} on {:?} -> {}",
                upgrade,
                amount,
                face,
                faces.get(face)
            );
            face
        })
        .collect()
}
