use crate::error::InputError;

/// Landmark index of the index-finger tip in the 21-point hand model.
pub const INDEX_TIP: usize = 8;

/// One keypoint as reported by the landmark model, normalized to the camera frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Build landmarks from a flat `[x, y, z, x, y, z, ...]` array.
    /// A trailing partial triple is dropped.
    pub fn from_flat(coords: &[f32]) -> Vec<Landmark> {
        coords
            .chunks_exact(3)
            .map(|c| Landmark::new(c[0], c[1], c[2]))
            .collect()
    }
}

/// The latest fingertip position, mirrored to match a front-facing camera view.
/// Both axes are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandSample {
    pub x: f32,
    pub y: f32,
}

impl HandSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Take the index-finger tip from the first detected hand and mirror it.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, InputError> {
        let tip = landmarks
            .get(INDEX_TIP)
            .ok_or(InputError::MalformedLandmarks { len: landmarks.len() })?;
        Ok(Self {
            x: 1.0 - tip.x,
            y: tip.y,
        })
    }
}
