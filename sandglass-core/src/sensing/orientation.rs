//! Orientation classification
//!
//! The device is a flat slab held on one of its four edges. Gravity along
//! the long (`y`) axis means the device stands upright or inverted, gravity
//! along the short (`x`) axis means it lies on a side. Anything in between
//! is ignored: the classifier keeps its previous answer until one axis is
//! clearly dominant, so a device resting at an odd angle never flickers.

/// One accelerometer reading in device axes (m/s², 1 g ≈ 9.8)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Discrete physical attitude of the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    /// Standing upright (+y against gravity)
    #[default]
    Up,
    /// Standing inverted
    Down,
    /// Lying on the side that keeps the text readable
    SideUp,
    /// Lying on the opposite side
    SideDown,
}

impl Orientation {
    /// Text and sand read correctly without rotating the matrix
    pub fn is_facing_up(&self) -> bool {
        matches!(self, Orientation::Up | Orientation::SideUp)
    }

    /// Valid orientation for a running countdown
    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Up | Orientation::Down)
    }
}

/// Threshold-and-hold orientation classifier
#[derive(Debug, Clone, Copy)]
pub struct OrientationClassifier {
    threshold: f32,
    current: Orientation,
}

impl OrientationClassifier {
    /// Create a classifier that starts out assuming `initial`
    pub fn new(threshold: f32, initial: Orientation) -> Self {
        Self {
            threshold,
            current: initial,
        }
    }

    /// Last classified orientation
    pub fn current(&self) -> Orientation {
        self.current
    }

    /// Classify a sample, holding the previous orientation when ambiguous
    ///
    /// The vertical axis wins over the lateral one. NaN readings compare
    /// false against the threshold and therefore also hold.
    pub fn classify(&mut self, sample: AccelSample) -> Orientation {
        let t = self.threshold;

        if sample.y > t {
            self.current = Orientation::Up;
        } else if sample.y < -t {
            self.current = Orientation::Down;
        } else if sample.x > t {
            self.current = Orientation::SideDown;
        } else if sample.x < -t {
            self.current = Orientation::SideUp;
        }

        self.current
    }
}
