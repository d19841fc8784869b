//! Host scene elements as seen by the synchronizer

use gridmirror_core::{Crop, Scale};

/// How the host fits a cropped source into the element's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsFit {
    /// No bounding box
    None,
    /// Stretch to the box, ignoring aspect
    Stretch,
    /// Scale until the source fits inside the box
    ScaleToFit,
    /// Scale until the source covers the box
    ScaleToFill,
}

/// Anchor of the source inside the bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    TopLeft,
}

/// Bounding policy of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundsPolicy {
    pub fit: BoundsFit,
    pub anchor: Anchor,
}

impl BoundsPolicy {
    /// Policy written to every shown managed element
    pub const FILL_TOP_LEFT: BoundsPolicy = BoundsPolicy {
        fit: BoundsFit::ScaleToFill,
        anchor: Anchor::TopLeft,
    };
}

impl Default for BoundsPolicy {
    fn default() -> Self {
        BoundsPolicy {
            fit: BoundsFit::None,
            anchor: Anchor::Center,
        }
    }
}

/// One element of the host scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    /// Host-side name, for logs
    pub name: String,
    /// Displays the bound call-window capture
    pub managed: bool,
    pub visible: bool,
    pub crop: Crop,
    pub scale: Scale,
    /// Bounding box width and height; zero when the element has none
    pub bounds: (f32, f32),
    pub policy: BoundsPolicy,
}

impl SceneElement {
    /// A managed element with the given bounding box
    pub fn managed(name: impl Into<String>, bounds: (f32, f32)) -> Self {
        Self {
            name: name.into(),
            managed: true,
            visible: true,
            crop: Crop::default(),
            scale: Scale::default(),
            bounds,
            policy: BoundsPolicy::default(),
        }
    }

    /// Any other element (overlay, indicator, background)
    pub fn unmanaged(name: impl Into<String>) -> Self {
        Self {
            managed: false,
            bounds: (0.0, 0.0),
            ..Self::managed(name, (0.0, 0.0))
        }
    }

    /// Aspect ratio of the bounding box, if it has one
    pub fn bounds_aspect(&self) -> Option<f64> {
        let (w, h) = self.bounds;
        if w > 0.0 && h > 0.0 {
            Some(w as f64 / h as f64)
        } else {
            None
        }
    }
}
