//! Progress reporting for conversions.

use std::fmt;

/// Coarse pipeline stages, in the order a conversion passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Pulling level.dat out of the archive.
    Reading,
    /// Header detection and NBT decoding.
    Parsing,
    /// Removing the Education Edition keys.
    Converting,
    /// Re-encoding the document and reconciling the header.
    Repacking,
    /// Serializing the output archive.
    Generating,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Reading,
        Self::Parsing,
        Self::Converting,
        Self::Repacking,
        Self::Generating,
    ];

    /// The human-readable progress label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reading => "Reading file...",
            Self::Parsing => "Parsing level.dat...",
            Self::Converting => "Converting world data...",
            Self::Repacking => "Repacking world...",
            Self::Generating => "Generating output...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives stage notifications from the conversion pipeline.
///
/// The sink is a pure side channel: it cannot fail, and nothing in the
/// pipeline branches on what it does. A no-op implementation is valid.
pub trait ProgressSink {
    /// Called once as the pipeline enters `stage`.
    fn record_stage(&mut self, stage: Stage);
}

/// The sink that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn record_stage(&mut self, _stage: Stage) {}
}

/// Any closure over a [`Stage`] is a sink.
impl<F: FnMut(Stage)> ProgressSink for F {
    fn record_stage(&mut self, stage: Stage) {
        self(stage);
    }
}
