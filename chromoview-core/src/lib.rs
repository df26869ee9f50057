//! ChromoView Core Library
//!
//! Coordinate mapping, chromosome band composition, click-to-range selection
//! and the viewport transform bridge for interactive chromosome diagrams.

pub mod types;
pub mod error;
pub mod coords;
pub mod bands;
pub mod notice;
pub mod selection;
pub mod viewport;
pub mod state;
pub mod genes;
pub mod io;
pub mod session;

// Re-export commonly used types and functions
pub use types::{BasePair, BpRange, CentromereInterval, ChromosomeItem, GeneticElement, Strand};
pub use error::{ChromoError, ChromoResult, GeneSourceError};
pub use coords::{format_bp, CoordinateMapper, ElementBox, MeasureElement};
pub use bands::{compose_bands, glyph_extent, hit_region, Band, BandKind, BandRect, GlyphGeometry, Rounding};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use selection::{AnchorPosition, Cursor, GeneQuery, OverlayStyle, OverlayView, QueryOutcome, SelectionController};
pub use viewport::{Camera, NudgeStart, Transform, TransformBridge, ViewportBounds, ViewportController};
pub use state::{reduce, ViewerAction, ViewerState};
pub use genes::{AnnotationIndex, GeneSource};
pub use io::{ChromosomeSource, JsonChromosomeFile};
pub use session::ViewerSession;

/// Version information for the ChromoView core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
