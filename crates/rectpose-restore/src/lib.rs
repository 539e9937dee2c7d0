#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # rectpose-restore
//!
//! Turns four corners picked on an image into a camera pose and a teleport command.
//!
//! ## Example
//!
//! ```rust
//! use rectpose_core::{HalfExtents, Point2};
//! use rectpose_restore::{restore, teleport_command, Face, ImageSize, RestoreParams, RestoreRequest};
//!
//! let request = RestoreRequest {
//!     picks: [
//!         Point2::new(1079.2570705160322, -51.419889722832295),
//!         Point2::new(475.78462366250596, -58.25798487012162),
//!         Point2::new(1071.2257008215634, 242.08802913011453),
//!         Point2::new(510.63350179660546, 255.89807284717494),
//!     ],
//!     fov_deg: 70.0,
//!     extents: HalfExtents::new(1.0, 0.5),
//!     face: Face::PosZ,
//!     image: ImageSize::new(1920.0, 1080.0),
//! };
//!
//! let restoration = restore(&request, &RestoreParams::default());
//! let solved = restoration.solved().ok_or("no pose")?;
//! let command = teleport_command(solved, &[0.0, 64.0, 0.0])?;
//! assert!(command.starts_with("/execute in overworld? run tp @s"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Last accepted solution shared between threads.
pub mod cache;

/// Teleport command formatting.
pub mod command;

/// Error types.
pub mod error;

/// Block faces and their fixed frames.
pub mod face;

/// Pixel to projective-plane mapping.
pub mod normalize;

/// Pixel-space geometry for drawing a restoration.
pub mod overlay;

/// The restoration pipeline.
pub mod restore;

/// Geometric validity of four picks.
pub mod validity;

pub use cache::PoseCache;
pub use command::{format_teleport, teleport_command, teleport_target};
pub use error::{InvalidPicks, ParseFaceError, RestoreError};
pub use face::Face;
pub use normalize::{projective_width, ImageSize, PixelMapping};
pub use overlay::{extend_to_bounds, overlay, Overlay, Segment};
pub use restore::{
    reprojection_error, restore, Restoration, RestoreParams, RestoreRequest, SolvedPose,
};
pub use validity::{check_picks, is_valid, ValidityParams};
