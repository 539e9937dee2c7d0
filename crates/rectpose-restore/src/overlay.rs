use rectpose_core::{project_points, Point2, Pose};
use serde::Serialize;

use crate::face::Face;
use crate::normalize::{ImageSize, PixelMapping};
use crate::restore::{Restoration, RestoreRequest};

/// Coordinates closer than this are treated as equal when extending segments.
const NEAR_EPS: f64 = 1e-4;

/// Draw order of the picks around the rectangle outline.
const OUTLINE_ORDER: [usize; 5] = [0, 1, 3, 2, 0];

/// A segment between two pixel points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// First end point.
    pub start: Point2,
    /// Second end point.
    pub end: Point2,
}

impl Segment {
    /// Create a segment.
    pub const fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }
}

/// Everything needed to draw a restoration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    /// Whether the picks passed the validity check.
    pub valid: bool,
    /// Closed outline through the picks.
    pub outline: [Point2; 5],
    /// Outline sides stretched to the image borders; empty for invalid picks.
    pub extended_sides: Vec<Segment>,
    /// Projected x, y and z axes starting at the first corner; empty without a pose.
    pub axes: Vec<Segment>,
    /// Projected corner normals stretched to the image borders; empty without a pose.
    pub normals: Vec<Segment>,
}

/// Closed outline `[P1, P2, P4, P3, P1]`.
pub fn outline(picks: &[Point2; 4]) -> [Point2; 5] {
    OUTLINE_ORDER.map(|i| picks[i])
}

/// Project face-framed world points with a face-framed pose into pixels.
pub(crate) fn project_framed(
    points: &[[f64; 3]],
    face: Face,
    pose: &Pose,
    mapping: &PixelMapping,
) -> Vec<Point2> {
    let frame = face.frame();
    let framed: Vec<[f64; 3]> = points.iter().map(|p| frame.mul_vec(p)).collect();
    project_points(&framed, pose)
        .iter()
        .map(|p| mapping.to_pixel(p))
        .collect()
}

/// Axes gizmo: segments from the first corner along the world x, y and z axes.
///
/// The corner `(-a, -b, 0)` is moved into the face frame first; the unit offsets are
/// applied afterwards, in world axes.
pub fn axes_gizmo(request: &RestoreRequest, pose: &Pose) -> Vec<Segment> {
    let mapping = PixelMapping::new(request.fov_deg, &request.image);
    let origin = request
        .face
        .frame()
        .mul_vec(&[-request.extents.a, -request.extents.b, 0.0]);
    let points = [
        origin,
        [origin[0] + 1.0, origin[1], origin[2]],
        [origin[0], origin[1] + 1.0, origin[2]],
        [origin[0], origin[1], origin[2] + 1.0],
    ];
    let projected: Vec<Point2> = project_points(&points, pose)
        .iter()
        .map(|p| mapping.to_pixel(p))
        .collect();
    projected[1..]
        .iter()
        .map(|end| Segment::new(projected[0], *end))
        .collect()
}

/// Rectangle normals: for every corner, the line through the corner and the corner
/// lifted by one along the plane normal, stretched to the image borders.
pub fn plane_normals(request: &RestoreRequest, pose: &Pose) -> Vec<Segment> {
    let mapping = PixelMapping::new(request.fov_deg, &request.image);
    request
        .extents
        .corners()
        .iter()
        .map(|corner| {
            let lifted = [corner[0], corner[1], corner[2] + 1.0];
            let p = project_framed(&[*corner, lifted], request.face, pose, &mapping);
            extend_to_bounds(&Segment::new(p[0], p[1]), &request.image)
        })
        .collect()
}

/// Stretch a segment along its line until it meets the image borders.
///
/// Vertical and horizontal segments span the full image height or width. Otherwise the
/// two middle crossings of the line with the four border lines are kept.
pub fn extend_to_bounds(segment: &Segment, size: &ImageSize) -> Segment {
    let (width, height) = (size.width, size.height);
    let (p1, p2) = (segment.start, segment.end);
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;

    if is_near(dx, 0.0) {
        return Segment::new(Point2::new(p1.x, 0.0), Point2::new(p2.x, height));
    }
    if is_near(dy, 0.0) {
        return Segment::new(Point2::new(0.0, p1.y), Point2::new(width, p2.y));
    }

    // pick an anchor that does not already sit on a border
    let on_border = |p: &Point2| {
        is_near(p.x, 0.0) || is_near(p.x, width) || is_near(p.y, 0.0) || is_near(p.y, height)
    };
    let mut anchor = p1;
    if on_border(&p1) {
        anchor = p2;
    }
    if on_border(&p2) {
        anchor = Point2::new((p1.x + p2.x) * 0.5, (p1.y + p2.y) * 0.5);
    }

    let mut t = [
        -anchor.x / dx,
        -anchor.y / dy,
        (width - anchor.x) / dx,
        (height - anchor.y) / dy,
    ];
    t.sort_by(f64::total_cmp);
    Segment::new(
        Point2::new(anchor.x + t[1] * dx, anchor.y + t[1] * dy),
        Point2::new(anchor.x + t[2] * dx, anchor.y + t[2] * dy),
    )
}

fn is_near(x: f64, y: f64) -> bool {
    (x - y).abs() < NEAR_EPS
}

/// Build the overlay of a restoration.
pub fn overlay(request: &RestoreRequest, restoration: &Restoration) -> Overlay {
    let outline = outline(&request.picks);
    let valid = restoration.is_valid();

    let extended_sides = if valid {
        outline
            .windows(2)
            .map(|w| extend_to_bounds(&Segment::new(w[0], w[1]), &request.image))
            .collect()
    } else {
        Vec::new()
    };

    let (axes, normals) = match restoration.solved() {
        Some(solved) => (
            axes_gizmo(request, &solved.pose),
            plane_normals(request, &solved.pose),
        ),
        None => (Vec::new(), Vec::new()),
    };

    Overlay {
        valid,
        outline,
        extended_sides,
        axes,
        normals,
    }
}
