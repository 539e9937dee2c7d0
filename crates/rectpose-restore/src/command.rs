use crate::error::RestoreError;
use crate::face::Face;
use crate::restore::SolvedPose;

/// Command prefix; `overworld?` is kept verbatim.
const TELEPORT_PREFIX: &str = "/execute in overworld? run tp @s";

/// Target coordinates of the teleport: `anchor + 0.5 + 0.5 · normal + position`.
///
/// `anchor` is the integer block the rectangle was pictured on and `position` the
/// face-framed camera position.
pub fn teleport_target(anchor: &[f64; 3], face: Face, position: &[f64; 3]) -> [f64; 3] {
    let normal = face.normal();
    std::array::from_fn(|i| anchor[i] + 0.5 + 0.5 * normal[i] + position[i])
}

/// Format the teleport command for a target position and heading.
///
/// Numbers use their shortest round-trip decimal form.
pub fn format_teleport(target: &[f64; 3], yaw: f64, pitch: f64) -> String {
    format!(
        "{TELEPORT_PREFIX} {} {} {} {} {}",
        target[0], target[1], target[2], yaw, pitch
    )
}

/// Teleport command that puts the player where the solved camera was.
///
/// Fails when the roll of the solved pose is over the tolerance, since the command can
/// only set yaw and pitch.
pub fn teleport_command(solved: &SolvedPose, anchor: &[f64; 3]) -> Result<String, RestoreError> {
    solved.check_roll()?;
    let target = teleport_target(anchor, solved.face, &solved.pose.position());
    Ok(format_teleport(
        &target,
        solved.heading.yaw,
        solved.heading.pitch,
    ))
}
