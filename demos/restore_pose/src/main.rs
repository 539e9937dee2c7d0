use argh::FromArgs;
use serde::Deserialize;
use std::path::PathBuf;

use rectpose::pose::PoseMethod;
use rectpose::restore::{self as rr, Face, Restoration, RestoreParams, RestoreRequest};

#[derive(FromArgs)]
/// Restore the camera pose of a screenshot from four picked corners
struct Args {
    /// path to the scene json file
    #[argh(option)]
    scene: PathBuf,

    /// block the rectangle was pictured on, as `x,y,z`
    #[argh(option, from_str_fn(parse_block))]
    block: Option<[f64; 3]>,

    /// face of the block, one of -x, +x, -y, +y, -z, +z
    #[argh(option)]
    face: Option<Face>,

    /// solver to use: rectangle or nine_point
    #[argh(option, from_str_fn(parse_method))]
    method: Option<PoseMethod>,

    /// print the overlay geometry as json
    #[argh(switch)]
    overlay: bool,
}

/// Request plus the optional pipeline parameters and anchor block.
#[derive(Deserialize)]
struct Scene {
    #[serde(flatten)]
    request: RestoreRequest,
    #[serde(default)]
    params: RestoreParams,
    #[serde(default)]
    block: [f64; 3],
}

fn parse_block(value: &str) -> Result<[f64; 3], String> {
    let coords = value
        .split(',')
        .map(|s| s.trim().parse::<f64>().map_err(|e| format!("{s}: {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match coords.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(format!("expected x,y,z, got {value}")),
    }
}

fn parse_method(value: &str) -> Result<PoseMethod, String> {
    match value {
        "rectangle" => Ok(PoseMethod::Rectangle),
        "nine_point" => Ok(PoseMethod::NinePoint),
        _ => Err(format!("unknown method {value}")),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let text = std::fs::read_to_string(&args.scene)?;
    let mut scene: Scene = serde_json::from_str(&text)?;
    if let Some(face) = args.face {
        scene.request.face = face;
    }
    if let Some(method) = args.method {
        scene.params.method = method;
    }
    let block = args.block.unwrap_or(scene.block);
    log::info!(
        "restoring {} on face {} with {:?}",
        args.scene.display(),
        scene.request.face,
        scene.params.method
    );

    let restoration = rr::restore(&scene.request, &scene.params);
    match &restoration {
        Restoration::Invalid(reason) => println!("Invalid picks: {reason}"),
        Restoration::NoSolution { reason, .. } => println!("No solution: {reason}"),
        Restoration::Solved(solved) => {
            let c = solved.pose.position();
            println!("Position: ({:.4}, {:.4}, {:.4})", c[0], c[1], c[2]);
            println!(
                "Yaw: {:.4} Pitch: {:.4} Roll: {:.4}",
                solved.heading.yaw, solved.heading.pitch, solved.heading.roll
            );
            if solved.reprojection_error_px > scene.params.max_reprojection_error_px {
                println!("Bad reprojection: {} px", solved.reprojection_error_px);
            } else {
                println!("Reprojection: {:e} px", solved.reprojection_error_px);
            }
            match rr::teleport_command(solved, &block) {
                Ok(command) => println!("{command}"),
                Err(e) => println!("{e}"),
            }
        }
    }

    if args.overlay {
        let overlay = rr::overlay(&scene.request, &restoration);
        println!("{}", serde_json::to_string_pretty(&overlay)?);
    }

    Ok(())
}
