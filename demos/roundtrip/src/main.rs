use argh::FromArgs;

use rectpose::pose::{project_points, solve_pose, HalfExtents, Point2, Pose, PoseMethod};

#[derive(FromArgs)]
/// Project a rectangle with a known camera and solve the camera back
struct Args {
    /// camera yaw in degrees
    #[argh(option, default = "290.0")]
    yaw: f64,

    /// camera pitch in degrees
    #[argh(option, default = "-30.0")]
    pitch: f64,

    /// camera roll in degrees
    #[argh(option, default = "40.0")]
    roll: f64,

    /// camera x position
    #[argh(option, default = "0.0")]
    x: f64,

    /// camera y position
    #[argh(option, default = "0.0")]
    y: f64,

    /// camera z position
    #[argh(option, default = "-1.0")]
    z: f64,

    /// rectangle half width
    #[argh(option, default = "2.0")]
    a: f64,

    /// rectangle half height
    #[argh(option, default = "1.0")]
    b: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let extents = HalfExtents::new(args.a, args.b);
    let truth = Pose::from_euler([args.x, args.y, args.z], args.yaw, args.pitch, args.roll);
    log::info!("ground truth: {truth:?}");

    let projected = project_points(&extents.corners(), &truth);
    let picks: [Point2; 4] = [projected[0], projected[1], projected[2], projected[3]];
    for (i, p) in picks.iter().enumerate() {
        println!("P{}: ({:.6}, {:.6})", i + 1, p.x, p.y);
    }

    for method in [PoseMethod::Rectangle, PoseMethod::NinePoint] {
        match solve_pose(&picks, &extents, method) {
            Ok(restored) => {
                let d = truth.distances(&restored);
                let angles = restored.angles();
                println!(
                    "{method:?}: yaw {:.4} pitch {:.4} roll {:.4}",
                    angles.yaw, angles.pitch, angles.roll
                );
                println!(
                    "{method:?}: |dC| = {:e}, |dR| = {:e}, |dAngles| = {:e}",
                    d.position, d.rotation, d.angles
                );
            }
            Err(e) => println!("{method:?}: {e}"),
        }
    }

    Ok(())
}
