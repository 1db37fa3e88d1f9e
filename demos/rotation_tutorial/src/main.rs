use argh::FromArgs;
use nalgebra::Vector3;

use kornia_rotation::{
    Active, AngularVelocity, AxisAngle, Euler, EulerConvention, EulerRate, EulerSequence,
    Extrinsic, Hamilton, Intrinsic, Jpl, Passive, Quaternion, RotationError, RotationMatrix,
    SequenceKind, XYX, XYZ, XZX, XZY, YXY, YXZ, YZX, YZY, ZXY, ZXZ, ZYX, ZYZ,
};

#[derive(FromArgs)]
/// Convert an Euler triple through every rotation representation
struct Args {
    /// the Euler sequence, e.g. ZYX or ZXZ
    #[argh(option, short = 's', default = "String::from(\"ZYX\")")]
    sequence: String,

    /// the three angles in radians, comma separated
    #[argh(option, short = 'a', default = "String::from(\"0.1,0.2,0.3\")")]
    angles: String,

    /// intrinsic or extrinsic
    #[argh(option, short = 'c', default = "String::from(\"intrinsic\")")]
    convention: String,

    /// number of interpolation steps
    #[argh(option, short = 'n', default = "4")]
    steps: usize,
}

fn parse_angles(text: &str) -> Result<Vector3<f64>, Box<dyn std::error::Error>> {
    let values = text
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;

    match values.as_slice() {
        [a, b, c] => Ok(Vector3::new(*a, *b, *c)),
        _ => Err(format!("expected three angles, got {}", values.len()).into()),
    }
}

fn run<E: EulerConvention, S: EulerSequence>(angles: Vector3<f64>, steps: usize) {
    let euler = Euler::<E, S, f64>::from_angles(angles);
    log::info!("{} {} angles: {:?}", E::NAME, S::KIND, euler.angles());

    let active = RotationMatrix::<Active, f64>::from(euler);
    let passive = RotationMatrix::<Passive, f64>::from(euler);
    let hamilton = Quaternion::<Hamilton, f64>::from(euler);
    let jpl = Quaternion::<Jpl, f64>::from(euler);
    let axis_angle = AxisAngle::from(euler);

    // the active forms rotate vectors, the passive forms re-express them in the rotated frame
    let v = Vector3::new(1.0, 2.0, 3.0);
    log::info!("active matrix:       {:?}", active * v);
    log::info!("hamilton quaternion: {:?}", hamilton * v);
    let from_axis_angle = RotationMatrix::<Active, f64>::from(axis_angle);
    log::info!("axis angle:          {:?}", from_axis_angle * v);
    log::info!("passive matrix:      {:?}", passive * v);
    log::info!("jpl quaternion:      {:?}", jpl * v);
    log::info!(
        "axis {:?}, angle {:.6} rad",
        axis_angle.axis(),
        axis_angle.angle()
    );

    let recovered = Euler::<E, S, f64>::from(passive);
    log::info!(
        "recovered angles: {:?} (gimbal locked: {})",
        recovered.angles(),
        recovered.is_gimbal_locked()
    );

    let start = Quaternion::<Hamilton, f64>::identity();
    let start_matrix = RotationMatrix::<Active, f64>::identity();
    for i in 0..=steps {
        let t = i as f64 / steps.max(1) as f64;
        let q = start.slerp(&hamilton, t);
        let m = start_matrix.interpolate(&active, t);
        log::info!(
            "t = {t:.3}: slerp angle {:.6}, matrix angle {:.6}",
            AxisAngle::from(q).angle(),
            m.angle()
        );
    }

    let omega = AngularVelocity::new(Vector3::new(0.1, -0.2, 0.3));
    let rate = EulerRate::<E, S, f64>::from_angular_velocity(&active, &omega);
    let back = AngularVelocity::from_euler_rate(&Euler::from(active), &rate);
    log::info!("euler rate for {:?}: {:?}", omega.vector(), rate.rates());
    log::info!("angular velocity from that rate: {:?}", back.vector());
}

fn run_sequence<E: EulerConvention>(kind: SequenceKind, angles: Vector3<f64>, steps: usize) {
    match kind {
        SequenceKind::XYZ => run::<E, XYZ>(angles, steps),
        SequenceKind::XZY => run::<E, XZY>(angles, steps),
        SequenceKind::YXZ => run::<E, YXZ>(angles, steps),
        SequenceKind::YZX => run::<E, YZX>(angles, steps),
        SequenceKind::ZXY => run::<E, ZXY>(angles, steps),
        SequenceKind::ZYX => run::<E, ZYX>(angles, steps),
        SequenceKind::XYX => run::<E, XYX>(angles, steps),
        SequenceKind::XZX => run::<E, XZX>(angles, steps),
        SequenceKind::YXY => run::<E, YXY>(angles, steps),
        SequenceKind::YZY => run::<E, YZY>(angles, steps),
        SequenceKind::ZXZ => run::<E, ZXZ>(angles, steps),
        SequenceKind::ZYZ => run::<E, ZYZ>(angles, steps),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let kind: SequenceKind = args.sequence.parse()?;
    let angles = parse_angles(&args.angles)?;

    match args.convention.to_lowercase().as_str() {
        "intrinsic" => run_sequence::<Intrinsic>(kind, angles, args.steps),
        "extrinsic" => run_sequence::<Extrinsic>(kind, angles, args.steps),
        other => return Err(RotationError::InvalidConvention(other.to_string()).into()),
    }

    Ok(())
}
