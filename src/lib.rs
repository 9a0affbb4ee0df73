//! Arc-length-parameterized trajectory interpolation for motion planning.
//!
//! A trajectory is built from a discrete point sequence and queried as a
//! continuous curve over cumulative arc length. Three layers compose:
//! positions ([`PointTrajectory`]), positions with orientation
//! ([`PoseTrajectory`]), and full path samples carrying kinematic channels
//! ([`PathPointTrajectory`]). Every layer shares one ordered basis set and
//! an active window that [`crop`](PointTrajectory::crop) narrows without
//! discarding data.
//!
//! ```
//! use arctraj::{Point, PointTrajectory};
//!
//! let points: Vec<Point> = (0..5).map(|i| Point::new(i as f64, 0.0, 0.0)).collect();
//! let trajectory = PointTrajectory::builder().build(&points)?;
//!
//! assert!((trajectory.length() - 4.0).abs() < 1e-9);
//! let p = trajectory.compute(2.5);
//! assert!((p.x - 2.5).abs() < 1e-9);
//! # Ok::<(), arctraj::TrajectoryError>(())
//! ```

mod crossing;
pub mod error;
mod interpolated_array;
pub mod interpolator;
mod trajectory;
mod types;

pub use error::{InterpolationError, TrajectoryError};
pub use interpolated_array::InterpolatedArray;
pub use interpolator::{Interpolator, InterpolatorKind, Slerp};
pub use trajectory::{
    ChannelMut, PathPointTrajectory, PathPointTrajectoryBuilder, PointTrajectory,
    PointTrajectoryBuilder, PoseTrajectory, PoseTrajectoryBuilder, RangeMut,
};
pub use types::{PathPoint, Point, Pose};
