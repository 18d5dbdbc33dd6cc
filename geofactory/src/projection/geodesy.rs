use std::sync::Arc;

use geodesy::prelude::*;
use parking_lot::Mutex;

use super::mercator::MAX_LATITUDE;
use super::{ProjectedWindow, Projector};
use crate::factory::{Factory, FactoryOptions, Namespace};
use crate::geometry::Point2d;
use crate::rect::Rect;

/// Number of grid steps along each axis of the geographic domain used to estimate the projection
/// limits.
const GRID_SAMPLES: usize = 72;

/// Projection defined by a `geodesy` operator, e.g. `"utm zone=32"`.
pub struct GeodesyProjector {
    context: Mutex<Minimal>,
    op: OpHandle,
    projection_factory: Arc<Factory>,
}

impl GeodesyProjector {
    /// Creates a projector from an operator definition. Returns `None` if the definition cannot be
    /// parsed.
    pub fn new(definition: &str, options: &FactoryOptions) -> Option<Self> {
        let mut context = Minimal::new();
        let op = context.op(definition).ok()?;

        let projection_options = FactoryOptions {
            srid: None,
            lenient_assertions: options.lenient_assertions,
            proj_definition: None,
        };

        Some(Self {
            context: Mutex::new(context),
            op,
            projection_factory: Factory::new(Namespace::Cartesian, projection_options),
        })
    }

    fn apply(&self, coord: Coor2D, direction: Direction) -> Option<Coor2D> {
        let mut data = [coord];
        self.context.lock().apply(self.op, direction, &mut data).ok()?;

        let [x, y] = data[0].0;
        if x.is_finite() && y.is_finite() {
            Some(data[0])
        } else {
            None
        }
    }
}

impl Projector for GeodesyProjector {
    fn projection_factory(&self) -> &Arc<Factory> {
        &self.projection_factory
    }

    fn project_coord(&self, coord: Point2d) -> Option<Point2d> {
        let projected = self.apply(Coor2D::geo(coord.y, coord.x), Fwd)?;
        Some(Point2d::new(projected.0[0], projected.0[1]))
    }

    fn unproject_coord(&self, coord: Point2d) -> Option<Point2d> {
        let unprojected = self.apply(Coor2D([coord.x, coord.y]), Inv)?;
        Some(Point2d::new(
            unprojected.0[0].to_degrees(),
            unprojected.0[1].to_degrees(),
        ))
    }

    fn wraps(&self) -> bool {
        false
    }

    fn limits_window(&self) -> Option<ProjectedWindow> {
        let projected: Vec<Point2d> = sample_grid()
            .filter_map(|coord| self.project_coord(coord))
            .collect();
        let rect = Rect::from_points(projected.iter())?;

        Some(ProjectedWindow::new(&self.projection_factory, rect))
    }
}

/// Nodes of a regular grid over the whole geographic domain, borders included.
fn sample_grid() -> impl Iterator<Item = Point2d> {
    let step = |min: f64, max: f64, i: usize| min + (max - min) * i as f64 / GRID_SAMPLES as f64;
    (0..=GRID_SAMPLES).flat_map(move |i| {
        let lon = step(-180.0, 180.0, i);
        (0..=GRID_SAMPLES)
            .map(move |j| Point2d::new(lon, step(-MAX_LATITUDE, MAX_LATITUDE, j)))
    })
}
