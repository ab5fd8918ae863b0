//! Custom mouse-sensitive areas, in sprite-local space.

use stagehand_graphics::{Point, Rect};

/// Overrides the sprite's natural size rect for precise hit testing.
#[derive(Clone, Debug, PartialEq)]
pub enum HitArea {
    Rect(Rect),
    Circle { center: Point, radius: f32 },
    Polygon(Vec<Point>),
}

impl HitArea {
    /// Circle approximation as a fan of `sections` vertices, for callers
    /// that want to treat every custom area uniformly as a polygon.
    pub fn round_polygon(center: Point, radius: f32, sections: u32) -> HitArea {
        let sections = sections.max(3);
        let step = std::f32::consts::TAU / sections as f32;
        let points = (0..sections)
            .map(|i| {
                let angle = step * i as f32;
                Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                )
            })
            .collect();
        HitArea::Polygon(points)
    }

    pub fn contains(&self, point: Point) -> bool {
        match self {
            HitArea::Rect(rect) => rect.contains(point),
            HitArea::Circle { center, radius } => {
                let d = point - *center;
                d.x * d.x + d.y * d.y <= radius * radius
            }
            HitArea::Polygon(points) => polygon_contains(points, point),
        }
    }

    /// Axis-aligned bounds, for the coarse hit-test stage.
    pub fn bounds(&self) -> Rect {
        match self {
            HitArea::Rect(rect) => *rect,
            HitArea::Circle { center, radius } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
            HitArea::Polygon(points) => {
                let mut iter = points.iter();
                let Some(first) = iter.next() else {
                    return Rect::new(0.0, 0.0, 0.0, 0.0);
                };
                let mut rect = Rect::from_origin_size(*first, stagehand_graphics::Size::ZERO);
                for point in iter {
                    rect = rect.union(&Rect::from_origin_size(
                        *point,
                        stagehand_graphics::Size::ZERO,
                    ));
                }
                rect
            }
        }
    }
}

/// Even-odd crossing test. Degenerate polygons (fewer than 3 vertices)
/// contain nothing.
fn polygon_contains(points: &[Point], point: Point) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = pi.x + (point.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
