//! Background grid behind the polygon (XY plane, slightly behind z = 0)

use glam::Vec3;

use super::Polyline;
use super::gradient::palette;

pub const GRID_SIZE: f32 = 10.0;
pub const GRID_DIVISIONS: u32 = 20;
pub const GRID_DEPTH: f32 = -0.1;
const GRID_OPACITY: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub lines: Vec<Polyline>,
}

impl Grid {
    pub fn new(size: f32, divisions: u32) -> Self {
        let half = size / 2.0;
        let step = size / divisions as f32;
        let center = divisions / 2;

        let mut lines = Vec::with_capacity((divisions as usize + 1) * 2);
        for i in 0..=divisions {
            let k = -half + i as f32 * step;
            let color = if i == center {
                palette::GRID_CENTER
            } else {
                palette::GRID_LINE
            };
            lines.push(Polyline::solid(
                vec![Vec3::new(-half, k, GRID_DEPTH), Vec3::new(half, k, GRID_DEPTH)],
                color,
                GRID_OPACITY,
            ));
            lines.push(Polyline::solid(
                vec![Vec3::new(k, -half, GRID_DEPTH), Vec3::new(k, half, GRID_DEPTH)],
                color,
                GRID_OPACITY,
            ));
        }

        Self { lines }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_SIZE, GRID_DIVISIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_line_count_and_center_cross() {
        let grid = Grid::default();
        assert_eq!(grid.lines.len(), 42);

        let center: Vec<_> = grid
            .lines
            .iter()
            .filter(|l| l.colors[0] == palette::GRID_CENTER)
            .collect();
        assert_eq!(center.len(), 2);
        // The center cross passes through the origin
        for line in center {
            let mid = (line.points[0] + line.points[1]) / 2.0;
            assert!(mid.truncate().length() < 1e-5);
        }
    }
}
