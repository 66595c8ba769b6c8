//! Model placements for the supershape city
//!
//! Buildings are laid out once on a square grid from their own random stream,
//! so the layout does not depend on how many colors the generators drew.
//! Ships are recomputed every frame from the clock.

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vectorfields_core::RandomStream;

use crate::supershape::SuperShapeParams;

/// One shape instance and its model transform
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Index into the shape catalog
    pub shape: usize,
    pub model: Mat4,
}

/// Layout parameters for buildings and ships
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Seed of the layout stream
    pub seed: u32,
    /// Grid cells on each side of the origin (inclusive)
    pub grid_half_extent: i32,
    /// World units between neighbouring buildings
    pub spacing: f32,
    /// Ticks for a ship to travel one slot
    pub ship_period: i64,
    /// Ships on each side of the origin, per lane
    pub ship_half_count: i32,
    /// Cross-axis coordinate of both ship lanes
    pub ship_lane: f32,
    /// Flight altitude
    pub ship_altitude: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            seed: 9,
            grid_half_extent: 5,
            spacing: 9.0,
            ship_period: 4500,
            ship_half_count: 2,
            ship_lane: -4.0,
            ship_altitude: 1.0,
        }
    }
}

fn model_matrix(translation: Vec3, angle_degrees: f32, scale: f32) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(scale),
        Quat::from_rotation_z(angle_degrees.to_radians()),
        translation,
    )
}

/// Lay out the building grid.
///
/// Each cell draws its shape index, then (except the empty center cell) a
/// rotation in whole degrees about +Z. Returns nothing for an empty catalog.
pub fn building_placements(config: &PlacementConfig, shapes: &[SuperShapeParams]) -> Vec<Placement> {
    if shapes.is_empty() {
        return Vec::new();
    }

    let mut random = RandomStream::new(config.seed);
    let extent = config.grid_half_extent;
    let mut placements = Vec::new();

    for y in -extent..=extent {
        for x in -extent..=extent {
            let shape = random.next_u32() as usize % shapes.len();
            if x == 0 && y == 0 {
                continue;
            }
            let angle = (random.next_u32() % 360) as f32;
            let translation = Vec3::new(x as f32 * config.spacing, y as f32 * config.spacing, 0.0);
            placements.push(Placement {
                shape,
                model: model_matrix(translation, angle, shapes[shape].scale),
            });
        }
    }

    debug!("Placed {} buildings from seed {}", placements.len(), config.seed);
    placements
}

/// Ships flying along the two lanes at `tick`, all using the last catalog shape.
pub fn ship_placements(config: &PlacementConfig, tick: i64, shapes: &[SuperShapeParams]) -> Vec<Placement> {
    let Some((ship, params)) = shapes.iter().enumerate().last() else {
        return Vec::new();
    };
    let period = config.ship_period.max(1);
    let phase = tick.rem_euclid(period);

    (-config.ship_half_count..=config.ship_half_count)
        .flat_map(|x| {
            let offset = (i64::from(x) * period + phase) as f32 * 0.01;
            [
                Placement {
                    shape: ship,
                    model: model_matrix(
                        Vec3::new(offset, config.ship_lane, config.ship_altitude),
                        0.0,
                        params.scale,
                    ),
                },
                Placement {
                    shape: ship,
                    model: model_matrix(
                        Vec3::new(config.ship_lane, offset, config.ship_altitude),
                        90.0,
                        params.scale,
                    ),
                },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::supershape::SUPERSHAPES;

    #[test]
    fn test_grid_skips_center() {
        let placements = building_placements(&PlacementConfig::default(), &SUPERSHAPES);
        assert_eq!(placements.len(), 11 * 11 - 1);
        for placement in &placements {
            let origin = placement.model.w_axis.truncate();
            assert!(origin.length() > 1.0);
            assert_eq!(origin.z, 0.0);
            assert!(placement.shape < SUPERSHAPES.len());
        }
    }

    #[test]
    fn test_first_cell_follows_stream() {
        let config = PlacementConfig::default();
        let placements = building_placements(&config, &SUPERSHAPES);

        let mut random = RandomStream::new(9);
        let shape = random.next_u32() as usize % SUPERSHAPES.len();
        let angle = (random.next_u32() % 360) as f32;
        let expected = model_matrix(Vec3::new(-45.0, -45.0, 0.0), angle, SUPERSHAPES[shape].scale);

        assert_eq!(placements[0].shape, shape);
        assert!(placements[0].model.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let config = PlacementConfig::default();
        assert_eq!(
            building_placements(&config, &SUPERSHAPES),
            building_placements(&config, &SUPERSHAPES)
        );
    }

    #[test]
    fn test_empty_catalog_places_nothing() {
        let config = PlacementConfig::default();
        assert!(building_placements(&config, &[]).is_empty());
        assert!(ship_placements(&config, 100, &[]).is_empty());
    }

    #[test]
    fn test_ships_move_with_tick() {
        let config = PlacementConfig::default();
        let ships = ship_placements(&config, 1000, &SUPERSHAPES);
        assert_eq!(ships.len(), 10);
        assert!(ships.iter().all(|s| s.shape == SUPERSHAPES.len() - 1));

        // x = 0 pair: offset (0 * 4500 + 1000) * 0.01 = 10
        let along_x = ships[4].model.w_axis.truncate();
        let along_y = ships[5].model.w_axis.truncate();
        assert!(along_x.abs_diff_eq(Vec3::new(10.0, -4.0, 1.0), 1e-5));
        assert!(along_y.abs_diff_eq(Vec3::new(-4.0, 10.0, 1.0), 1e-5));

        // The phase wraps every period.
        let later = ship_placements(&config, 1000 + 4500, &SUPERSHAPES);
        assert!(later[4].model.abs_diff_eq(ships[4].model, 1e-5));
    }

    #[test]
    fn test_cross_lane_ship_is_turned() {
        let ships = ship_placements(&PlacementConfig::default(), 0, &SUPERSHAPES);
        let heading = ships[1].model.transform_vector3(Vec3::X).normalize();
        assert!(heading.abs_diff_eq(Vec3::Y, 1e-5));
    }
}
