//! City generation - a grid of building/sidewalk pairs around an open plaza

use hypocity_logic::config::GameConfig;
use hypocity_logic::constants::city::BUILDING_COLORS;
use hypocity_logic::geometry::{Block, BlockKind, CityLayout};
use rand::Rng;

/// Lay out the city.
///
/// Cells start `grid_margin` in from the west/north edges and step by
/// `block_size + street_width` until `grid_margin` short of the far edges.
/// A cell whose origin falls inside the plaza (|x| and |z| both below
/// `plaza_half_extent`) stays empty. Every other cell gets one building,
/// inset by `building_inset`, and one sidewalk covering the full block
/// footprint at the same center.
pub fn generate_city(config: &GameConfig, rng: &mut impl Rng) -> CityLayout {
    let half = config.half_city();
    let stride = config.block_size + config.street_width;
    let building_size = config.block_size - config.building_inset;

    let mut blocks = Vec::new();
    let mut x = -half + config.grid_margin;
    while x < half - config.grid_margin {
        let mut z = -half + config.grid_margin;
        while z < half - config.grid_margin {
            if x.abs() < config.plaza_half_extent && z.abs() < config.plaza_half_extent {
                z += stride;
                continue;
            }

            let cx = x + building_size / 2.0;
            let cz = z + building_size / 2.0;
            let height = rng.gen_range(config.building_min_height..config.building_max_height);
            let color = BUILDING_COLORS[rng.gen_range(0..BUILDING_COLORS.len())];

            blocks.push(Block {
                kind: BlockKind::Building,
                x: cx,
                z: cz,
                width: building_size,
                depth: building_size,
                height,
                color: Some(color.to_string()),
            });
            blocks.push(Block {
                kind: BlockKind::Sidewalk,
                x: cx,
                z: cz,
                width: config.block_size,
                depth: config.block_size,
                height: config.sidewalk_height,
                color: None,
            });

            z += stride;
        }
        x += stride;
    }

    log::info!(
        "Generated city: {} buildings on a {}x{} grid",
        blocks.len() / 2,
        config.city_size,
        config.city_size
    );

    CityLayout::new(blocks)
}
