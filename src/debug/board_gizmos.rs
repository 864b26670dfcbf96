use bevy::prelude::*;

pub const BOARD_SIZE: i32 = 8;

const SQUARE_SIZE: f32 = 64.0;

/// Draws the 8x8 board grid, centered on the origin. Purely visual; no
/// runtime behavior depends on it.
pub(super) fn draw_board_grid(mut gizmos: Gizmos) {
    let extent = BOARD_SIZE as f32 * SQUARE_SIZE;
    let origin = Vec2::splat(-extent * 0.5);
    let color = Color::srgb(0.2, 0.3, 0.9);
    for i in 0..=BOARD_SIZE {
        let offset = i as f32 * SQUARE_SIZE;
        gizmos.line_2d(
            origin + Vec2::new(offset, 0.0),
            origin + Vec2::new(offset, extent),
            color,
        );
        gizmos.line_2d(
            origin + Vec2::new(0.0, offset),
            origin + Vec2::new(extent, offset),
            color,
        );
    }
}
