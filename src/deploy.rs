//! Brick deployment
//!
//! Turns page-space element rectangles into field-local bricks and paints
//! each one as it appears.

use crate::renderer::{Color, Surface};
use crate::sim::{Brick, Field, Rect};

/// Translate a page-space rect into a brick in `field`'s coordinates
pub fn brick_from_rect(field: &Field, rect: &Rect) -> Brick {
    Brick::new(rect.translated(field.offset()))
}

/// Create one intact brick per target rect, painting each in input order.
///
/// An empty slice is valid and yields an empty brick set.
pub fn deploy_bricks(
    field: &Field,
    targets: &[Rect],
    surface: &mut dyn Surface,
    color: Color,
) -> Vec<Brick> {
    targets
        .iter()
        .map(|rect| {
            let brick = brick_from_rect(field, rect);
            surface.fill_rect(brick.rect(), color);
            brick
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use crate::sim::BrickStatus;

    fn field() -> Field {
        Field {
            width: 480,
            height: 420,
            top_offset: 100.0,
            left_offset: 20.0,
        }
    }

    #[test]
    fn test_deploy_translates_and_paints_in_order() {
        let targets = [
            Rect::new(40.0, 150.0, 120.0, 24.0),
            Rect::new(200.0, 110.0, 60.0, 18.0),
        ];
        let mut surface = RecordingSurface::new();
        let bricks = deploy_bricks(&field(), &targets, &mut surface, Color::SIENNA);

        assert_eq!(bricks.len(), 2);
        assert_eq!(bricks[0].rect(), Rect::new(20.0, 50.0, 120.0, 24.0));
        assert_eq!(bricks[1].rect(), Rect::new(180.0, 10.0, 60.0, 18.0));
        assert!(bricks.iter().all(|b| b.status() == BrickStatus::Intact));

        assert_eq!(
            surface.commands,
            vec![
                DrawCommand::Rect {
                    rect: bricks[0].rect(),
                    color: Color::SIENNA
                },
                DrawCommand::Rect {
                    rect: bricks[1].rect(),
                    color: Color::SIENNA
                },
            ]
        );
    }

    #[test]
    fn test_deploy_empty() {
        let mut surface = RecordingSurface::new();
        let bricks = deploy_bricks(&field(), &[], &mut surface, Color::SIENNA);
        assert!(bricks.is_empty());
        assert!(surface.commands.is_empty());
    }
}
