//! Draws a [`RenderFrame`] with SFML.

use glam::DVec2;
use sfml::SfResult;
use sfml::cpp::FBox;
use sfml::graphics::*;

use crate::components::SpriteKind;
use crate::snapshot::{RenderFrame, world_to_screen};

pub const SKY: Color = Color::rgb(100, 149, 237);

const COIN_TEXTURE_RADIUS: u32 = 64;

/// Pre-renders a filled circle so coins are a single textured quad.
pub fn circle(radius: u32, color: Color) -> SfResult<FBox<Image>> {
    let mut render_target = RenderTexture::new(radius * 2, radius * 2)?;

    render_target.clear(Color::TRANSPARENT);

    let mut circle = CircleShape::new(radius as _, 200);
    circle.set_fill_color(color);
    circle.set_position((0., 0.));

    render_target.set_smooth(true);
    render_target.draw(&circle);
    render_target.display();

    render_target.texture().copy_to_image()
}

fn color_of(kind: SpriteKind) -> Color {
    match kind {
        SpriteKind::Player => Color::rgb(214, 92, 72),
        SpriteKind::Grass => Color::rgb(86, 170, 64),
        SpriteKind::Crate => Color::rgb(160, 110, 60),
        SpriteKind::Coin => Color::rgb(250, 205, 40),
        // spread tile ids over a few earthy shades
        SpriteKind::Tile(gid) => {
            let shade = (gid.wrapping_mul(37) % 64) as u8;
            Color::rgb(90 + shade, 120 + shade / 2, 70)
        }
    }
}

pub struct SceneRenderer {
    coin: FBox<Texture>,
}

impl SceneRenderer {
    pub fn new() -> SfResult<Self> {
        let image = circle(COIN_TEXTURE_RADIUS, Color::WHITE)?;
        let size = COIN_TEXTURE_RADIUS as i32 * 2;
        let mut coin = Texture::from_image(&image, Rect::new(0, 0, size, size))?;
        coin.set_smooth(true);

        Ok(Self { coin })
    }

    pub fn draw(&self, target: &mut RenderWindow, frame: &RenderFrame) {
        let size = target.size();
        let viewport = DVec2::new(size.x as f64, size.y as f64);

        let mut rect = RectangleShape::new();
        let mut coin = Sprite::new();
        coin.set_texture(&self.coin, true);
        coin.set_origin((COIN_TEXTURE_RADIUS as f32, COIN_TEXTURE_RADIUS as f32));
        coin.set_color(color_of(SpriteKind::Coin));

        for sprite in &frame.sprites {
            let DVec2 { x, y } = world_to_screen(sprite.center, frame.camera, viewport);

            match sprite.kind {
                SpriteKind::Coin => {
                    // coins are drawn a bit smaller than their tile
                    let scale = (sprite.size.x * 0.8) as f32 / (COIN_TEXTURE_RADIUS * 2) as f32;
                    coin.set_scale((scale, scale));
                    coin.set_position((x as f32, y as f32));
                    target.draw(&coin);
                }
                kind => {
                    let (w, h) = (sprite.size.x as f32, sprite.size.y as f32);
                    rect.set_size((w, h));
                    rect.set_origin((w / 2.0, h / 2.0));
                    rect.set_position((x as f32, y as f32));
                    rect.set_fill_color(color_of(kind));
                    target.draw(&rect);
                }
            }
        }
    }
}
