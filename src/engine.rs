use std::time::Instant;

use anyhow::{Context, anyhow};
use egui_sfml::SfEgui;
use egui_sfml::egui;
use sfml::{graphics::*, system::*, window::*};
use tracing::{info, trace};

use crate::audio::SfmlAudio;
use crate::config::Config;
use crate::game::Game;
use crate::input::Key;
use crate::renderer::{SKY, SceneRenderer};
use crate::snapshot::RenderFrame;
use crate::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};

pub fn run(config: &Config) -> anyhow::Result<()> {
    let level = config.level().context("failed to load level")?;
    let audio = SfmlAudio::load(&config.assets);
    let mut game = Game::new(level, audio);

    let mut window = RenderWindow::new(
        (WINDOW_WIDTH, WINDOW_HEIGHT),
        WINDOW_TITLE,
        Style::CLOSE,
        &ContextSettings::default(),
    )
    .context("failed to open window")?;

    // holding a key must not turn into repeated presses
    window.set_key_repeat_enabled(false);
    window.set_framerate_limit(config.fps);

    let mut sfegui = SfEgui::new(&window);
    let renderer = SceneRenderer::new().context("failed to build coin texture")?;
    let mut clock = Clock::start().context("failed to start clock")?;

    let show_info = config.show_info;

    info!(level = %game.level().name, fps = config.fps, "window open");

    while window.is_open() {
        let dt = clock.restart();
        while let Some(event) = window.poll_event() {
            sfegui.add_event(&event);
            match event {
                Event::Closed => window.close(),

                Event::KeyPressed { code, .. } => match Key::from_sfml(code) {
                    Some(key) => {
                        game.key_pressed(key);
                    }
                    None => trace!(?code, "unbound key"),
                },

                Event::KeyReleased { code, .. } => {
                    if let Some(key) = Key::from_sfml(code) {
                        game.key_released(key);
                    }
                }

                _ => {}
            }
        }

        let timer = Instant::now();
        game.update();
        let update_time = timer.elapsed().as_nanos() as f64 / 1e6;

        let frame = game.session().snapshot();

        window.clear(SKY);

        let timer = Instant::now();
        renderer.draw(&mut window, &frame);
        let draw_time = timer.elapsed().as_nanos() as f64 / 1e6;

        let timings = Timings {
            fps: 1.0 / dt.as_seconds().max(f32::EPSILON),
            update_ms: update_time,
            draw_ms: draw_time,
        };

        let di = sfegui
            .run(&mut window, |_rw, ctx| {
                hud(ctx, &frame);
                if show_info {
                    info_panel(ctx, &frame, &timings);
                }
            })
            .map_err(|_| anyhow!("egui pass failed"))?;

        sfegui.draw(di, &mut window, None);

        window.display();
    }

    info!(score = game.session().score(), "window closed");

    Ok(())
}

fn hud(ctx: &egui::Context, frame: &RenderFrame) {
    egui::Area::new(egui::Id::new("hud"))
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(frame.title)
                        .size(24.0)
                        .color(egui::Color32::WHITE),
                );
                ui.label(
                    egui::RichText::new(&frame.score_text)
                        .size(12.0)
                        .color(egui::Color32::WHITE),
                );
            });
        });
}

struct Timings {
    fps: f32,
    update_ms: f64,
    draw_ms: f64,
}

fn info_panel(ctx: &egui::Context, frame: &RenderFrame, timings: &Timings) {
    egui::Window::new("Info")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            egui::Grid::new("info").num_columns(2).show(ui, |ui| {
                ui.label("FPS");
                ui.label(format!("{:.0}", timings.fps));
                ui.end_row();

                ui.label("Tick");
                ui.label(format!("{} ({:.2}ms)", frame.tick, timings.update_ms));
                ui.end_row();

                ui.label("Draw");
                ui.label(format!("{:.2}ms", timings.draw_ms));
                ui.end_row();

                ui.label("Coins left");
                ui.label(frame.coins_remaining.to_string());
                ui.end_row();
            });
        });
}
