//! Interactive galaxy viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the galaxy state
//! (parameters, point cloud, camera, viewport) and implements
//! [`eframe::App`] to draw the cloud and the parameter panel.

use eframe::App;
use galaxy_core::{
    camera::OrbitCamera,
    color::Rgb,
    config::{self, ControlRange},
    galaxy::Galaxy,
    store::ParamStore,
    viewport::Viewport,
};
use glam::Vec2;
use rand::rng;
use std::time::Instant;

/// Scroll distance, in points, that counts as one zoom step.
const SCROLL_POINTS_PER_STEP: f32 = 50.0;

/// Main application state for the galaxy viewer.
///
/// [`Viewer`] glues together:
/// - The galaxy core: [`ParamStore`], [`Galaxy`].
/// - View state: [`OrbitCamera`], [`Viewport`].
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The per-frame update is:
/// 1. [`Viewer::tick`] - rotate the galaxy by elapsed time, advance camera damping.
/// 2. Build the panels; sliders edit the live parameters.
/// 3. [`Viewer::regenerate_if_settled`] - rebuild the cloud once an edit has finished.
/// 4. Request the next frame.
///
/// ### Fields
/// - `store` - Live parameters and change tracking.
/// - `galaxy` - The cloud on screen and its rotation.
/// - `camera` - Orbit camera driven by pointer drags and scrolling.
/// - `viewport` - Size of the central drawing area.
///
/// - `rng` - Random number generator used for each generation.
///
/// - `start_time` - egui time of the first frame.
/// - `elapsed` - Seconds since `start_time`, as of the last tick.
/// - `last_generation_ms` - Wall time of the last generation (for display only).
pub struct Viewer {
    store: ParamStore,
    galaxy: Galaxy,
    camera: OrbitCamera,
    viewport: Viewport,

    rng: rand::rngs::ThreadRng,

    start_time: Option<f64>,
    elapsed: f64,
    last_generation_ms: f64,
}

impl Viewer {
    /// Creates a viewer showing a galaxy generated from default parameters.
    ///
    /// The camera starts at `(3, 3, 3)` looking at the origin.
    ///
    /// ### Returns
    /// A fully-initialized [`Viewer`] ready to be passed to `eframe::run_native`.
    pub fn new() -> Self {
        let mut rng = rng();
        let mut store = ParamStore::default();
        let params = store.settle(false).unwrap_or_default();

        let started = Instant::now();
        let galaxy = Galaxy::new(&params, &mut rng);
        let last_generation_ms = started.elapsed().as_secs_f64() * 1000.0;
        log::info!(
            "initial galaxy: {} stars, {} branches",
            params.count,
            params.branches
        );

        Self {
            store,
            galaxy,
            camera: OrbitCamera::default(),
            viewport: Viewport::default(),
            rng,
            start_time: None,
            elapsed: 0.0,
            last_generation_ms,
        }
    }

    /// Advances the render loop to egui time `now`.
    ///
    /// Sets the galaxy's orientation from the elapsed time and the live
    /// rotation speed, then applies one step of camera damping.
    fn tick(&mut self, now: f64) {
        let start = *self.start_time.get_or_insert(now);
        self.elapsed = (now - start).max(0.0);
        self.galaxy
            .tick(self.elapsed as f32, self.store.params().rotate);
        self.camera.update();
    }

    /// Rebuilds the point cloud if an edit has finished.
    ///
    /// ### Parameters
    /// - `interaction_active` - Whether an edit is still in progress
    ///   (see [`Viewer::edit_in_progress`]).
    ///
    /// ### Returns
    /// `true` if the cloud was regenerated.
    fn regenerate_if_settled(&mut self, interaction_active: bool) -> bool {
        let Some(params) = self.store.settle(interaction_active) else {
            return false;
        };

        let started = Instant::now();
        self.galaxy.regenerate(&params, &mut self.rng);
        self.last_generation_ms = started.elapsed().as_secs_f64() * 1000.0;
        log::debug!(
            "generated {} stars in {:.2} ms",
            self.galaxy.cloud().len(),
            self.last_generation_ms
        );
        true
    }

    /// Tracks the central panel size. Never touches the point cloud.
    fn resize(&mut self, size: egui::Vec2, pixels_per_point: f32) {
        if self.viewport.resize(size.x, size.y, pixels_per_point) {
            log::debug!(
                "viewport resized to {:?} px",
                self.viewport.output_size()
            );
        }
    }

    /// Helper to draw a labeled slider for one parameter.
    fn labeled_slider<T: egui::emath::Numeric>(
        ui: &mut egui::Ui,
        control: &ControlRange<T>,
        value: &mut T,
    ) -> egui::Response {
        ui.horizontal(|ui| {
            ui.label(control.label);
            // Typed values only land once the number field loses focus.
            ui.add(
                egui::Slider::new(value, control.range.clone())
                    .step_by(control.step)
                    .update_while_editing(false),
            )
        })
        .inner
    }

    /// Helper to draw a labeled colour picker button with a hex field.
    ///
    /// The hex field is applied when it loses focus; malformed input is
    /// logged and discarded.
    ///
    /// ### Returns
    /// `true` if `color` was changed this frame.
    fn labeled_color(ui: &mut egui::Ui, label: &str, color: &mut Rgb) -> bool {
        ui.horizontal(|ui| {
            ui.label(label);
            let mut rgb = color.to_array();
            let mut changed = egui::color_picker::color_edit_button_rgb(ui, &mut rgb).changed();
            if changed {
                *color = rgb.into();
            }

            let id = ui.id().with(label);
            let mut hex = ui
                .data_mut(|d| d.get_temp::<String>(id))
                .unwrap_or_else(|| color.to_hex());
            let response = ui.add(
                egui::TextEdit::singleline(&mut hex)
                    .id(id)
                    .desired_width(64.0)
                    .font(egui::TextStyle::Monospace),
            );

            if response.lost_focus() {
                match Rgb::from_hex(&hex) {
                    Ok(parsed) if parsed != *color => {
                        *color = parsed;
                        changed = true;
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("ignoring {label}: {e}"),
                }
            }
            if response.has_focus() {
                ui.data_mut(|d| d.insert_temp(id, hex));
            } else {
                ui.data_mut(|d| d.remove::<String>(id));
            }
            changed
        })
        .inner
    }

    /// Whether the user is still in the middle of an edit.
    ///
    /// An edit is in progress while any pointer button is held (dragging a
    /// slider, the colour picker, or the camera) or while a text field has
    /// keyboard focus (typing a number or a hex colour). Keyboard steps on
    /// a focused slider are discrete edits and do not count.
    fn edit_in_progress(ctx: &egui::Context) -> bool {
        let pointer_held = ctx.input(|i| i.pointer.any_down());
        let typing = ctx
            .memory(|m| m.focused())
            .is_some_and(|id| egui::text_edit::TextEditState::load(ctx, id).is_some());
        pointer_held || typing
    }

    /// End-of-frame step: regenerates once a finished edit is pending.
    ///
    /// ### Returns
    /// `true` if the cloud was regenerated.
    fn finish_frame(&mut self, ctx: &egui::Context) -> bool {
        self.regenerate_if_settled(Self::edit_in_progress(ctx))
    }

    /// Builds the right-hand panel with one control per galaxy parameter.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.heading("Galaxy");
                ui.separator();

                let p = self.store.params_mut();
                let mut changed = false;
                changed |= Self::labeled_slider(ui, &config::COUNT, &mut p.count).changed();
                changed |= Self::labeled_slider(ui, &config::SIZE, &mut p.size).changed();
                changed |= Self::labeled_slider(ui, &config::RADIUS, &mut p.radius).changed();
                changed |= Self::labeled_slider(ui, &config::BRANCHES, &mut p.branches).changed();
                changed |= Self::labeled_slider(ui, &config::SPIN, &mut p.spin).changed();
                changed |=
                    Self::labeled_slider(ui, &config::RANDOMNESS, &mut p.randomness).changed();
                changed |= Self::labeled_color(ui, config::INSIDE_COLOR_LABEL, &mut p.inside_color);
                changed |=
                    Self::labeled_color(ui, config::OUTSIDE_COLOR_LABEL, &mut p.outside_color);
                changed |= Self::labeled_slider(ui, &config::ROTATE, &mut p.rotate).changed();

                if changed {
                    self.store.mark_changed();
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("Regenerate").clicked() {
                        self.store.request_regeneration();
                    }
                    if ui.button("Reset to defaults").clicked() {
                        log::info!("resetting galaxy parameters");
                        self.store.reset();
                    }
                });
            });
    }

    /// Builds the bottom status bar (star count, generation time, rotation).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (w, h) = self.viewport.output_size();
                ui.label(format!("output = {w}x{h}"));
                ui.separator();
                ui.label(format!("rotation = {:.2} rad", self.galaxy.rotation_y()));
                ui.label(format!("t = {:.1} s", self.elapsed));
                ui.separator();
                ui.label(format!("generated in {:.2} ms", self.last_generation_ms));
                ui.label(format!("stars = {}", self.galaxy.cloud().len()));
            });
        });
    }

    /// Builds one mesh holding a small square per visible star.
    ///
    /// Colours are premultiplied with zero alpha, which egui blends
    /// additively; overlapping stars brighten instead of occluding, so no
    /// depth sorting is needed.
    fn star_mesh(&self, rect: egui::Rect) -> egui::Mesh {
        let cloud = self.galaxy.cloud();
        let view_proj = self.camera.view_projection(&self.viewport) * self.galaxy.model_matrix();

        let mut mesh = egui::Mesh::default();
        mesh.reserve_vertices(cloud.len() * 4);
        mesh.reserve_triangles(cloud.len() * 2);

        for (pos, color) in cloud.iter() {
            let Some(p) = self.camera.project(&view_proj, pos, &self.viewport) else {
                continue;
            };
            let d = self
                .camera
                .point_diameter(self.galaxy.size(), p.depth, &self.viewport);
            let center = rect.min + egui::vec2(p.screen.x, p.screen.y);
            mesh.add_colored_rect(
                egui::Rect::from_center_size(center, egui::vec2(d, d)),
                additive(color),
            );
        }
        mesh
    }

    /// Builds the central panel where the galaxy is drawn and orbited.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
                let rect = response.rect;
                self.resize(rect.size(), ctx.pixels_per_point());

                // Orbit with drag.
                if response.dragged() {
                    let delta = response.drag_delta();
                    self.camera
                        .orbit(Vec2::new(delta.x, delta.y), self.viewport.height());
                }

                // Dolly with the scroll wheel.
                if response.hovered() {
                    let scroll = ui.input(|i| i.raw_scroll_delta.y);
                    if scroll != 0.0 {
                        self.camera.zoom(scroll / SCROLL_POINTS_PER_STEP);
                    }
                }

                let painter = ui.painter_at(rect);
                painter.add(egui::Shape::mesh(self.star_mesh(rect)));
            });
    }
}

/// Converts a star colour to an additively blended egui colour.
fn additive(color: Rgb) -> egui::Color32 {
    let [r, g, b] = color.to_bytes();
    egui::Color32::from_rgba_premultiplied(r, g, b, 0)
}

impl App for Viewer {
    /// eframe callback driving one frame of the render loop.
    ///
    /// This method:
    /// - Ticks rotation and camera damping.
    /// - Renders the config panel, status bar, and galaxy view.
    /// - Regenerates the cloud once the user has finished an edit.
    /// - Requests the next frame; the loop never stops.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.tick(now);

        self.ui_config_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);

        self.finish_frame(ctx);

        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_core::config::Params;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    /// Draws one panel row and reports whether it changed the parameters,
    /// plus the rect of the row's widgets.
    type Row = fn(&mut egui::Ui, &mut Params) -> (bool, egui::Rect);

    fn count_row(ui: &mut egui::Ui, p: &mut Params) -> (bool, egui::Rect) {
        let response = Viewer::labeled_slider(ui, &config::COUNT, &mut p.count);
        (response.changed(), response.rect)
    }

    fn inside_color_row(ui: &mut egui::Ui, p: &mut Params) -> (bool, egui::Rect) {
        let row = ui.scope(|ui| {
            Viewer::labeled_color(ui, config::INSIDE_COLOR_LABEL, &mut p.inside_color)
        });
        (row.inner, row.response.rect)
    }

    /// Runs a [`Viewer`] headless with a single panel row, wired to the
    /// store the way `ui_config_panel` wires every control, and records
    /// the star count of each regeneration.
    struct PanelHarness {
        ctx: egui::Context,
        viewer: Viewer,
        row: Row,
        row_rect: egui::Rect,
        regenerated: Vec<usize>,
    }

    impl PanelHarness {
        fn new(row: Row) -> Self {
            let mut harness = Self {
                ctx: egui::Context::default(),
                viewer: Viewer::new(),
                row,
                row_rect: egui::Rect::NOTHING,
                regenerated: Vec::new(),
            };
            // Hit testing uses the previous frame's layout.
            harness.frame(Vec::new());
            harness.frame(Vec::new());
            harness
        }

        fn frame(&mut self, events: Vec<egui::Event>) {
            let input = egui::RawInput {
                screen_rect: Some(test_rect()),
                events,
                ..Default::default()
            };
            let row = self.row;
            let Self {
                ctx,
                viewer,
                row_rect,
                regenerated,
                ..
            } = self;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let (changed, rect) = row(ui, viewer.store.params_mut());
                    if changed {
                        viewer.store.mark_changed();
                    }
                    *row_rect = rect;
                });
                if viewer.finish_frame(ctx) {
                    regenerated.push(viewer.galaxy.cloud().len());
                }
            });
        }

        fn press(&mut self, pos: egui::Pos2) {
            self.frame(vec![
                egui::Event::PointerMoved(pos),
                pointer_button(pos, true),
            ]);
        }

        fn release(&mut self, pos: egui::Pos2) {
            self.frame(vec![pointer_button(pos, false)]);
        }

        fn click(&mut self, pos: egui::Pos2) {
            self.press(pos);
            self.release(pos);
            // Let the widget switch into text editing.
            self.frame(Vec::new());
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.frame(vec![egui::Event::Text(c.to_string())]);
            }
        }

        fn key(&mut self, key: egui::Key, modifiers: egui::Modifiers) {
            self.frame(vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }]);
        }
    }

    fn pointer_button(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn new_viewer_shows_default_galaxy() {
        let viewer = Viewer::new();

        assert_eq!(viewer.galaxy.cloud().len(), Params::default().count);
        assert_eq!(viewer.store.generated(), Some(&Params::default()));
        assert!(!viewer.store.is_pending());
    }

    #[test]
    fn tick_rotates_by_elapsed_time_and_live_speed() {
        let mut viewer = Viewer::new();
        viewer.store.params_mut().rotate = 2.0;

        viewer.tick(10.0);
        assert_eq!(viewer.galaxy.rotation_y(), 0.0);

        viewer.tick(10.5);
        assert_eq!(viewer.elapsed, 0.5);
        assert_eq!(viewer.galaxy.rotation_y(), -1.0);
    }

    #[test]
    fn edits_regenerate_only_after_interaction_ends() {
        let mut viewer = Viewer::new();

        viewer.store.params_mut().count = 500;
        viewer.store.mark_changed();

        assert!(!viewer.regenerate_if_settled(true));
        assert_eq!(viewer.galaxy.cloud().len(), 1000);

        assert!(viewer.regenerate_if_settled(false));
        assert_eq!(viewer.galaxy.cloud().len(), 500);

        // Nothing pending anymore.
        assert!(!viewer.regenerate_if_settled(false));
    }

    #[test]
    fn resize_does_not_touch_point_set() {
        let mut viewer = Viewer::new();
        let before = viewer.galaxy.cloud().clone();

        viewer.resize(egui::vec2(1920.0, 1080.0), 3.0);

        assert_eq!(viewer.viewport.pixel_ratio(), 2.0);
        assert_eq!(viewer.viewport.output_size(), (3840, 2160));
        assert_eq!(viewer.galaxy.cloud(), &before);
    }

    #[test]
    fn star_mesh_has_one_additive_quad_per_visible_star() {
        let mut viewer = Viewer::new();
        let rect = test_rect();
        viewer.resize(rect.size(), 1.0);

        let mesh = viewer.star_mesh(rect);

        // From the default camera every star of the default galaxy is in front of it.
        assert_eq!(mesh.vertices.len(), 4 * viewer.galaxy.cloud().len());
        assert_eq!(mesh.indices.len(), 6 * viewer.galaxy.cloud().len());
        assert!(mesh.vertices.iter().all(|v| v.color.a() == 0));
    }

    #[test]
    fn reset_restores_defaults_and_regenerates() {
        let mut viewer = Viewer::new();
        viewer.store.params_mut().branches = 12;
        viewer.store.mark_changed();
        viewer.regenerate_if_settled(false);

        viewer.store.reset();
        assert!(viewer.regenerate_if_settled(false));
        assert_eq!(viewer.store.params(), &Params::default());
        assert_eq!(viewer.galaxy.cloud().len(), Params::default().count);
    }

    #[test]
    fn slider_drag_regenerates_once_on_release() {
        let mut h = PanelHarness::new(count_row);
        let rail_y = h.row_rect.center().y;
        let x0 = h.row_rect.left() + 20.0;

        h.press(egui::pos2(x0, rail_y));
        for step in 1..=4 {
            let pos = egui::pos2(x0 + 15.0 * step as f32, rail_y);
            h.frame(vec![egui::Event::PointerMoved(pos)]);
        }
        assert!(h.viewer.store.is_pending());
        assert!(h.regenerated.is_empty(), "regenerated mid-drag");

        h.release(egui::pos2(x0 + 60.0, rail_y));
        h.frame(Vec::new());

        let count = h.viewer.store.params().count;
        assert_ne!(count, 1000);
        assert_eq!(h.regenerated, vec![count]);
    }

    #[test]
    fn typed_slider_value_regenerates_once_on_enter() {
        let mut h = PanelHarness::new(count_row);
        let value_box = egui::pos2(h.row_rect.right() - 8.0, h.row_rect.center().y);

        h.click(value_box);
        assert!(Viewer::edit_in_progress(&h.ctx));

        h.type_text("25000");
        assert_eq!(h.viewer.store.params().count, 1000);
        assert!(h.regenerated.is_empty(), "regenerated on a keystroke");

        h.key(egui::Key::Enter, egui::Modifiers::NONE);
        h.frame(Vec::new());

        assert!(!Viewer::edit_in_progress(&h.ctx));
        assert_eq!(h.viewer.store.params().count, 25_000);
        assert_eq!(h.regenerated, vec![25_000]);
    }

    #[test]
    fn typed_hex_colour_regenerates_once_on_enter() {
        let mut h = PanelHarness::new(inside_color_row);
        let hex_field = egui::pos2(h.row_rect.right() - 6.0, h.row_rect.center().y);

        h.click(hex_field);
        h.key(egui::Key::A, egui::Modifiers::COMMAND);
        h.type_text("#00ff00");
        assert_eq!(h.viewer.store.params().inside_color, Rgb::RED);
        assert!(h.regenerated.is_empty(), "regenerated on a keystroke");

        h.key(egui::Key::Enter, egui::Modifiers::NONE);
        h.frame(Vec::new());

        assert_eq!(h.viewer.store.params().inside_color, Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(h.regenerated, vec![1000]);
    }

    #[test]
    fn malformed_hex_colour_is_ignored() {
        let mut h = PanelHarness::new(inside_color_row);
        let hex_field = egui::pos2(h.row_rect.right() - 6.0, h.row_rect.center().y);

        h.click(hex_field);
        h.key(egui::Key::A, egui::Modifiers::COMMAND);
        h.type_text("#zz");
        h.key(egui::Key::Enter, egui::Modifiers::NONE);
        h.frame(Vec::new());

        assert_eq!(h.viewer.store.params().inside_color, Rgb::RED);
        assert!(!h.viewer.store.is_pending());
        assert!(h.regenerated.is_empty());
    }
}
