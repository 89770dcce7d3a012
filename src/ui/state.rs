use image::{Rgba, RgbaImage};
use std::collections::HashSet;
use std::time::Duration;
use winit::keyboard::NamedKey;

use crate::files::ImageSet;
use crate::fit::{DisplayArea, FitPolicy, Size, apply_plan, plan_fit};
use crate::loader::{DecodedImage, decode_image};
use crate::nav::Navigator;
use crate::prefs::Preferences;
use crate::ui::render::{
    BAR_COLOR, BG_COLOR, ICON_COLOR, ICON_DISABLED, blit_centered, draw_chevrons, draw_cross,
    fill_rect, rgb,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Height of the button bar below the image.
pub const BAR_HEIGHT: u32 = 32;
const ICON_SIZE: u32 = 14;

pub const FIT_POLICY_KEY: &str = "fit_policy";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Back,
    Quit,
    Forward,
}

/// The part of the window left for the image once the button bar is placed.
pub fn display_area_for(fb_w: u32, fb_h: u32) -> DisplayArea {
    Size::new(fb_w.max(1), fb_h.saturating_sub(BAR_HEIGHT).max(1))
}

/// Which bar button, if any, lies under (x, y). The bar is split into three
/// equal columns: back, quit, forward.
pub fn button_at(x: f64, y: f64, fb_w: u32, fb_h: u32) -> Option<Button> {
    let bar_top = fb_h.saturating_sub(BAR_HEIGHT) as f64;
    if y < bar_top || y >= fb_h as f64 || x < 0.0 || fb_w == 0 {
        return None;
    }
    let column = (x / (fb_w as f64 / 3.0)) as u32;
    match column {
        0 => Some(Button::Back),
        1 => Some(Button::Quit),
        2 => Some(Button::Forward),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

pub struct ViewerState {
    pub images: ImageSet,
    pub nav: Navigator,
    pub prefs: Preferences,
    pub fit_policy: FitPolicy,
    pub pad_color: Rgba<u8>,
    pub interval: Duration,

    pub display_area: DisplayArea,
    /// Decoded source of the current index; `None` if decoding failed.
    pub current: Option<DecodedImage>,
    /// `current` after fitting to `display_area`; what actually gets drawn.
    pub fitted: Option<RgbaImage>,

    // Input gathered since the last update
    pub keys_pressed: HashSet<NamedKey>,
    pub chars_pressed: HashSet<char>,
    pub clicks: Vec<Button>,
}

impl ViewerState {
    pub fn new(
        images: ImageSet,
        nav: Navigator,
        prefs: Preferences,
        fit_policy: FitPolicy,
        pad_color: Rgba<u8>,
        interval: Duration,
    ) -> Self {
        let mut state = Self {
            images,
            nav,
            prefs,
            fit_policy,
            pad_color,
            interval,
            display_area: Size::new(1, 1),
            current: None,
            fitted: None,
            keys_pressed: HashSet::new(),
            chars_pressed: HashSet::new(),
            clicks: Vec::new(),
        };
        state.load_current();
        state
    }

    pub fn current_index(&self) -> usize {
        self.nav.current_index()
    }

    /// Decode the image at the navigator's index and fit it.
    fn load_current(&mut self) {
        let idx = self.current_index();
        self.current = match self.images.get(idx) {
            Some(path) => match decode_image(path) {
                Ok(decoded) => {
                    log::debug!(
                        "Loaded [{}/{}] {:?} ({}x{} {}, {:.1} KB)",
                        idx + 1,
                        self.nav.image_count(),
                        path,
                        decoded.width,
                        decoded.height,
                        decoded.format_name,
                        decoded.file_size as f64 / 1024.0,
                    );
                    Some(decoded)
                }
                Err(e) => {
                    log::error!("{}", e);
                    None
                }
            },
            None => None,
        };
        self.refit();
    }

    /// Re-run the fitter on the already decoded image.
    fn refit(&mut self) {
        self.fitted = self.current.as_ref().map(|dec| {
            let plan = plan_fit(dec.size(), self.display_area, self.fit_policy);
            apply_plan(&dec.image, &plan, self.pad_color)
        });
    }

    /// Called by the host whenever the surface changes size.
    pub fn set_display_area(&mut self, area: DisplayArea) {
        if area != self.display_area {
            self.display_area = area;
            self.refit();
        }
    }

    pub fn forward(&mut self, user_initiated: bool) {
        let before = self.nav.current_index();
        if self.nav.step_forward(user_initiated) != before {
            self.load_current();
        }
    }

    pub fn backward(&mut self, user_initiated: bool) {
        let before = self.nav.current_index();
        if self.nav.step_backward(user_initiated) != before {
            self.load_current();
        }
    }

    /// Timer callback. Returns false if the tick was swallowed by a recent
    /// manual move.
    pub fn on_tick(&mut self) -> bool {
        let before = self.nav.current_index();
        match self.nav.tick() {
            Some(idx) => {
                if idx != before {
                    self.load_current();
                }
                true
            }
            None => false,
        }
    }

    pub fn cycle_fit_policy(&mut self) {
        self.fit_policy = self.fit_policy.cycle();
        log::info!("Fit mode: {:?}", self.fit_policy);
        self.refit();
        if let Err(e) = self.prefs.set_and_save(FIT_POLICY_KEY, self.fit_policy) {
            log::warn!("Could not save preferences: {}", e);
        }
    }

    /// Apply the input gathered since the last call.
    /// Returns true if the app should quit.
    pub fn update(&mut self) -> bool {
        let quit = self.keys_pressed.contains(&NamedKey::Escape)
            || self.chars_pressed.contains(&'q')
            || self.clicks.contains(&Button::Quit);

        if !quit {
            let fwd = self.keys_pressed.contains(&NamedKey::ArrowRight)
                || self.keys_pressed.contains(&NamedKey::Space)
                || self.chars_pressed.contains(&'l')
                || self.clicks.contains(&Button::Forward);
            let bwd = self.keys_pressed.contains(&NamedKey::ArrowLeft)
                || self.chars_pressed.contains(&'h')
                || self.clicks.contains(&Button::Back);

            if fwd {
                self.forward(true);
            } else if bwd {
                self.backward(true);
            }

            if self.chars_pressed.contains(&'c') {
                self.cycle_fit_policy();
            }
        }

        self.keys_pressed.clear();
        self.chars_pressed.clear();
        self.clicks.clear();
        quit
    }

    /// Render into the softbuffer framebuffer (u32 per pixel, 0x00RRGGBB).
    pub fn render(&self, frame: &mut [u32], fb_w: u32, fb_h: u32) {
        // The surface may lag a resize by a frame.
        if frame.len() < fb_w as usize * fb_h as usize {
            return;
        }
        let bg = rgb(BG_COLOR[0], BG_COLOR[1], BG_COLOR[2]);
        frame.fill(bg);

        let area_h = fb_h.saturating_sub(BAR_HEIGHT);
        if let Some(ref img) = self.fitted {
            blit_centered(frame, fb_w, area_h, img);
        }

        // Button bar
        fill_rect(frame, fb_w, fb_h, 0, area_h as i32, fb_w, fb_h - area_h, BAR_COLOR);
        let cy = (area_h + (fb_h - area_h) / 2) as i32;
        let column_w = fb_w as i32 / 3;
        let back_color = if self.nav.can_go_back() {
            ICON_COLOR
        } else {
            ICON_DISABLED
        };
        draw_chevrons(frame, fb_w, fb_h, column_w / 2, cy, ICON_SIZE, true, back_color);
        draw_cross(frame, fb_w, fb_h, column_w + column_w / 2, cy, ICON_SIZE, ICON_COLOR);
        draw_chevrons(frame, fb_w, fb_h, 2 * column_w + column_w / 2, cy, ICON_SIZE, false, ICON_COLOR);
    }
}
