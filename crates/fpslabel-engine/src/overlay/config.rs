use crate::coords::Vec2;
use crate::paint::Color;
use crate::present::REFERENCE_FPS;
use crate::time::DEFAULT_REPORT_INTERVAL;

/// Horizontal placement of the label text inside its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    Start,
    #[default]
    Center,
    End,
}

/// Overlay configuration.
///
/// Paddings keep the label clear of the screen edges (and of the areas a host
/// typically reserves for navigation and toolbars) when it snaps into place.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// When false, `install` is a no-op. Defaults to debug builds only.
    pub enabled: bool,

    /// Minimum label size in logical pixels. The label grows to fit its text.
    pub label_size: Vec2,

    /// Horizontal inset between the label text and its edges.
    pub text_inset: f32,

    /// Distance from the left or right screen edge after snapping.
    pub h_padding: f32,

    /// Minimum distance from the top of the screen after snapping.
    pub top_padding: f32,

    /// The label origin stays at least this far above the bottom edge.
    pub bottom_padding: f32,

    /// Fill drawn behind the text.
    pub background: Color,

    /// Corner radius of the background, in logical pixels.
    pub corner_radius: f32,

    pub text_align: TextAlign,

    pub main_font_size: f32,
    pub sub_font_size: f32,

    /// Preferred families, tried in order before the system font.
    pub font_families: Vec<String>,

    /// Index installed system fonts when resolving `font_families`.
    pub load_system_fonts: bool,

    /// Frame rate drawn as the "on target" color.
    pub reference_fps: f64,

    /// Reporting window, in seconds.
    pub report_interval: f64,

    /// Duration of the snap-to-edge animation after a drag, in seconds.
    pub snap_duration: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            label_size: Vec2::new(60.0, 20.0),
            text_inset: 6.0,
            h_padding: 20.0,
            top_padding: 88.0,
            bottom_padding: 78.0,
            background: Color::from_straight(0.0, 0.0, 0.0, 0.7),
            corner_radius: 5.0,
            text_align: TextAlign::Center,
            main_font_size: 14.0,
            sub_font_size: 4.0,
            font_families: vec!["Menlo".to_owned(), "Courier".to_owned()],
            load_system_fonts: true,
            reference_fps: REFERENCE_FPS,
            report_interval: DEFAULT_REPORT_INTERVAL,
            snap_duration: 0.3,
        }
    }
}
