//! Continuous floating oscillation for cards and badges.

pub const STYLE_ID: &str = "float-keyframes";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatOptions {
    pub duration_ms: u32,
    pub amplitude_px: f32,
}

impl Default for FloatOptions {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            amplitude_px: 10.0,
        }
    }
}

/// Value for the host's `animation` property; clearing it is the detach.
pub fn animation(options: FloatOptions) -> String {
    format!("float-effect {}ms ease-in-out infinite", options.duration_ms)
}

pub fn keyframes(options: FloatOptions) -> String {
    format!(
        "@keyframes float-effect {{ 0%, 100% {{ transform: translateY(0); }} \
         50% {{ transform: translateY(-{amplitude}px); }} }}",
        amplitude = options.amplitude_px
    )
}
