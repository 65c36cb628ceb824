//! Water-ripple click pulse: one expanding, fading circle sized to the host
//! box, centered on the click point, gone after a fixed duration.

pub const STYLE_ID: &str = "ripple-keyframes";
pub const DURATION_MS: u32 = 600;

pub const KEYFRAMES: &str =
    "@keyframes ripple-effect { to { transform: scale(2); opacity: 0; } }";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostRect {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RipplePulse {
    pub size: f32,
    pub x: f32,
    pub y: f32,
}

impl RipplePulse {
    /// A square of the larger host side, centered on the click point
    /// (coordinates relative to the host's top-left corner).
    pub fn at(host: HostRect, click_x: f32, click_y: f32) -> Self {
        let size = host.width.max(host.height);
        Self {
            size,
            x: click_x - size / 2.0,
            y: click_y - size / 2.0,
        }
    }

    /// Inline style for the one-shot pulse element. The element is removed
    /// when `ripple-effect` finishes.
    pub fn inline_style(&self) -> String {
        format!(
            "position: absolute; width: {size:.1}px; height: {size:.1}px; \
             left: {x:.1}px; top: {y:.1}px; \
             background: radial-gradient(circle, rgba(79, 172, 254, 0.4) 0%, transparent 70%); \
             border-radius: 50%; transform: scale(0); \
             animation: ripple-effect {DURATION_MS}ms ease-out forwards; \
             pointer-events: none; z-index: 1;",
            size = self.size,
            x = self.x,
            y = self.y,
        )
    }
}
