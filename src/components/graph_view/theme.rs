//! Visual theming for the topology canvas.
//!
//! Node colors key off service status rather than a decorative palette;
//! everything else (background, edges, selection) is a single dark theme.

use crate::model::NodeStatus;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white).
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black).
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node fill colors per service status.
#[derive(Clone, Debug)]
pub struct StatusPalette {
	pub healthy: Color,
	pub degraded: Color,
	pub down: Color,
	/// Fallback for statuses the UI does not recognize.
	pub unknown: Color,
}

impl StatusPalette {
	/// Resolves a status to its fill color; unrecognized statuses get the
	/// fallback rather than failing.
	pub fn color(&self, status: NodeStatus) -> Color {
		match status {
			NodeStatus::Healthy => self.healthy,
			NodeStatus::Degraded => self.degraded,
			NodeStatus::Down => self.down,
			NodeStatus::Unknown => self.unknown,
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	/// Dot-grid color; alpha 0 disables the grid.
	pub grid_color: Color,
	/// Dot-grid spacing in screen pixels.
	pub grid_step: f64,
	/// Vignette intensity (0.0 = none, 1.0 = strong).
	pub vignette: f64,
}

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Color of a user-drawn connection while it is being dragged out.
	pub pending_color: Color,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes get an inner radial gradient.
	pub use_gradient: bool,
	/// Selection ring color.
	pub ring_color: Color,
	/// Hover glow ring color.
	pub hover_color: Color,
	pub label_color: Color,
}

/// Complete visual theme for the canvas.
#[derive(Clone, Debug)]
pub struct Theme {
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub status: StatusPalette,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(10, 10, 10),
				grid_color: Color::rgba(42, 42, 42, 0.9),
				grid_step: 24.0,
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgba(140, 160, 180, 0.5),
				pending_color: Color::rgba(200, 215, 230, 0.9),
			},
			node: NodeStyle {
				use_gradient: true,
				ring_color: Color::rgb(255, 255, 255),
				hover_color: Color::rgba(255, 255, 255, 0.35),
				label_color: Color::rgba(255, 255, 255, 0.85),
			},
			status: StatusPalette {
				healthy: Color::rgb(63, 166, 97),
				degraded: Color::rgb(204, 154, 38),
				down: Color::rgb(205, 63, 56),
				unknown: Color::rgb(110, 118, 129),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_formatting_switches_on_alpha() {
		assert_eq!(Color::rgb(255, 0, 128).to_css(), "#ff0080");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
	}

	#[test]
	fn lighten_and_darken_stay_in_range() {
		let c = Color::rgb(100, 150, 200);
		assert_eq!(c.lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(c.darken(1.0), Color::rgb(0, 0, 0));
		assert_eq!(c.lighten(0.0), c);
	}

	#[test]
	fn unrecognized_status_uses_the_fallback_color() {
		let theme = Theme::default();
		assert_eq!(theme.status.color(NodeStatus::Unknown), theme.status.unknown);
		assert_ne!(
			theme.status.color(NodeStatus::Healthy),
			theme.status.color(NodeStatus::Down)
		);
	}
}
