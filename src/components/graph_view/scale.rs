//! Zoom-dependent sizing for canvas elements.
//!
//! The canvas draws in world space after applying the pan/zoom transform, so
//! every visual size has to decide how it reacts to the zoom factor `k`:
//! stay constant in world units, stay constant in screen pixels, or scale
//! with a clamp so it never degenerates at extreme zoom levels.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Computes the world-space value for a base value at zoom level `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Sizing configuration for all canvas elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Base node radius in world units.
	pub node_radius: f64,
	pub node_radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Minimum zoom level for label font scaling.
	pub label_min_k: f64,
	/// Edge line width in screen pixels.
	pub edge_line_width: f64,
	/// Edge dash pattern (dash, gap) in world units.
	pub dash_pattern: (f64, f64),
	/// Dash flow animation speed (world units per second).
	pub flow_speed: f64,
	/// Arrow size in world units.
	pub arrow_size: f64,
	pub arrow_behavior: ScaleBehavior,
	/// Selection ring stroke width in screen pixels.
	pub ring_width: f64,
	/// Selection ring offset from the node edge in screen pixels.
	pub ring_offset: f64,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node_radius: 14.0,
			node_radius_behavior: ScaleBehavior::Clamped {
				min_screen: 6.0,
				max_screen: f64::INFINITY,
			},
			hit_radius: 18.0,
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 8.0,
				max_screen: f64::INFINITY,
			},
			label_size: 12.0,
			label_min_k: 0.5,
			edge_line_width: 1.5,
			dash_pattern: (8.0, 4.0),
			flow_speed: 12.0,
			arrow_size: 6.0,
			arrow_behavior: ScaleBehavior::Clamped {
				min_screen: 0.0,
				max_screen: 18.0,
			},
			ring_width: 1.5,
			ring_offset: 3.0,
		}
	}
}

/// Pre-computed world-space sizes for one zoom level; built once per frame.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	pub k: f64,
	pub node_radius: f64,
	pub hit_radius: f64,
	/// Canvas font string, e.g. `"12px sans-serif"`.
	pub label_font: String,
	pub edge_line_width: f64,
	pub dash_pattern: (f64, f64),
	pub arrow_size: f64,
	pub ring_width: f64,
	pub ring_offset: f64,
}

impl ScaledValues {
	/// Computes scaled values from configuration and the current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_font_size = config.label_size / k.max(config.label_min_k);
		Self {
			k,
			node_radius: config.node_radius_behavior.apply(config.node_radius, k),
			hit_radius: config.hit_behavior.apply(config.hit_radius, k),
			label_font: format!("{label_font_size}px sans-serif"),
			edge_line_width: config.edge_line_width / k,
			dash_pattern: config.dash_pattern,
			arrow_size: config.arrow_behavior.apply(config.arrow_size, k),
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
		}
	}

	/// Dash offset for the edge flow animation.
	pub fn dash_offset(&self, flow_time: f64, flow_speed: f64) -> f64 {
		-flow_time * flow_speed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn world_sizes_ignore_zoom() {
		assert_eq!(ScaleBehavior::World.apply(5.0, 0.25), 5.0);
		assert_eq!(ScaleBehavior::World.apply(5.0, 4.0), 5.0);
	}

	#[test]
	fn screen_sizes_counteract_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 2.0), 5.0);
		assert_eq!(ScaleBehavior::Screen.apply(10.0, 0.5), 20.0);
	}

	#[test]
	fn clamped_sizes_respect_screen_bounds() {
		let clamped = ScaleBehavior::Clamped {
			min_screen: 6.0,
			max_screen: 18.0,
		};
		// Zoomed way out, the world size grows to hold 6 screen px.
		assert_eq!(clamped.apply(10.0, 0.1), 60.0);
		// Zoomed way in, it shrinks to cap at 18 screen px.
		assert_eq!(clamped.apply(10.0, 9.0), 2.0);
		// At k = 1 within bounds, untouched.
		assert_eq!(clamped.apply(10.0, 1.0), 10.0);
	}

	#[test]
	fn scaled_values_track_the_zoom_level() {
		let config = ScaleConfig::default();
		let scaled = ScaledValues::new(&config, 2.0);
		assert_eq!(scaled.edge_line_width, config.edge_line_width / 2.0);
		assert_eq!(scaled.ring_width, config.ring_width / 2.0);
		assert!(scaled.label_font.ends_with("px sans-serif"));
	}
}
