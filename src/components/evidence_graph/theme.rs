//! Colors and visual styling for the evidence graph canvas.

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
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

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
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

/// Node palette indexed by the stable per-document color index.
///
/// Must stay at [`crate::engine::PALETTE_SIZE`] entries so every published
/// `color_index` maps to a distinct color.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted, harmonious palette - slate blues and teals (default)
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),  // Steel blue
				Color::rgb(129, 161, 193), // Light steel
				Color::rgb(100, 148, 160), // Teal gray
				Color::rgb(136, 160, 175), // Cadet blue
				Color::rgb(108, 142, 173), // Air force blue
				Color::rgb(119, 158, 165), // Desaturated cyan
				Color::rgb(143, 163, 180), // Cool gray
				Color::rgb(122, 153, 168), // Dusty blue
			],
		}
	}

	/// Cool teals and purples, for the darker theme
	pub fn aurora() -> Self {
		Self {
			colors: vec![
				Color::rgb(100, 145, 135), // Eucalyptus
				Color::rgb(115, 135, 155), // Slate
				Color::rgb(130, 120, 150), // Wisteria
				Color::rgb(105, 140, 145), // Teal
				Color::rgb(120, 130, 160), // Periwinkle
				Color::rgb(125, 145, 140), // Sage
				Color::rgb(110, 125, 155), // Storm
				Color::rgb(135, 140, 150), // Pewter
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Primary background color
	pub color: Color,
	/// Secondary color for gradients
	pub color_secondary: Color,
	/// Whether to use radial gradient
	pub use_gradient: bool,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Edge visual style. Per-edge opacity comes from the published frame; this
/// sets the base color it is applied to.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	/// Line width in pixels.
	pub line_width: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Ring color for the hovered node
	pub hover_ring_color: Color,
	/// Hover ring stroke width in pixels
	pub hover_ring_width: f64,
	/// Gap between the node disc and the hover ring, in pixels
	pub hover_ring_offset: f64,
}

/// Label style for document titles.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	pub color: Color,
	/// Font size in pixels.
	pub size: f64,
	/// Vertical gap between a node's disc and its label, in pixels.
	pub offset: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub label: LabelStyle,
	pub palette: NodePalette,
}

impl Theme {
	/// Clean dark theme with subtle effects (default)
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
				vignette: 0.15,
			},
			edge: EdgeStyle {
				color: Color::rgb(140, 160, 180),
				line_width: 1.5,
			},
			node: NodeStyle {
				use_gradient: true,
				hover_ring_color: Color::rgba(235, 240, 245, 0.85),
				hover_ring_width: 1.5,
				hover_ring_offset: 3.0,
			},
			label: LabelStyle {
				color: Color::rgba(220, 228, 235, 0.9),
				size: 11.0,
				offset: 6.0,
			},
			palette: NodePalette::slate(),
		}
	}

	/// Elegant near-black theme
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(18, 20, 28),
				color_secondary: Color::rgb(25, 28, 38),
				use_gradient: true,
				vignette: 0.2,
			},
			edge: EdgeStyle {
				color: Color::rgb(100, 120, 150),
				line_width: 1.5,
			},
			node: NodeStyle {
				use_gradient: true,
				hover_ring_color: Color::rgba(225, 232, 240, 0.8),
				hover_ring_width: 1.5,
				hover_ring_offset: 3.0,
			},
			label: LabelStyle {
				color: Color::rgba(210, 218, 228, 0.9),
				size: 11.0,
				offset: 6.0,
			},
			palette: NodePalette::aurora(),
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}
