//! Visual theming for the force graph.
//!
//! Provides color parsing, node palettes, mark styles for highlighted, faded
//! and searched elements, and the named theme presets.

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

	/// Hue in degrees, saturation and lightness in percent.
	pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
		let (s, l) = ((s / 100.0).clamp(0.0, 1.0), (l / 100.0).clamp(0.0, 1.0));
		let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
		let h = h.rem_euclid(360.0) / 60.0;
		let x = c * (1.0 - (h % 2.0 - 1.0).abs());
		let (r, g, b) = match h as u8 {
			0 => (c, x, 0.0),
			1 => (x, c, 0.0),
			2 => (0.0, c, x),
			3 => (0.0, x, c),
			4 => (x, 0.0, c),
			_ => (c, 0.0, x),
		};
		let m = l - c / 2.0;
		let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
		Self::rgb(channel(r), channel(g), channel(b))
	}

	/// Parses a CSS color string.
	///
	/// Supports hex (`#RRGGBB`, `#RGB`), `rgb()`/`rgba()` and `hsl()`/`hsla()`
	/// functional notation. Anything else comes back as mid gray.
	pub fn parse(css: &str) -> Self {
		const FALLBACK: Color = Color::rgb(128, 128, 128);
		let css = css.trim();

		if let Some(hex) = css.strip_prefix('#') {
			if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
				return FALLBACK;
			}
			let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or(128);
			return match hex.len() {
				6 => Color::rgb(channel(&hex[0..2]), channel(&hex[2..4]), channel(&hex[4..6])),
				3 => {
					let short = |i: usize| channel(&hex[i..i + 1].repeat(2));
					Color::rgb(short(0), short(1), short(2))
				}
				_ => FALLBACK,
			};
		}

		Self::parse_functional(css).unwrap_or(FALLBACK)
	}

	/// `rgb()`, `rgba()`, `hsl()` or `hsla()` notation.
	fn parse_functional(css: &str) -> Option<Self> {
		let (func, rest) = css.split_once('(')?;
		let args: Vec<f64> = rest
			.trim_end_matches(')')
			.split(',')
			.map(|part| part.trim().trim_end_matches('%').parse().unwrap_or(f64::NAN))
			.collect();
		let arg = |i: usize, default: f64| {
			args.get(i).copied().filter(|v| !v.is_nan()).unwrap_or(default)
		};

		match func.trim() {
			"rgb" | "rgba" => Some(Color::rgba(
				arg(0, 128.0).clamp(0.0, 255.0) as u8,
				arg(1, 128.0).clamp(0.0, 255.0) as u8,
				arg(2, 128.0).clamp(0.0, 255.0) as u8,
				arg(3, 1.0),
			)),
			"hsl" | "hsla" => Some(
				Color::from_hsl(arg(0, 0.0), arg(1, 0.0), arg(2, 50.0)).with_alpha(arg(3, 1.0)),
			),
			_ => None,
		}
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

	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// A curated color palette for nodes that are neither bands nor members.
#[derive(Clone, Debug)]
pub struct NodePalette {
	pub colors: Vec<Color>,
}

impl NodePalette {
	/// Muted slate blues and teals.
	pub fn slate() -> Self {
		Self {
			colors: vec![
				Color::rgb(94, 129, 172),
				Color::rgb(100, 148, 160),
				Color::rgb(136, 160, 175),
				Color::rgb(119, 158, 165),
			],
		}
	}

	/// Cool teals and purples.
	pub fn aurora() -> Self {
		Self {
			colors: vec![
				Color::rgb(100, 145, 135),
				Color::rgb(130, 120, 150),
				Color::rgb(120, 130, 160),
				Color::rgb(110, 125, 155),
			],
		}
	}

	pub fn get(&self, index: usize) -> Color {
		if self.colors.is_empty() {
			return Color::rgb(128, 128, 128);
		}
		self.colors[index % self.colors.len()]
	}
}

/// Default node colors per node kind.
#[derive(Clone, Debug)]
pub struct KindColors {
	pub band: Color,
	pub member: Color,
}

impl Default for KindColors {
	fn default() -> Self {
		Self {
			band: Color::rgb(0x2e, 0x86, 0xab),
			member: Color::rgb(0xe6, 0x7e, 0x22),
		}
	}
}

/// How highlight, fade and search marks are drawn.
#[derive(Clone, Debug)]
pub struct MarkStyle {
	/// Ring drawn around highlighted nodes.
	pub highlight_ring: Color,
	/// Ring width in screen pixels.
	pub highlight_ring_width: f64,
	/// Opacity of nodes outside the highlighted neighborhood.
	pub faded_alpha: f64,
	/// Fill used for search hits.
	pub search_hit: Color,
	/// Opacity of elements that did not match a search.
	pub search_faded_alpha: f64,
}

impl Default for MarkStyle {
	fn default() -> Self {
		Self {
			highlight_ring: Color::rgb(0xff, 0xd7, 0x00),
			highlight_ring_width: 3.0,
			faded_alpha: 0.15,
			search_hit: Color::rgb(0x36, 0xcf, 0xc9),
			search_faded_alpha: 0.1,
		}
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

/// Edge visual style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Base edge color, used when the edge has no cluster color.
	pub color: Color,
	/// Color of the role labels drawn along edges.
	pub label_color: Color,
	/// Whether to use curved edges
	pub curved: bool,
	/// Curve tension (0.0 = straight, 1.0 = very curved)
	pub curve_tension: f64,
}

/// Node visual style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Whether nodes have inner gradients
	pub use_gradient: bool,
	/// Border/stroke width (0 = no border)
	pub border_width: f64,
	/// Border color
	pub border_color: Color,
	/// Node label color
	pub label_color: Color,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub edge: EdgeStyle,
	pub node: NodeStyle,
	pub marks: MarkStyle,
	pub kinds: KindColors,
	pub palette: NodePalette,
}

impl Theme {
	/// Clean modern dark theme (default)
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
				color: Color::rgba(204, 204, 204, 0.5),
				label_color: Color::rgba(200, 210, 220, 0.7),
				curved: false,
				curve_tension: 0.0,
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				label_color: Color::rgba(255, 255, 255, 0.85),
			},
			marks: MarkStyle::default(),
			kinds: KindColors::default(),
			palette: NodePalette::slate(),
		}
	}

	/// Darker background with curved edges
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
				color: Color::rgba(100, 120, 150, 0.45),
				label_color: Color::rgba(160, 175, 200, 0.7),
				curved: true,
				curve_tension: 0.4,
			},
			node: NodeStyle {
				use_gradient: true,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				label_color: Color::rgba(235, 240, 255, 0.85),
			},
			marks: MarkStyle::default(),
			kinds: KindColors::default(),
			palette: NodePalette::aurora(),
		}
	}

	/// Flat fills, no gradients
	pub fn minimal() -> Self {
		Self {
			name: "minimal",
			background: BackgroundStyle {
				color: Color::rgb(25, 28, 35),
				color_secondary: Color::rgb(25, 28, 35),
				use_gradient: false,
				vignette: 0.0,
			},
			edge: EdgeStyle {
				color: Color::rgba(130, 145, 165, 0.4),
				label_color: Color::rgba(170, 180, 195, 0.6),
				curved: false,
				curve_tension: 0.0,
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 0.0,
				border_color: Color::rgba(255, 255, 255, 0.0),
				label_color: Color::rgba(255, 255, 255, 0.8),
			},
			marks: MarkStyle::default(),
			kinds: KindColors::default(),
			palette: NodePalette::slate(),
		}
	}

	/// White page, dark outlines
	pub fn light() -> Self {
		Self {
			name: "light",
			background: BackgroundStyle {
				color: Color::rgb(255, 255, 255),
				color_secondary: Color::rgb(255, 255, 255),
				use_gradient: false,
				vignette: 0.0,
			},
			edge: EdgeStyle {
				color: Color::rgb(0xcc, 0xcc, 0xcc),
				label_color: Color::rgb(85, 85, 85),
				curved: false,
				curve_tension: 0.0,
			},
			node: NodeStyle {
				use_gradient: false,
				border_width: 1.0,
				border_color: Color::rgb(0x33, 0x33, 0x33),
				label_color: Color::rgb(0x22, 0x22, 0x22),
			},
			marks: MarkStyle::default(),
			kinds: KindColors::default(),
			palette: NodePalette::slate(),
		}
	}

	/// Looks up a preset by its `name`.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"midnight" => Some(Self::midnight()),
			"minimal" => Some(Self::minimal()),
			"light" => Some(Self::light()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_rgb() {
		assert_eq!(Color::parse("#ffd700"), Color::rgb(255, 215, 0));
		assert_eq!(Color::parse("#fff"), Color::rgb(255, 255, 255));
		assert_eq!(Color::parse("rgb(10, 20, 30)"), Color::rgb(10, 20, 30));
		assert_eq!(Color::parse("rgba(10, 20, 30, 0.5)"), Color::rgba(10, 20, 30, 0.5));
		assert_eq!(Color::parse("papayawhip"), Color::rgb(128, 128, 128));
	}

	#[test]
	fn malformed_hex_falls_back_to_gray() {
		let gray = Color::rgb(128, 128, 128);
		assert_eq!(Color::parse("#aé123"), gray);
		assert_eq!(Color::parse("#é1"), gray);
		assert_eq!(Color::parse("#ggg"), gray);
		assert_eq!(Color::parse("#12345"), gray);
	}

	#[test]
	fn parses_generated_cluster_colors() {
		assert_eq!(Color::parse("hsl(0, 100%, 50%)"), Color::rgb(255, 0, 0));
		assert_eq!(Color::parse("hsl(120, 100%, 50%)"), Color::rgb(0, 255, 0));
		assert_eq!(Color::parse("hsl(240, 100%, 50%)"), Color::rgb(0, 0, 255));
		assert_eq!(Color::parse("hsl(200, 0%, 100%)"), Color::rgb(255, 255, 255));

		let pastel = Color::parse("hsl(60, 70%, 75%)");
		assert!(pastel.r > 200 && pastel.g > 200 && pastel.b < pastel.r);
	}

	#[test]
	fn presets_resolve_by_name() {
		for name in ["default", "midnight", "minimal", "light"] {
			assert_eq!(Theme::by_name(name).map(|theme| theme.name), Some(name));
		}
		assert!(Theme::by_name("ember").is_none());
	}
}
