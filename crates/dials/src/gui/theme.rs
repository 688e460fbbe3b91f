use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    /// Text and strokes drawn over the dark compass face.
    pub ink: Srgba<f64>,
    /// Highlight for the pressed button and live heading.
    pub accent: Srgba<f64>,
    /// Readout colour while the heading feed is stale.
    pub warning: Srgba<f64>,
    /// Clock case base tone.
    pub case: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            ink: Self::lookup_color(
                context,
                "dials_ink_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            accent: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            warning: Self::lookup_color(
                context,
                "warning_color",
                Srgba::new(0.96, 0.66, 0.25, 1.0),
                Some(1.0),
            ),
            case: Self::lookup_color(
                context,
                "dials_case_color",
                Srgba::new(0.56, 0.56, 0.58, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.dials-window, .dials-canvas {
    background: none;
    background-color: black;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
