//! Conversion Rate Chart
//!
//! Renders a self-contained SVG bar chart of per-arm conversion rates
//! with Wilson interval whiskers. No external assets or scripts; the
//! file opens in any browser or embeds directly in the Markdown report.

use crate::report::Report;

/// Chart color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTheme {
    /// Dark ink on white background
    #[default]
    Light,
    /// Light ink on dark background
    Dark,
}

impl std::str::FromStr for ChartTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ChartTheme::Light),
            "dark" => Ok(ChartTheme::Dark),
            other => Err(format!("Unknown chart theme: {}", other)),
        }
    }
}

/// Chart rendering options
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Color theme
    pub theme: ChartTheme,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            theme: ChartTheme::Light,
        }
    }
}

/// Generate an SVG bar chart of conversion rates by group
pub fn generate_conversion_chart(report: &Report, options: &ChartOptions) -> String {
    let r = &report.result;
    let (background, ink, bar_control, bar_treatment) = match options.theme {
        ChartTheme::Light => ("#ffffff", "#1f2430", "#4e79a7", "#f28e2b"),
        ChartTheme::Dark => ("#1f2430", "#e6e1cf", "#73a3d4", "#ffb454"),
    };

    let w = options.width as f64;
    let h = options.height as f64;
    let margin_left = 70.0;
    let margin_right = 30.0;
    let margin_top = 50.0;
    let margin_bottom = 60.0;
    let plot_w = w - margin_left - margin_right;
    let plot_h = h - margin_top - margin_bottom;

    // Y axis spans zero to a little above the highest value in play,
    // including interval uppers so whiskers never clip.
    let mut y_max: f64 = 0.0;
    for arm in [&r.control, &r.treatment] {
        y_max = y_max.max(arm.conversion_rate);
        if !arm.interval.is_undefined() {
            y_max = y_max.max(arm.interval.upper);
        }
    }
    let y_max = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };

    let y_of = |value: f64| margin_top + plot_h * (1.0 - value / y_max);

    let bar_width = plot_w / 4.0;
    let slot = plot_w / 2.0;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
         viewBox=\"0 0 {} {}\" font-family=\"sans-serif\">\n",
        options.width, options.height, options.width, options.height
    ));
    svg.push_str(&format!(
        "  <rect width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        options.width, options.height, background
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"28\" text-anchor=\"middle\" font-size=\"18\" fill=\"{}\">\
         Conversion Rate by Group</text>\n",
        w / 2.0,
        ink
    ));

    // Horizontal gridlines with axis labels at quarter steps
    for step in 0..=4 {
        let value = y_max * step as f64 / 4.0;
        let y = y_of(value);
        svg.push_str(&format!(
            "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" \
             stroke=\"{}\" stroke-opacity=\"0.2\"/>\n",
            margin_left,
            y,
            w - margin_right,
            y,
            ink
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"12\" \
             fill=\"{}\">{:.3}</text>\n",
            margin_left - 8.0,
            y + 4.0,
            ink,
            value
        ));
    }

    let arms = [
        (&report.control_label, &r.control, bar_control),
        (&report.treatment_label, &r.treatment, bar_treatment),
    ];

    for (index, (label, arm, color)) in arms.iter().enumerate() {
        let x_center = margin_left + slot * (index as f64 + 0.5);
        let x_bar = x_center - bar_width / 2.0;
        let y_top = y_of(arm.conversion_rate);

        svg.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"{}\"/>\n",
            x_bar,
            y_top,
            bar_width,
            (margin_top + plot_h) - y_top,
            color
        ));

        // Wilson interval whisker
        if !arm.interval.is_undefined() {
            let y_lower = y_of(arm.interval.lower.max(0.0));
            let y_upper = y_of(arm.interval.upper);
            svg.push_str(&format!(
                "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" \
                 stroke=\"{}\" stroke-width=\"2\"/>\n",
                x_center, y_lower, x_center, y_upper, ink
            ));
            for y in [y_lower, y_upper] {
                svg.push_str(&format!(
                    "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" \
                     stroke=\"{}\" stroke-width=\"2\"/>\n",
                    x_center - 8.0,
                    y,
                    x_center + 8.0,
                    y,
                    ink
                ));
            }
        }

        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\" \
             fill=\"{}\">{}</text>\n",
            x_center,
            margin_top + plot_h + 24.0,
            ink,
            escape_xml(label)
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" \
             fill=\"{}\">{:.4}</text>\n",
            x_center,
            y_top - 8.0,
            ink,
            arm.conversion_rate
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
