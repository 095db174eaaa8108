use plotters::style::RGBAColor;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub line_color: RGBAColor,
    pub glow_color: RGBAColor,
    pub marker_color: RGBAColor,
}

impl ChartTheme {
    /// Theme matching the app's dark mode.
    pub fn dark() -> Self {
        Self {
            background_color: RGBAColor(16, 16, 20, 1.0),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            line_color: RGBAColor(136, 132, 216, 1.0),
            glow_color: RGBAColor(136, 132, 216, 0.3),
            marker_color: RGBAColor(186, 182, 255, 1.0),
        }
    }

    /// Theme for the default light mode.
    pub fn light() -> Self {
        Self {
            background_color: RGBAColor(250, 250, 250, 1.0),
            text_color: RGBAColor(30, 30, 30, 0.9),
            grid_color: RGBAColor(0, 0, 0, 0.12),
            axis_color: RGBAColor(30, 30, 30, 0.8),
            line_color: RGBAColor(136, 132, 216, 1.0),
            glow_color: RGBAColor(136, 132, 216, 0.25),
            marker_color: RGBAColor(96, 92, 186, 1.0),
        }
    }

    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
