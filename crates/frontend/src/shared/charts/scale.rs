/// Drawing area inside the SVG view box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 280.0,
            left: 56.0,
            right: 16.0,
            top: 16.0,
            bottom: 40.0,
        }
    }
}

impl Frame {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.left - self.right).max(0.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.top - self.bottom).max(0.0)
    }

    /// y coordinate of the zero line
    pub fn baseline(&self) -> f64 {
        self.top + self.plot_height()
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }
}

/// Rounds up to 1, 2 or 5 times a power of ten; 1 for empty data
pub fn nice_max(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let step = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

/// Linear mapping of `[0, max]` onto the plot height
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct YScale {
    pub max: f64,
    frame: Frame,
}

impl YScale {
    pub fn new(data_max: f64, frame: Frame) -> Self {
        Self {
            max: nice_max(data_max),
            frame,
        }
    }

    /// Negative values are drawn on the baseline
    pub fn y(&self, value: f64) -> f64 {
        let ratio = (value.max(0.0) / self.max).min(1.0);
        self.frame.baseline() - ratio * self.frame.plot_height()
    }

    pub fn height(&self, value: f64) -> f64 {
        self.frame.baseline() - self.y(value)
    }

    /// Evenly spaced tick values from 0 to max inclusive
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(1);
        (0..=count)
            .map(|i| self.max * i as f64 / count as f64)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_max_rounds_up() {
        assert_eq!(nice_max(0.0), 1.0);
        assert_eq!(nice_max(87.0), 100.0);
        assert_eq!(nice_max(120.0), 200.0);
        assert_eq!(nice_max(4100.0), 5000.0);
        assert_eq!(nice_max(5000.0), 5000.0);
    }

    #[test]
    fn scale_maps_zero_to_baseline_and_max_to_top() {
        let frame = Frame::default();
        let scale = YScale::new(100.0, frame);
        assert_eq!(scale.y(0.0), frame.baseline());
        assert!((scale.y(100.0) - frame.top).abs() < 1e-9);
        assert!((scale.height(50.0) - frame.plot_height() / 2.0).abs() < 1e-9);
        assert_eq!(scale.y(-5.0), frame.baseline());
    }

    #[test]
    fn ticks_cover_range() {
        let scale = YScale::new(80.0, Frame::default());
        assert_eq!(scale.ticks(4), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }
}
