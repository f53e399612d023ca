use gloo::timers::callback::Interval;
use gloo::utils::document;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::utils::{local_hour, local_month};

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Zero-based month, like `Date.getMonth`.
    pub(crate) const fn from_month(month: u32) -> Self {
        use Season::*;
        match month {
            2..=4 => Spring,
            5..=7 => Summer,
            8..=10 => Fall,
            _ => Winter,
        }
    }

    /// Background, card face, card back and text colors.
    pub(crate) const fn palette(self) -> [(&'static str, &'static str); 4] {
        use Season::*;
        match self {
            Spring => [
                ("--bg-color", "#e8f5e9"),
                ("--card-color", "#c8e6c9"),
                ("--card-back", "#81c784"),
                ("--text-color", "#2e7d32"),
            ],
            Summer => [
                ("--bg-color", "#fff8e1"),
                ("--card-color", "#ffe082"),
                ("--card-back", "#ffb300"),
                ("--text-color", "#e65100"),
            ],
            Fall => [
                ("--bg-color", "#fff3e0"),
                ("--card-color", "#ffcc80"),
                ("--card-back", "#fb8c00"),
                ("--text-color", "#4e342e"),
            ],
            Winter => [
                ("--bg-color", "#e3f2fd"),
                ("--card-color", "#bbdefb"),
                ("--card-back", "#64b5f6"),
                ("--text-color", "#0d47a1"),
            ],
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum DayPhase {
    Dawn,
    Day,
    Sunset,
    Night,
}

impl DayPhase {
    pub const ATTR_NAME: &'static str = "data-time";

    pub(crate) const fn from_hour(hour: u32) -> Self {
        use DayPhase::*;
        match hour {
            5..=7 => Dawn,
            8..=16 => Day,
            17..=19 => Sunset,
            _ => Night,
        }
    }

    pub(crate) const fn name(self) -> &'static str {
        use DayPhase::*;
        match self {
            Dawn => "dawn",
            Day => "day",
            Sunset => "sunset",
            Night => "night",
        }
    }
}

fn root_element() -> Option<HtmlElement> {
    document().document_element()?.dyn_into::<HtmlElement>().ok()
}

fn set_property(name: &str, value: &str) {
    let Some(root) = root_element() else {
        log::error!("no root element to set {} on", name);
        return;
    };
    if let Err(err) = root.style().set_property(name, value) {
        log::error!("failed to set {}: {:?}", name, err);
    }
}

fn apply_season() {
    let season = Season::from_month(local_month());
    log::debug!("season: {:?}", season);
    for (name, value) in season.palette() {
        set_property(name, value);
    }
}

fn apply_day_phase() {
    let phase = DayPhase::from_hour(local_hour());
    let Some(root) = root_element() else {
        return;
    };
    log::trace!("day phase: {}", phase.name());
    if let Err(err) = root.set_attribute(DayPhase::ATTR_NAME, phase.name()) {
        log::error!("failed to set day phase: {:?}", err);
    }
}

/// Presentation-only flip animation speed of the current board.
pub(crate) fn apply_flip_speed(flip_speed_ms: u32) {
    set_property("--flip-speed", &format!("{}ms", flip_speed_ms));
}

pub(crate) fn init() {
    apply_season();
    apply_day_phase();
    Interval::new(60_000, apply_day_phase).forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_map_to_seasons() {
        assert_eq!(Season::from_month(0), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Spring);
        assert_eq!(Season::from_month(5), Season::Summer);
        assert_eq!(Season::from_month(9), Season::Fall);
        assert_eq!(Season::from_month(11), Season::Winter);
    }

    #[test]
    fn hours_map_to_day_phases() {
        assert_eq!(DayPhase::from_hour(4), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(5), DayPhase::Dawn);
        assert_eq!(DayPhase::from_hour(8), DayPhase::Day);
        assert_eq!(DayPhase::from_hour(17), DayPhase::Sunset);
        assert_eq!(DayPhase::from_hour(20), DayPhase::Night);
    }
}
