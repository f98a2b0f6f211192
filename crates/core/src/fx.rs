//! Show/hide transitions.
//!
//! A [`Transition`] is resolved once from [`TabsConfig`] and holds the two
//! [`Step`]s run on every switch. Each step is an [`Animation`] descriptor
//! plus a duration; [`Step::tracks`] turns the descriptor into concrete
//! keyframe values once the surface has measured the element.

use crate::config::TabsConfig;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const SLOW_MS: u32 = 600;
pub const NORMAL_MS: u32 = 400;
pub const FAST_MS: u32 = 200;

/// Duration used for the plain strategy.
pub const PLAIN_MS: u32 = 1;
/// Plain duration while bookmarking is active: long enough for the
/// fragment jump to settle before the content changes.
pub const PLAIN_BOOKMARKABLE_MS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Speed {
    Slow,
    #[default]
    Normal,
    Fast,
    Millis(u32),
}

impl Speed {
    pub fn millis(self) -> u32 {
        match self {
            Speed::Slow => SLOW_MS,
            Speed::Normal => NORMAL_MS,
            Speed::Fast => FAST_MS,
            Speed::Millis(ms) => ms,
        }
    }

    /// Parse a named speed. Unknown names fall back to `Normal`.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "slow" => Speed::Slow,
            "fast" => Speed::Fast,
            other => other
                .parse::<u32>()
                .map(Speed::Millis)
                .unwrap_or(Speed::Normal),
        }
    }
}

impl Serialize for Speed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Speed::Slow => serializer.serialize_str("slow"),
            Speed::Normal => serializer.serialize_str("normal"),
            Speed::Fast => serializer.serialize_str("fast"),
            Speed::Millis(ms) => serializer.serialize_u32(*ms),
        }
    }
}

impl<'de> Deserialize<'de> for Speed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpeedVisitor;

        impl<'de> Visitor<'de> for SpeedVisitor {
            type Value = Speed;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a speed name or a duration in milliseconds")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Speed, E> {
                Ok(Speed::from_name(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Speed, E> {
                Ok(Speed::Millis(v.min(u32::MAX as u64) as u32))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Speed, E> {
                Ok(Speed::Millis(v.clamp(0, u32::MAX as i64) as u32))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Speed, E> {
                Ok(Speed::Millis(v.max(0.0).round() as u32))
            }
        }

        deserializer.deserialize_any(SpeedVisitor)
    }
}

/// Target of one animated property.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimValue {
    Show,
    Hide,
    Toggle,
    To(String),
}

impl Serialize for AnimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnimValue::Show => serializer.serialize_str("show"),
            AnimValue::Hide => serializer.serialize_str("hide"),
            AnimValue::Toggle => serializer.serialize_str("toggle"),
            AnimValue::To(v) => serializer.serialize_str(v),
        }
    }
}

impl<'de> Deserialize<'de> for AnimValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AnimValueVisitor;

        impl<'de> Visitor<'de> for AnimValueVisitor {
            type Value = AnimValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("\"show\", \"hide\", \"toggle\", a css value or a number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<AnimValue, E> {
                Ok(match v {
                    "show" => AnimValue::Show,
                    "hide" => AnimValue::Hide,
                    "toggle" => AnimValue::Toggle,
                    other => AnimValue::To(other.to_string()),
                })
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<AnimValue, E> {
                Ok(AnimValue::To(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<AnimValue, E> {
                Ok(AnimValue::To(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<AnimValue, E> {
                Ok(AnimValue::To(v.to_string()))
            }
        }

        deserializer.deserialize_any(AnimValueVisitor)
    }
}

/// CSS property -> target, e.g. `{ "height": "show", "opacity": "show" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Animation(pub BTreeMap<String, AnimValue>);

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: &str, value: AnimValue) -> Self {
        self.0.insert(property.to_string(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Show,
    Hide,
}

/// One side of a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub direction: Direction,
    pub animation: Animation,
    pub duration_ms: u32,
}

/// Concrete keyframe pair for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub property: String,
    pub from: String,
    pub to: String,
}

impl Track {
    /// Web Animations keyframes use camelCase property names.
    pub fn js_property(&self) -> String {
        kebab_to_camel(&self.property)
    }
}

/// Measured values of the element the step runs on.
pub trait Measure {
    /// Value of a property when the element is fully shown.
    fn natural(&self, property: &str) -> String;
    /// Value of a property right now.
    fn current(&self, property: &str) -> String;
}

impl Step {
    pub fn plain(direction: Direction, duration_ms: u32) -> Self {
        Step {
            direction,
            animation: Animation::new(),
            duration_ms,
        }
    }

    pub fn is_plain(&self) -> bool {
        self.animation.is_empty()
    }

    /// Whether any track changes the box size (needs `overflow: hidden`).
    pub fn affects_layout(&self) -> bool {
        self.animation
            .properties()
            .any(|p| LAYOUT_PROPERTIES.contains(&p))
    }

    pub fn tracks(&self, measure: &dyn Measure) -> Vec<Track> {
        self.animation
            .0
            .iter()
            .map(|(property, value)| {
                let showing = match value {
                    AnimValue::Show => true,
                    AnimValue::Hide => false,
                    AnimValue::Toggle => self.direction == Direction::Show,
                    AnimValue::To(target) => {
                        return Track {
                            property: property.clone(),
                            from: measure.current(property),
                            to: with_unit(property, target),
                        };
                    }
                };
                let (from, to) = if showing {
                    (zero_value(property), measure.natural(property))
                } else {
                    (measure.current(property), zero_value(property))
                };
                Track {
                    property: property.clone(),
                    from,
                    to,
                }
            })
            .collect()
    }
}

const LAYOUT_PROPERTIES: &[&str] = &[
    "height",
    "width",
    "min-height",
    "min-width",
    "max-height",
    "max-width",
    "padding-top",
    "padding-bottom",
    "margin-top",
    "margin-bottom",
];

const UNITLESS_PROPERTIES: &[&str] = &["opacity", "z-index", "line-height", "flex-grow"];

fn zero_value(property: &str) -> String {
    if UNITLESS_PROPERTIES.contains(&property) {
        "0".to_string()
    } else {
        "0px".to_string()
    }
}

/// Bare numbers on length properties are pixels.
fn with_unit(property: &str, value: &str) -> String {
    let is_number = value.parse::<f64>().is_ok();
    if is_number && !UNITLESS_PROPERTIES.contains(&property) {
        format!("{}px", value)
    } else {
        value.to_string()
    }
}

fn kebab_to_camel(property: &str) -> String {
    let mut out = String::with_capacity(property.len());
    let mut upper = false;
    for c in property.chars() {
        if c == '-' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// The show/hide pair run on every switch.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub show: Step,
    pub hide: Step,
}

impl Transition {
    /// Resolves the strategy in priority order: fade/slide flags, explicit
    /// descriptors, plain.
    pub fn from_config(config: &TabsConfig, bookmarking: bool) -> Self {
        let plain_ms = if bookmarking {
            PLAIN_BOOKMARKABLE_MS
        } else {
            PLAIN_MS
        };

        if config.fx_fade || config.fx_slide {
            let mut show = Animation::new();
            let mut hide = Animation::new();
            if config.fx_slide {
                show = show.with("height", AnimValue::Show);
                hide = hide.with("height", AnimValue::Hide);
            }
            if config.fx_fade {
                show = show.with("opacity", AnimValue::Show);
                hide = hide.with("opacity", AnimValue::Hide);
            }
            let ms = config.fx_speed.millis();
            return Transition {
                show: Step {
                    direction: Direction::Show,
                    animation: show,
                    duration_ms: ms,
                },
                hide: Step {
                    direction: Direction::Hide,
                    animation: hide,
                    duration_ms: ms,
                },
            };
        }

        let side = |descriptor: &Option<Animation>, speed: Option<Speed>, direction| {
            match descriptor {
                Some(animation) if !animation.is_empty() => Step {
                    direction,
                    animation: animation.clone(),
                    duration_ms: speed.unwrap_or(config.fx_speed).millis(),
                },
                _ => Step::plain(direction, plain_ms),
            }
        };

        Transition {
            show: side(&config.fx_show, config.fx_show_speed, Direction::Show),
            hide: side(&config.fx_hide, config.fx_hide_speed, Direction::Hide),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Measure for Fixed {
        fn natural(&self, property: &str) -> String {
            match property {
                "opacity" => "1".into(),
                _ => "120px".into(),
            }
        }

        fn current(&self, property: &str) -> String {
            match property {
                "opacity" => "1".into(),
                _ => "80px".into(),
            }
        }
    }

    fn config(json: &str) -> TabsConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_speed_names_and_numbers() {
        let speeds: Vec<Speed> = serde_json::from_str(r#"["slow", "fast", "normal", 250, "bogus"]"#).unwrap();
        let ms: Vec<u32> = speeds.iter().map(|s| s.millis()).collect();
        assert_eq!(ms, vec![600, 200, 400, 250, 400]);
    }

    #[test]
    fn test_fade_and_slide_share_speed() {
        let t = Transition::from_config(
            &config(r#"{"fxFade": true, "fxSlide": true, "fxSpeed": "fast", "fxShowSpeed": 900}"#),
            false,
        );
        assert_eq!(t.show.duration_ms, 200);
        assert_eq!(t.hide.duration_ms, 200);
        let props: Vec<&str> = t.show.animation.properties().collect();
        assert_eq!(props, vec!["height", "opacity"]);
        assert!(t.hide.affects_layout());
    }

    #[test]
    fn test_flags_win_over_descriptors() {
        let t = Transition::from_config(
            &config(r#"{"fxFade": true, "fxShow": {"width": "show"}}"#),
            false,
        );
        let props: Vec<&str> = t.show.animation.properties().collect();
        assert_eq!(props, vec!["opacity"]);
    }

    #[test]
    fn test_descriptors_with_independent_speeds() {
        let t = Transition::from_config(
            &config(
                r#"{"fxShow": {"opacity": "show"}, "fxHide": {"height": "hide"},
                    "fxShowSpeed": "slow", "fxHideSpeed": 100}"#,
            ),
            false,
        );
        assert_eq!(t.show.duration_ms, 600);
        assert_eq!(t.hide.duration_ms, 100);
    }

    #[test]
    fn test_missing_descriptor_side_is_plain() {
        let t = Transition::from_config(&config(r#"{"fxShow": {"opacity": "show"}}"#), true);
        assert!(!t.show.is_plain());
        assert_eq!(t.show.duration_ms, NORMAL_MS);
        assert!(t.hide.is_plain());
        assert_eq!(t.hide.duration_ms, PLAIN_BOOKMARKABLE_MS);
    }

    #[test]
    fn test_plain_speed_depends_on_bookmarking() {
        let t = Transition::from_config(&TabsConfig::default(), false);
        assert!(t.show.is_plain() && t.hide.is_plain());
        assert_eq!(t.show.duration_ms, PLAIN_MS);
        let t = Transition::from_config(&TabsConfig::default(), true);
        assert_eq!(t.hide.duration_ms, PLAIN_BOOKMARKABLE_MS);
    }

    #[test]
    fn test_tracks_show_and_hide() {
        let show = Step {
            direction: Direction::Show,
            animation: Animation::new()
                .with("height", AnimValue::Show)
                .with("opacity", AnimValue::Toggle),
            duration_ms: 10,
        };
        let tracks = show.tracks(&Fixed);
        assert_eq!(tracks[0], Track { property: "height".into(), from: "0px".into(), to: "120px".into() });
        assert_eq!(tracks[1], Track { property: "opacity".into(), from: "0".into(), to: "1".into() });

        let hide = Step {
            direction: Direction::Hide,
            animation: Animation::new().with("opacity", AnimValue::Toggle),
            duration_ms: 10,
        };
        assert_eq!(hide.tracks(&Fixed)[0].to, "0");
    }

    #[test]
    fn test_literal_targets_get_units() {
        let step: Animation = serde_json::from_str(r#"{"margin-top": 20, "opacity": 0.5, "width": "50%"}"#).unwrap();
        let step = Step { direction: Direction::Show, animation: step, duration_ms: 1 };
        let tracks = step.tracks(&Fixed);
        assert_eq!(tracks[0].to, "20px");
        assert_eq!(tracks[0].js_property(), "marginTop");
        assert_eq!(tracks[1].to, "0.5");
        assert_eq!(tracks[2].to, "50%");
    }
}
