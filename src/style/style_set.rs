//! Declarative style rules and the style set used by the GeoJSON overlay.
//!
//! A style set is an ordered list of rules. Each rule pairs a geometry-type
//! condition with a rendering technique and its attributes. The renderer
//! evaluates rules in list order and sequences the resulting draw calls by
//! `render_order`.

use super::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Geometry class a rule can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Point,
    Line,
    Polygon,
}

impl GeometryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryType::Point => "point",
            GeometryType::Line => "line",
            GeometryType::Polygon => "polygon",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "point" => Some(GeometryType::Point),
            "line" => Some(GeometryType::Line),
            "polygon" => Some(GeometryType::Polygon),
            _ => None,
        }
    }
}

/// Match predicate of a style rule.
///
/// On the wire this is the expression `$geometryType == 'polygon'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub geometry_type: GeometryType,
}

impl Condition {
    pub const fn geometry_type(geometry_type: GeometryType) -> Self {
        Self { geometry_type }
    }

    pub fn matches(&self, geometry_type: GeometryType) -> bool {
        self.geometry_type == geometry_type
    }

    /// Parses `$geometryType == '<type>'`, with either quote style.
    pub fn parse(expr: &str) -> Option<Self> {
        let rest = expr.trim().strip_prefix("$geometryType")?;
        let rest = rest.trim_start().strip_prefix("==")?.trim();
        let quote = rest.chars().next()?;
        if quote != '\'' && quote != '"' {
            return None;
        }
        let value = rest.strip_prefix(quote)?.strip_suffix(quote)?;
        GeometryType::parse(value).map(Self::geometry_type)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$geometryType == '{}'", self.geometry_type.as_str())
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Condition::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unsupported condition: {}", s)))
    }
}

/// Unit in which line widths and sizes are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MetricUnit {
    #[default]
    Meter,
    Pixel,
}

/// Attributes of the `fill` technique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillAttributes {
    pub color: Color,
    #[serde(default)]
    pub transparent: bool,
    #[serde(default = "full_opacity")]
    pub opacity: f32,
    #[serde(default)]
    pub line_width: f32,
    pub line_color: Option<Color>,
}

/// Attributes of the `solid-line` technique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAttributes {
    pub color: Color,
    #[serde(default)]
    pub metric_unit: MetricUnit,
    pub line_width: f32,
}

/// Attributes of the `circles` technique. Size is in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleAttributes {
    pub size: f32,
    pub color: Color,
}

fn full_opacity() -> f32 {
    1.0
}

/// Rendering technique together with its attribute bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "technique", content = "attr", rename_all = "kebab-case")]
pub enum Technique {
    /// Filled polygon with an optional outline. Rings are filled as convex
    /// shapes and holes are not cut out.
    Fill(FillAttributes),
    SolidLine(LineAttributes),
    Circles(CircleAttributes),
}

impl Technique {
    pub fn name(&self) -> &'static str {
        match self {
            Technique::Fill(_) => "fill",
            Technique::SolidLine(_) => "solid-line",
            Technique::Circles(_) => "circles",
        }
    }
}

/// A single style rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub when: Condition,
    #[serde(flatten)]
    pub technique: Technique,
    /// Higher values are drawn later, on top.
    #[serde(rename = "renderOrder", default)]
    pub render_order: i64,
}

/// Ordered list of style rules.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSet(Vec<StyleRule>);

impl StyleSet {
    /// Rules whose condition matches the geometry type, in list order.
    pub fn matching(&self, geometry_type: GeometryType) -> impl Iterator<Item = &StyleRule> {
        self.0.iter().filter(move |r| r.when.matches(geometry_type))
    }
}

const OVERLAY_FILL: Color = Color::rgb(0x77, 0xcc, 0xff); // #7cf
const OVERLAY_OUTLINE: Color = Color::rgb(0x00, 0x33, 0x44); // #003344
const OVERLAY_LINE: Color = Color::rgb(0x88, 0xdd, 0xff); // #8df
const OVERLAY_POINT: Color = Color::rgb(0x55, 0xaa, 0xdd); // #5ad

fn overlay_line() -> Technique {
    Technique::SolidLine(LineAttributes {
        color: OVERLAY_LINE,
        metric_unit: MetricUnit::Pixel,
        line_width: 5.0,
    })
}

/// Style set for the GeoJSON overlay: translucent blue polygons with a
/// pixel-wide outline, light-blue lines and dark-blue point circles.
pub fn geojson_style_set() -> StyleSet {
    StyleSet(vec![
        StyleRule {
            when: Condition::geometry_type(GeometryType::Polygon),
            technique: Technique::Fill(FillAttributes {
                color: OVERLAY_FILL,
                transparent: true,
                opacity: 0.8,
                line_width: 1.0,
                line_color: Some(OVERLAY_OUTLINE),
            }),
            render_order: 10000,
        },
        StyleRule {
            when: Condition::geometry_type(GeometryType::Polygon),
            technique: overlay_line(),
            render_order: 10001,
        },
        StyleRule {
            when: Condition::geometry_type(GeometryType::Point),
            technique: Technique::Circles(CircleAttributes {
                size: 10.0,
                color: OVERLAY_POINT,
            }),
            render_order: 10002,
        },
        StyleRule {
            when: Condition::geometry_type(GeometryType::Line),
            technique: overlay_line(),
            render_order: 10000,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geojson_style_set_rules() {
        let style_set = geojson_style_set();
        assert_eq!(style_set.0.len(), 4);

        let rules = &style_set.0;
        let summary: Vec<_> = rules
            .iter()
            .map(|r| (r.when.geometry_type, r.technique.name(), r.render_order))
            .collect();
        assert_eq!(
            summary,
            vec![
                (GeometryType::Polygon, "fill", 10000),
                (GeometryType::Polygon, "solid-line", 10001),
                (GeometryType::Point, "circles", 10002),
                (GeometryType::Line, "solid-line", 10000),
            ]
        );

        assert_eq!(
            rules[0].technique,
            Technique::Fill(FillAttributes {
                color: Color::from_hex("#7cf").unwrap(),
                transparent: true,
                opacity: 0.8,
                line_width: 1.0,
                line_color: Color::from_hex("#003344"),
            })
        );
        let line = Technique::SolidLine(LineAttributes {
            color: Color::from_hex("#8df").unwrap(),
            metric_unit: MetricUnit::Pixel,
            line_width: 5.0,
        });
        assert_eq!(rules[1].technique, line);
        assert_eq!(rules[3].technique, line);
        assert_eq!(
            rules[2].technique,
            Technique::Circles(CircleAttributes {
                size: 10.0,
                color: Color::from_hex("#5ad").unwrap(),
            })
        );
    }

    #[test]
    fn test_style_set_is_stable() {
        assert_eq!(geojson_style_set(), geojson_style_set());
    }

    #[test]
    fn test_matching_keeps_list_order() {
        let style_set = geojson_style_set();
        let orders: Vec<i64> = style_set
            .matching(GeometryType::Polygon)
            .map(|r| r.render_order)
            .collect();
        assert_eq!(orders, vec![10000, 10001]);
        assert_eq!(style_set.matching(GeometryType::Line).count(), 1);
    }

    #[test]
    fn test_condition_parse() {
        assert_eq!(
            Condition::parse("$geometryType == 'polygon'"),
            Some(Condition::geometry_type(GeometryType::Polygon))
        );
        assert_eq!(
            Condition::parse("  $geometryType==\"line\" "),
            Some(Condition::geometry_type(GeometryType::Line))
        );
        assert_eq!(Condition::parse("$geometryType == 'circle'"), None);
        assert_eq!(Condition::parse("$layer == 'water'"), None);
    }

    #[test]
    fn test_rule_wire_format() {
        let json = serde_json::to_value(&geojson_style_set()).unwrap();
        let first = &json[0];
        assert_eq!(first["when"], "$geometryType == 'polygon'");
        assert_eq!(first["technique"], "fill");
        assert_eq!(first["renderOrder"], 10000);
        assert_eq!(first["attr"]["lineColor"], "#003344");
        assert_eq!(json[1]["attr"]["metricUnit"], "Pixel");
    }

    #[test]
    fn test_rule_from_theme_json() {
        let rule: StyleRule = serde_json::from_str(
            r##"{
                "when": "$geometryType == 'point'",
                "technique": "circles",
                "renderOrder": 10002,
                "attr": { "size": 10, "color": "#5ad" }
            }"##,
        )
        .unwrap();
        assert_eq!(rule, geojson_style_set().0[2]);
    }
}
