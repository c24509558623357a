//! The bar chart render pipeline.
//!
//! `render` is the widget's single recompute entry point: margins → grid →
//! bar layout → bars/labels/markers → title. It never fails; malformed
//! states degrade (0 for sums, omitted markers) and degenerate sizes
//! produce degenerate but valid scenes.

use crate::primitive::{
    HitRegion, LineShape, Primitive, RectShape, Scene, TextAnchor, TextShape,
};
use crate::scale::BarScale;
use crate::{ChartDimensions, ChartMargin};
use sensorbars_core::{
    colors, parse_state, BarConfig, CardConfig, DecimalFormatter, ScaleMode, StateProvider,
    ValueFormatter,
};

/// Render the card into a fresh scene.
///
/// Pure with respect to its inputs: identical configuration, states, and
/// surface size produce an identical primitive sequence. `width`/`height`
/// are the host layout's current surface size; non-positive dimensions
/// fall back to 300×200.
pub fn render(cfg: &CardConfig, states: &dyn StateProvider, width: f64, height: f64) -> Scene {
    let dims = ChartDimensions::from_host(width, height)
        .with_margin(ChartMargin::for_unit_label(cfg.grid.font_size_unit));
    let inner_w = dims.inner_width();
    let inner_h = dims.inner_height();
    if inner_w <= 0.0 || inner_h <= 0.0 {
        tracing::debug!(width, height, "degenerate plot area");
    }

    let scale = BarScale::from_config(cfg, inner_h);
    let mut primitives = Vec::new();
    let mut hit_regions = Vec::new();

    render_grid(cfg, &scale, inner_w, inner_h, &dims.margin, &mut primitives);
    render_bars(
        cfg,
        &scale,
        states,
        inner_w,
        inner_h,
        &dims.margin,
        &mut primitives,
        &mut hit_regions,
    );
    render_title(cfg, dims.width, &dims.margin, &mut primitives);

    Scene {
        width: dims.width,
        height: dims.height,
        primitives,
        hit_regions,
    }
}

fn render_grid(
    cfg: &CardConfig,
    scale: &BarScale,
    width: f64,
    height: f64,
    margin: &ChartMargin,
    out: &mut Vec<Primitive>,
) {
    let g = &cfg.grid;
    let fmt = DecimalFormatter::new(g.decimal as usize, cfg.decimal_separator.clone());

    for tick in scale.ticks(g.lines, &fmt) {
        let y = margin.top + tick.y;
        out.push(Primitive::Line(
            LineShape::new(margin.left, y, margin.left + width, y, g.color.clone())
                .stroke_width(g.width)
                .dash(g.dash.clone()),
        ));
        out.push(Primitive::Text(
            TextShape::new(margin.left - 10.0, y, tick.label, g.font_size, g.font_color.clone())
                .anchor(TextAnchor::End)
                .middle_baseline(),
        ));
    }

    let axis = |x1: f64, y1: f64, x2: f64, y2: f64| {
        Primitive::Line(
            LineShape::new(x1, y1, x2, y2, g.axis_color.clone()).stroke_width(g.axis_width),
        )
    };
    // left vertical axis in every mode
    out.push(axis(
        margin.left,
        margin.top,
        margin.left,
        margin.top + height,
    ));
    match scale.mode() {
        ScaleMode::Linear | ScaleMode::LogPositive => {
            out.push(axis(
                margin.left,
                margin.top + height,
                margin.left + width,
                margin.top + height,
            ));
        }
        ScaleMode::LogSymmetric => {
            let center = margin.top + height / 2.0;
            out.push(axis(margin.left, center, margin.left + width, center));
        }
    }

    if !g.unit.is_empty() {
        out.push(Primitive::Text(
            TextShape::new(
                margin.left - 35.0,
                margin.top + height / 2.0,
                g.unit.clone(),
                g.font_size_unit,
                g.font_color.clone(),
            )
            .anchor(TextAnchor::Middle)
            .rotate(-90.0),
        ));
    }
}

fn render_bars(
    cfg: &CardConfig,
    scale: &BarScale,
    states: &dyn StateProvider,
    width: f64,
    height: f64,
    margin: &ChartMargin,
    out: &mut Vec<Primitive>,
    hits: &mut Vec<HitRegion>,
) {
    if cfg.bars.is_empty() {
        return;
    }
    let spacing = width / cfg.bars.len() as f64;
    let bar_width = spacing * 0.8;
    let baseline = scale.baseline();

    for (i, bar) in cfg.bars.iter().enumerate() {
        let x = margin.left + i as f64 * spacing + (spacing - bar_width) / 2.0;
        let sum = sum_states(bar, states);
        let off = scale.offset(sum);
        let bar_y = margin.top + if off.upward { baseline - off.magnitude } else { baseline };

        out.push(Primitive::Rect(RectShape::new(
            x,
            bar_y,
            bar_width,
            off.magnitude,
            bar.color.clone(),
        )));
        hits.push(HitRegion {
            bar: i,
            x,
            y: bar_y,
            width: bar_width,
            height: off.magnitude,
        });

        let fmt = DecimalFormatter::new(
            bar.label_decimals(cfg) as usize,
            cfg.decimal_separator.clone(),
        );
        let mut label = fmt.format(sum);
        if !cfg.grid.unit.is_empty() {
            label.push(' ');
            label.push_str(&cfg.grid.unit);
        }
        // positive-log geometry never points downward, so neither does its label
        let label_up = match scale.mode() {
            ScaleMode::LogPositive => true,
            _ => sum >= 0.0,
        };
        let label_y = if label_up {
            bar_y - 4.0
        } else {
            bar_y + off.magnitude + bar.font_size
        };
        out.push(Primitive::Text(
            TextShape::new(
                x + bar_width / 2.0,
                label_y,
                label,
                bar.font_size,
                colors::VALUE_LABEL,
            )
            .anchor(TextAnchor::Middle),
        ));

        if let Some(max_id) = &bar.max_entity {
            match parse_state(states.state(max_id)) {
                Some(max_val) => {
                    let marker = &cfg.max_marker;
                    let marker_y = margin.top + scale.y_for(max_val);
                    let marker_fmt = DecimalFormatter::new(
                        marker.decimal as usize,
                        cfg.decimal_separator.clone(),
                    );
                    out.push(Primitive::Rect(RectShape::new(
                        x,
                        marker_y,
                        bar_width,
                        marker.height,
                        marker.color.clone(),
                    )));
                    out.push(Primitive::Text(
                        TextShape::new(
                            x + bar_width - 5.0,
                            marker_y - 5.0,
                            marker_fmt.format(max_val),
                            marker.font_size,
                            marker.color.clone(),
                        )
                        .anchor(TextAnchor::End),
                    ));
                }
                None => {
                    tracing::debug!(entity = %max_id, "max marker state not numeric, marker omitted");
                }
            }
        }

        if let Some(name) = &bar.name {
            out.push(Primitive::Text(
                TextShape::new(
                    x + bar_width / 2.0,
                    margin.top + height + bar.font_size,
                    name.clone(),
                    bar.font_size,
                    colors::NAME_LABEL,
                )
                .anchor(TextAnchor::Middle),
            ));
        }
    }
}

fn render_title(cfg: &CardConfig, full_width: f64, margin: &ChartMargin, out: &mut Vec<Primitive>) {
    if cfg.title.is_empty() {
        return;
    }
    out.push(Primitive::Text(
        TextShape::new(
            full_width / 2.0,
            margin.top / 2.0,
            cfg.title.clone(),
            cfg.font_size,
            colors::VALUE_LABEL,
        )
        .anchor(TextAnchor::Middle)
        .bold(),
    ));
}

/// Sum the bar's entity values; states that fail to parse contribute 0.
fn sum_states(bar: &BarConfig, states: &dyn StateProvider) -> f64 {
    bar.keys()
        .iter()
        .map(|id| match parse_state(states.state(id)) {
            Some(value) => value,
            None => {
                tracing::debug!(entity = %id, "state not numeric, contributes 0");
                0.0
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensorbars_core::{Action, EntityId};
    use serde_json::json;
    use std::collections::HashMap;

    const EPS: f64 = 1e-9;

    fn states(pairs: &[(&str, &str)]) -> HashMap<EntityId, String> {
        pairs
            .iter()
            .map(|(k, v)| (EntityId::new(*k), v.to_string()))
            .collect()
    }

    fn config(value: serde_json::Value) -> CardConfig {
        CardConfig::from_json(value).unwrap()
    }

    fn bar_rects(scene: &Scene) -> Vec<&RectShape> {
        scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Rect(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn texts(scene: &Scene) -> Vec<&TextShape> {
        scene
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_linear_bar_geometry() {
        // 300x200 surface, default margins (left 45, right 20, top 40,
        // bottom 30) leave a 235x130 plot
        let cfg = config(json!({
            "bars": [{ "entity": "sensor.a" }]
        }));
        let scene = render(&cfg, &states(&[("sensor.a", "50")]), 300.0, 200.0);

        let rects = bar_rects(&scene);
        assert_eq!(rects.len(), 1);
        let bar = rects[0];
        // half of the 130px plot height, anchored on the bottom baseline
        assert!((bar.height - 65.0).abs() < EPS);
        assert!((bar.y - (40.0 + 65.0)).abs() < EPS);
        assert!((bar.y + bar.height - 170.0).abs() < EPS);
        // one bar spans the full spacing, 80% wide, centered
        assert!((bar.width - 235.0 * 0.8).abs() < EPS);
        assert!((bar.x - (45.0 + 235.0 * 0.1)).abs() < EPS);
    }

    #[test]
    fn test_log_symmetric_pair_mirrors() {
        let cfg = config(json!({
            "logarithmic": true,
            "bars": [{ "entity": "sensor.up" }, { "entity": "sensor.down" }]
        }));
        let scene = render(
            &cfg,
            &states(&[("sensor.up", "10"), ("sensor.down", "-10")]),
            300.0,
            200.0,
        );

        let rects = bar_rects(&scene);
        assert_eq!(rects.len(), 2);
        let expected = (11.0f64).log10() / (101.0f64).log10() * 65.0;
        let baseline = 40.0 + 65.0;
        assert!((rects[0].height - expected).abs() < 1e-6);
        assert!((rects[1].height - expected).abs() < 1e-6);
        // +10 ends on the baseline, -10 starts there
        assert!((rects[0].y + rects[0].height - baseline).abs() < 1e-6);
        assert!((rects[1].y - baseline).abs() < 1e-6);
    }

    #[test]
    fn test_zero_bars_renders_grid_only() {
        let cfg = config(json!({ "title": "Empty" }));
        let scene = render(&cfg, &states(&[]), 300.0, 200.0);
        assert!(bar_rects(&scene).is_empty());
        assert!(scene.hit_regions.is_empty());
        // grid ticks and axes are still there, and all geometry is finite
        assert!(scene
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::Line(_))));
        for p in &scene.primitives {
            if let Primitive::Line(l) = p {
                assert!(l.x1.is_finite() && l.y1.is_finite());
            }
        }
        assert!(texts(&scene).iter().any(|t| t.content == "Empty"));
    }

    #[test]
    fn test_unparsable_state_contributes_zero() {
        let cfg = config(json!({
            "bars": [{ "entities": ["sensor.a", "sensor.b"], "decimals": 0 }]
        }));
        let scene = render(
            &cfg,
            &states(&[("sensor.a", "10"), ("sensor.b", "bad")]),
            300.0,
            200.0,
        );
        assert!(texts(&scene).iter().any(|t| t.content == "10"));
    }

    #[test]
    fn test_unparsable_max_state_omits_marker() {
        let cfg = config(json!({
            "bars": [{ "entity": "sensor.a", "max_entity": "sensor.peak" }]
        }));
        let scene = render(
            &cfg,
            &states(&[("sensor.a", "50"), ("sensor.peak", "unknown")]),
            300.0,
            200.0,
        );
        // only the bar rect, no marker rect or marker label
        assert_eq!(bar_rects(&scene).len(), 1);
    }

    #[test]
    fn test_marker_uses_own_styling() {
        let cfg = config(json!({
            "max_marker": { "color": "#f00", "decimal": 0 },
            "bars": [{ "entity": "sensor.a", "max_entity": "sensor.peak", "decimals": 3 }]
        }));
        let scene = render(
            &cfg,
            &states(&[("sensor.a", "50"), ("sensor.peak", "80")]),
            300.0,
            200.0,
        );
        let rects = bar_rects(&scene);
        assert_eq!(rects.len(), 2);
        let marker = rects[1];
        assert_eq!(marker.fill, "#f00");
        assert!((marker.height - 2.0).abs() < EPS);
        // 80/100 of the 130px plot, measured down from the top margin
        assert!((marker.y - (40.0 + 130.0 - 104.0)).abs() < EPS);
        assert!(texts(&scene).iter().any(|t| t.content == "80" && t.fill == "#f00"));
    }

    #[test]
    fn test_value_label_includes_unit() {
        let cfg = config(json!({
            "grid": { "unit": "W" },
            "bars": [{ "entity": "sensor.a", "decimals": 1 }]
        }));
        let scene = render(&cfg, &states(&[("sensor.a", "50")]), 300.0, 200.0);
        assert!(texts(&scene).iter().any(|t| t.content == "50.0 W"));
        // the rotated unit label is emitted too
        assert!(texts(&scene)
            .iter()
            .any(|t| t.content == "W" && t.rotate == Some(-90.0)));
    }

    #[test]
    fn test_render_is_idempotent() {
        let cfg = config(json!({
            "title": "Power",
            "logarithmic": true,
            "bars": [
                { "entity": "sensor.a", "max_entity": "sensor.peak", "name": "A" },
                { "entities": ["sensor.b", "sensor.c"] }
            ]
        }));
        let lookup = states(&[
            ("sensor.a", "12.5"),
            ("sensor.peak", "40"),
            ("sensor.b", "-3"),
            ("sensor.c", "9"),
        ]);
        let first = render(&cfg, &lookup, 640.0, 360.0);
        let second = render(&cfg, &lookup, 640.0, 360.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_hit_region_resolves_tap_action() {
        let cfg = config(json!({
            "bars": [{
                "entity": "sensor.a",
                "tap_action": { "action": "navigate", "navigation_path": "/foo" }
            }]
        }));
        let scene = render(&cfg, &states(&[("sensor.a", "50")]), 300.0, 200.0);
        let region = &scene.hit_regions[0];
        let bar = scene
            .hit(region.x + region.width / 2.0, region.y + region.height / 2.0)
            .unwrap();
        assert_eq!(
            cfg.bars[bar].resolve_action(),
            Some(Action::Navigate("/foo".into()))
        );
    }

    #[test]
    fn test_degenerate_surface_still_renders() {
        let cfg = config(json!({ "bars": [{ "entity": "sensor.a" }] }));
        // smaller than the margins; inner plot collapses to zero
        let scene = render(&cfg, &states(&[("sensor.a", "50")]), 50.0, 50.0);
        assert_eq!(scene.width, 50.0);
        assert_eq!(bar_rects(&scene).len(), 1);
    }

    #[test]
    fn test_fallback_surface_size() {
        let cfg = config(json!({}));
        let scene = render(&cfg, &states(&[]), 0.0, 0.0);
        assert_eq!(scene.width, 300.0);
        assert_eq!(scene.height, 200.0);
    }

    #[test]
    fn test_negative_linear_value_draws_below_baseline() {
        let cfg = config(json!({
            "grid": { "min": -100.0, "max": 100.0 },
            "bars": [{ "entity": "sensor.a", "decimals": 0 }]
        }));
        let scene = render(&cfg, &states(&[("sensor.a", "-40")]), 300.0, 200.0);
        let bar = bar_rects(&scene)[0];
        let baseline = 40.0 + 65.0; // zero centered in the 130px plot
        assert!((bar.y - baseline).abs() < EPS);
        assert!((bar.height - 26.0).abs() < EPS);
        // label sits below the bar
        let label = texts(&scene)
            .into_iter()
            .find(|t| t.content == "-40")
            .unwrap();
        assert!(label.y > bar.y + bar.height);
    }
}
