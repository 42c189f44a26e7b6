#![forbid(unsafe_code)]

//! Scripted replay against a synthetic chart.

use rankbar::{ChartOptionsPatch, HorizontalChart, PointerResult, SortOrder};
use rankbar_harness::{dataset, script};

fn chart(rows: usize) -> HorizontalChart {
    let mut chart = HorizontalChart::init(700.0, 560.0).unwrap();
    chart.set_simple_options(
        ChartOptionsPatch::new()
            .data(dataset::synthetic(rows, 42))
            .sort(Some(SortOrder::Desc)),
    );
    chart.render().unwrap();
    chart
}

#[test]
fn wheel_then_drag_then_track() {
    let mut chart = chart(1000);
    let thumb = chart.controller().unwrap().thumb_rect();
    let (x, y) = (thumb.x + thumb.width / 2.0, thumb.y + thumb.height / 2.0);
    let source = format!(
        "wheel 600\n\
         down {x} {y}\n\
         move {x} {}\n\
         up {x} {}\n\
         leave\n",
        y + 50.0,
        y + 50.0
    );
    let steps = script::parse(&source, (350.0, 280.0)).unwrap();
    let results = script::replay(&mut chart, &steps);
    assert_eq!(results[0], PointerResult::Scrolled);
    assert_eq!(results[1], PointerResult::DragStarted);
    assert_eq!(results[2], PointerResult::Scrolled);
    assert_eq!(results[3], PointerResult::DragEnded);

    let ctl = chart.controller().unwrap();
    assert!(!ctl.is_dragging());
    assert!(ctl.scroll_y() > 600.0);
    assert_eq!(ctl.list().visible_range(), ctl.list().range_for(ctl.scroll_y()));
}

#[test]
fn sorted_synthetic_data_is_descending() {
    let chart = chart(300);
    let amounts: Vec<f64> = chart.options().data.iter().map(|r| r.amount).collect();
    assert!(amounts.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn scroll_step_and_svg_output() {
    let mut chart = chart(100);
    let steps = script::parse("scroll 100000", (0.0, 0.0)).unwrap();
    script::replay(&mut chart, &steps);
    let ctl = chart.controller().unwrap();
    assert_eq!(ctl.scroll_y(), ctl.max_scroll_y());
    assert_eq!(ctl.list().visible_range().end, 100);

    let svg = chart.to_svg();
    assert!(svg.contains("Store #"));
    assert!(svg.contains("clip-path"));
}
