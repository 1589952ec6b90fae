use log::warn;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::quiz::Impact;

const WIDTH: u32 = 600;
const HEIGHT: u32 = 360;

/// Bars shown for an answer, as (label, value) pairs.
pub fn bars(impact: &Impact) -> Vec<(&'static str, f64)> {
    vec![
        ("Cups / year", impact.yearly_cups as f64),
        ("Trees x10", impact.trees * 10.0),
        ("Waste (100 g)", impact.waste_kg * 10.0),
    ]
}

/// Upper bound of the y axis: 10% headroom, never zero.
pub fn y_max(bars: &[(&str, f64)]) -> f64 {
    let max = bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

fn draw(canvas: HtmlCanvasElement, impact: &Impact) -> Result<(), String> {
    canvas.set_width(WIDTH);
    canvas.set_height(HEIGHT);
    let backend = CanvasBackend::with_canvas_object(canvas).ok_or("canvas has no 2d context")?;
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(|e| e.to_string())?;

    let data = bars(impact);
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption("Your yearly paper cup footprint", ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..data.len(), 0.0..y_max(&data))
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(data.len())
        .x_label_formatter(&|x| data.get(*x).map(|(label, _)| label.to_string()).unwrap_or_default())
        .draw()
        .map_err(|e| e.to_string())?;

    let green = RGBColor(45, 106, 79);
    chart
        .draw_series(data.iter().enumerate().map(|(i, (_, value))| {
            Rectangle::new([(i, 0.0), (i + 1, *value)], green.filled())
        }))
        .map_err(|e| e.to_string())?;

    root.present().map_err(|e| e.to_string())
}

#[derive(Properties, PartialEq)]
pub struct ImpactChartProps {
    pub impact: Option<Impact>,
}

#[function_component(ImpactChart)]
pub fn impact_chart(props: &ImpactChartProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with_deps(move |impact| {
            if let (Some(canvas), Some(impact)) = (canvas_ref.cast::<HtmlCanvasElement>(), impact) {
                if let Err(e) = draw(canvas, impact) {
                    warn!("infographic: {}", e);
                }
            }
            || ()
        }, props.impact);
    }

    html! {
        <div class={classes!("impact-chart", props.impact.is_none().then(|| "empty"))}>
            <canvas ref={canvas_ref} width={WIDTH.to_string()} height={HEIGHT.to_string()} style="max-width: 100%;" />
            if props.impact.is_none() {
                <p class="chart-note">{"Answer the quiz to see your footprint."}</p>
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::impact;
    use pretty_assertions::assert_eq;

    #[test]
    fn bars_follow_impact() {
        let data = bars(&impact(10));
        assert_eq!(data[0], ("Cups / year", 520.0));
        assert!((data[1].1 - 260.0).abs() < 1e-9);
        assert!((data[2].1 - 57.2).abs() < 1e-9);
    }

    #[test]
    fn axis_has_headroom_and_is_never_empty() {
        assert!((y_max(&bars(&impact(10))) - 572.0).abs() < 1e-9);
        assert_eq!(y_max(&bars(&impact(0))), 1.0);
    }
}
