use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::config;
use crate::reveal::component::Reveal;

/// Digits of a statistic label, e.g. "500 billion" -> 500.
pub fn parse_target(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

pub fn value_at(start: u64, end: u64, elapsed_ms: f64, duration_ms: f64) -> u64 {
    let progress = if duration_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    };
    let value = start as f64 + progress * (end as f64 - start as f64);
    value.floor().max(0.0) as u64
}

pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Properties, PartialEq)]
pub struct CountUpProps {
    pub label: AttrValue,
    pub caption: AttrValue,
    #[prop_or(config::COUNT_UP_DURATION_MS)]
    pub duration_ms: u32,
}

/// A statistic that counts up from zero the first time it scrolls into view.
#[function_component(CountUp)]
pub fn count_up(props: &CountUpProps) -> Html {
    let target = parse_target(&props.label);
    let started = use_state(|| false);
    let elapsed = use_state(|| 0u32);

    let running = *started && *elapsed < props.duration_ms;
    {
        let elapsed = elapsed.clone();
        let duration = props.duration_ms;
        use_effect_with_deps(move |running| {
            let mut ticks = 0u32;
            let interval = running.then(|| {
                Interval::new(config::COUNT_UP_FRAME_MS, move || {
                    ticks += 1;
                    elapsed.set((ticks * config::COUNT_UP_FRAME_MS).min(duration));
                })
            });
            move || drop(interval)
        }, running);
    }

    let on_reveal = {
        let started = started.clone();
        Callback::from(move |_: ()| started.set(true))
    };

    let shown = match target {
        Some(end) if *elapsed < props.duration_ms => {
            let value = value_at(0, end, *elapsed as f64, props.duration_ms as f64);
            let suffix = props.label.trim_start_matches(|c: char| c.is_ascii_digit() || c == ',');
            format!("{}{}", format_thousands(value), suffix)
        }
        _ => props.label.to_string(),
    };

    html! {
        <Reveal class="stat" threshold={0.5} {on_reveal}>
            <span class="stat-number">{shown}</span>
            <span class="stat-caption">{props.caption.clone()}</span>
        </Reveal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_keeps_only_digits() {
        assert_eq!(parse_target("500 billion"), Some(500));
        assert_eq!(parse_target("1,200,000+"), Some(1_200_000));
        assert_eq!(parse_target("many"), None);
    }

    #[test]
    fn value_is_linear_and_clamped() {
        assert_eq!(value_at(0, 1000, 0.0, 2000.0), 0);
        assert_eq!(value_at(0, 1000, 1000.0, 2000.0), 500);
        assert_eq!(value_at(0, 1000, 4000.0, 2000.0), 1000);
        assert_eq!(value_at(0, 7, 999.0, 2000.0), 3);
        assert_eq!(value_at(0, 10, 5.0, 0.0), 10);
    }

    #[test]
    fn thousands_separators() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }
}
