use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Material {
    pub name: &'static str,
    pub sustainability: u8,
    pub durability: u8,
    pub heat: u8,
    /// Lower is lighter.
    pub weight: u8,
    /// Lower is cheaper.
    pub cost: u8,
}

pub const MATERIALS: [Material; 3] = [
    Material { name: "Stainless steel", sustainability: 4, durability: 5, heat: 5, weight: 3, cost: 3 },
    Material { name: "Ceramic", sustainability: 4, durability: 4, heat: 5, weight: 4, cost: 2 },
    Material { name: "Bamboo", sustainability: 5, durability: 3, heat: 3, weight: 2, cost: 2 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    Sustainability,
    Durability,
    Heat,
    Weight,
    Cost,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Sustainability,
        Priority::Durability,
        Priority::Heat,
        Priority::Weight,
        Priority::Cost,
    ];

    pub fn value(self) -> &'static str {
        match self {
            Priority::Sustainability => "sustainability",
            Priority::Durability => "durability",
            Priority::Heat => "heat",
            Priority::Weight => "weight",
            Priority::Cost => "cost",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Sustainability => "Sustainability",
            Priority::Durability => "Durability",
            Priority::Heat => "Heat retention",
            Priority::Weight => "Lightest",
            Priority::Cost => "Cheapest",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == value)
    }

    fn score(self, material: &Material) -> u8 {
        match self {
            Priority::Sustainability => material.sustainability,
            Priority::Durability => material.durability,
            Priority::Heat => material.heat,
            Priority::Weight => material.weight,
            Priority::Cost => material.cost,
        }
    }

    fn ascending(self) -> bool {
        matches!(self, Priority::Weight | Priority::Cost)
    }
}

/// Weight and cost sort ascending, ratings descending. Ties keep input order.
pub fn sort_by(rows: &[Material], priority: Priority) -> Vec<Material> {
    let mut sorted = rows.to_vec();
    if priority.ascending() {
        sorted.sort_by_key(|m| priority.score(m));
    } else {
        sorted.sort_by_key(|m| std::cmp::Reverse(priority.score(m)));
    }
    sorted
}

pub fn stars(rating: u8) -> String {
    let filled = rating.min(5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

pub fn weight_label(weight: u8) -> &'static str {
    match weight {
        0..=2 => "Light",
        3 => "Medium",
        _ => "Heavy",
    }
}

pub fn cost_label(cost: u8) -> &'static str {
    match cost {
        0 | 1 => "$",
        2 => "$$",
        3 => "$$$",
        _ => "$$$$",
    }
}

#[function_component(ComparisonTable)]
pub fn comparison_table() -> Html {
    let priority = use_state(|| Priority::Sustainability);

    let on_change = {
        let priority = priority.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(p) = Priority::from_value(&select.value()) {
                priority.set(p);
            }
        })
    };

    html! {
        <div class="comparison">
            <label for="priority">{"Sort by "}</label>
            <select id="priority" onchange={on_change}>
                { for Priority::ALL.iter().map(|p| html! {
                    <option value={p.value()} selected={*p == *priority}>{p.label()}</option>
                }) }
            </select>
            <table class="comp-table">
                <thead>
                    <tr>
                        <th>{"Material"}</th>
                        <th>{"Sustainability"}</th>
                        <th>{"Durability"}</th>
                        <th>{"Heat"}</th>
                        <th>{"Weight"}</th>
                        <th>{"Cost"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for sort_by(&MATERIALS, *priority).into_iter().map(|m| html! {
                        <tr key={m.name}>
                            <td>{m.name}</td>
                            <td>{stars(m.sustainability)}</td>
                            <td>{stars(m.durability)}</td>
                            <td>{stars(m.heat)}</td>
                            <td>{weight_label(m.weight)}</td>
                            <td>{cost_label(m.cost)}</td>
                        </tr>
                    }) }
                </tbody>
            </table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(rows: Vec<Material>) -> Vec<&'static str> {
        rows.into_iter().map(|m| m.name).collect()
    }

    #[test]
    fn ratings_sort_descending_and_stably() {
        assert_eq!(
            names(sort_by(&MATERIALS, Priority::Durability)),
            vec!["Stainless steel", "Ceramic", "Bamboo"]
        );
        assert_eq!(
            names(sort_by(&MATERIALS, Priority::Heat)),
            vec!["Stainless steel", "Ceramic", "Bamboo"]
        );
        assert_eq!(
            names(sort_by(&MATERIALS, Priority::Sustainability)),
            vec!["Bamboo", "Stainless steel", "Ceramic"]
        );
    }

    #[test]
    fn weight_and_cost_sort_ascending() {
        assert_eq!(
            names(sort_by(&MATERIALS, Priority::Weight)),
            vec!["Bamboo", "Stainless steel", "Ceramic"]
        );
        assert_eq!(
            names(sort_by(&MATERIALS, Priority::Cost)),
            vec!["Ceramic", "Bamboo", "Stainless steel"]
        );
    }

    #[test]
    fn labels() {
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(9), "★★★★★");
        assert_eq!(weight_label(2), "Light");
        assert_eq!(weight_label(4), "Heavy");
        assert_eq!(cost_label(1), "$");
        assert_eq!(cost_label(3), "$$$");
    }

    #[test]
    fn priority_values() {
        assert_eq!(Priority::from_value("cost"), Some(Priority::Cost));
        assert_eq!(Priority::from_value("price"), None);
    }
}
