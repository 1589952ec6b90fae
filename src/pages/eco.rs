use log::info;
use yew::prelude::*;

use crate::components::footer::Footer;
use crate::config;
use crate::count_up::CountUp;
use crate::infographic::ImpactChart;
use crate::materials::ComparisonTable;
use crate::nav::{scroll_to, Nav, NavLink};
use crate::poll::Poll;
use crate::quiz::{HabitQuiz, Impact, ImpactQuiz};
use crate::reveal::component::{Reveal, RevealProvider};
use crate::reveal::controller::RootMargin;

const HEALTH_CARDS: [(&str, &str, &str); 3] = [
    ("🧪", "Plastic lining", "Most paper cups are lined with polyethylene that can release microplastics into hot drinks."),
    ("🔥", "Heat leaching", "Hot liquids speed up the transfer of chemicals from the lining into what you drink."),
    ("🫁", "Hidden additives", "Inks, glues and coatings add compounds you never signed up to swallow."),
];

const ALTERNATIVES: [(&str, &str); 3] = [
    ("♻️", "Stainless steel tumblers keep drinks hot for hours and last for years."),
    ("☕", "Ceramic mugs are perfect for the office and easy to clean."),
    ("🎋", "Bamboo cups are light, renewable and compostable at end of life."),
];

fn section_margin() -> RootMargin {
    RootMargin::bottom(config::SECTION_ROOT_MARGIN_BOTTOM_PX)
}

#[function_component(EcoPage)]
pub fn eco_page() -> Html {
    let impact = use_state(|| None::<Impact>);

    {
        use_effect_with_deps(
            move |_| {
                info!("Rendering awareness page");
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    let on_answer = {
        let impact = impact.clone();
        Callback::from(move |answer: Option<Impact>| impact.set(answer))
    };

    let links = vec![
        NavLink { id: "health", label: "Health" },
        NavLink { id: "stats", label: "Facts" },
        NavLink { id: "alternatives", label: "Alternatives" },
        NavLink { id: "quiz", label: "Quiz" },
        NavLink { id: "poll", label: "Poll" },
    ];

    html! {
        <RevealProvider>
            <div class="eco-page">
                <Nav brand="Say No to Paper Cups" {links} />
                <header class="hero">
                    <h1>{"Say No to Paper Cups"}</h1>
                    <p class="hero-subtitle">{"Every cup you skip saves trees, water and your own health."}</p>
                    <button class="hero-cta" onclick={Callback::from(|_: MouseEvent| scroll_to("health"))}>
                        {"Learn why"}
                    </button>
                </header>

                <Reveal id="health" class="section" root_margin={section_margin()}>
                    <h2>{"What's in your cup?"}</h2>
                    <div class="cards">
                        { for HEALTH_CARDS.iter().map(|(icon, title, text)| html! {
                            <Reveal class="card" stagger_ms={config::CARD_STAGGER_MS}>
                                <div class="card-icon">{*icon}</div>
                                <h3>{*title}</h3>
                                <p>{*text}</p>
                            </Reveal>
                        }) }
                    </div>
                </Reveal>

                <Reveal id="stats" class="section" root_margin={section_margin()}>
                    <h2>{"By the numbers"}</h2>
                    <div class="stats">
                        <CountUp label="500 billion" caption="disposable cups used worldwide every year" />
                        <CountUp label="20" caption="cups made from a single tree" />
                        <CountUp label="1" caption="reusable cup is all it takes" duration_ms={600} />
                    </div>
                </Reveal>

                <Reveal id="alternatives" class="section" root_margin={section_margin()}>
                    <h2>{"Better alternatives"}</h2>
                    <div class="cards">
                        { for ALTERNATIVES.iter().map(|(icon, text)| html! {
                            <Reveal class="alt-card" stagger_ms={config::CARD_STAGGER_MS}>
                                <div class="card-icon">{*icon}</div>
                                <p>{*text}</p>
                            </Reveal>
                        }) }
                    </div>
                    <ComparisonTable />
                </Reveal>

                <Reveal id="quiz" class="section" root_margin={section_margin()}>
                    <h2>{"Check your impact"}</h2>
                    <ImpactQuiz {on_answer} />
                    <ImpactChart impact={*impact} />
                    <HabitQuiz />
                </Reveal>

                <Reveal id="poll" class="section" root_margin={section_margin()}>
                    <h2>{"Quick poll"}</h2>
                    <Poll />
                </Reveal>

                <Footer owner="EcoAware" note={Some(AttrValue::from("Every choice matters. Make yours count."))} />
            </div>
        </RevealProvider>
    }
}
