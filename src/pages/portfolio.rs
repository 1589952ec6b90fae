use log::info;
use yew::prelude::*;

use crate::components::footer::Footer;
use crate::config;
use crate::contact::ContactSection;
use crate::nav::{scroll_to, Nav, NavLink};
use crate::reveal::component::{Reveal, RevealProvider};
use crate::reveal::controller::RootMargin;

struct Project {
    title: &'static str,
    summary: &'static str,
    stack: &'static [&'static str],
}

const PROJECTS: [Project; 4] = [
    Project {
        title: "PhotonDesk",
        summary: "Collaborative note-taking with real-time sync and markdown power.",
        stack: &["Rust", "WebSocket", "CRDT"],
    },
    Project {
        title: "ShopSwift",
        summary: "A headless storefront demo with fast search and checkout.",
        stack: &["Yew", "GraphQL", "SSR"],
    },
    Project {
        title: "Vizly",
        summary: "Dashboards and canvas-rendered charts for big datasets.",
        stack: &["Canvas", "plotters", "Postgres"],
    },
    Project {
        title: "AuthFlow",
        summary: "A small authentication service with refresh tokens and RBAC.",
        stack: &["axum", "JWT", "OAuth2"],
    },
];

const SKILLS: [(&str, u32); 5] = [
    ("Rust", 90),
    ("Frontend / WebAssembly", 85),
    ("Backend services", 85),
    ("Databases", 80),
    ("Testing & CI/CD", 75),
];

#[derive(Properties, PartialEq)]
struct SkillBarProps {
    name: AttrValue,
    level: u32,
}

/// Skill meter that fills once it scrolls into view.
#[function_component(SkillBar)]
fn skill_bar(props: &SkillBarProps) -> Html {
    let filled = use_state(|| false);
    let on_reveal = {
        let filled = filled.clone();
        Callback::from(move |_: ()| filled.set(true))
    };
    let width = if *filled { props.level } else { 0 };

    html! {
        <Reveal class="skill" stagger_ms={config::CARD_STAGGER_MS} {on_reveal}>
            <div class="skill-head">
                <span>{props.name.clone()}</span>
                <span>{format!("{}%", props.level)}</span>
            </div>
            <div class="bar"><div class="fill" style={format!("width: {}%;", width)}></div></div>
        </Reveal>
    }
}

#[function_component(PortfolioPage)]
pub fn portfolio_page() -> Html {
    {
        use_effect_with_deps(
            move |_| {
                info!("Rendering portfolio page");
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    let links = vec![
        NavLink { id: "about", label: "About" },
        NavLink { id: "skills", label: "Skills" },
        NavLink { id: "projects", label: "Projects" },
        NavLink { id: "contact", label: "Contact" },
    ];
    let margin = RootMargin::bottom(config::SECTION_ROOT_MARGIN_BOTTOM_PX);

    html! {
        <RevealProvider>
            <div class="portfolio-page">
                <Nav brand="Aarav Mehta" {links} />
                <header class="hero">
                    <h1>{"Aarav Mehta"}</h1>
                    <p class="hero-subtitle">{"Full-stack developer building fast, reliable, beautiful web experiences."}</p>
                    <button class="hero-cta" onclick={Callback::from(|_: MouseEvent| scroll_to("projects"))}>
                        {"See my work"}
                    </button>
                </header>

                <Reveal id="about" class="section" root_margin={margin}>
                    <h2>{"About"}</h2>
                    <p>
                        {"I'm a pragmatic developer who enjoys turning ideas into clean, maintainable code. \
                          Outside of work I tinker with UI animation, open-source tools and coffee."}
                    </p>
                </Reveal>

                <Reveal id="skills" class="section" root_margin={margin}>
                    <h2>{"Skills"}</h2>
                    { for SKILLS.iter().map(|(name, level)| html! {
                        <SkillBar name={*name} level={*level} />
                    }) }
                </Reveal>

                <Reveal id="projects" class="section" root_margin={margin}>
                    <h2>{"Projects"}</h2>
                    <div class="cards">
                        { for PROJECTS.iter().map(|project| html! {
                            <Reveal class="card project-card" stagger_ms={config::CARD_STAGGER_MS}>
                                <h3>{project.title}</h3>
                                <p>{project.summary}</p>
                                <ul class="stack">
                                    { for project.stack.iter().map(|tech| html! { <li>{*tech}</li> }) }
                                </ul>
                            </Reveal>
                        }) }
                    </div>
                </Reveal>

                <Reveal id="contact" class="section" root_margin={margin}>
                    <h2>{"Contact"}</h2>
                    <ContactSection />
                </Reveal>

                <Footer owner="Aarav Mehta" />
            </div>
        </RevealProvider>
    }
}
