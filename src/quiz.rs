use log::debug;
use yew::prelude::*;

/// Rough per-cup figures used by the impact calculator.
const CUPS_PER_TREE: f64 = 20.0;
const KG_PER_CUP: f64 = 0.011;
const WEEKS_PER_YEAR: u32 = 52;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub weekly_cups: u32,
    pub yearly_cups: u32,
    pub trees: f64,
    pub waste_kg: f64,
}

pub fn impact(weekly_cups: u32) -> Impact {
    let yearly_cups = weekly_cups.saturating_mul(WEEKS_PER_YEAR);
    Impact {
        weekly_cups,
        yearly_cups,
        trees: yearly_cups as f64 / CUPS_PER_TREE,
        waste_kg: yearly_cups as f64 * KG_PER_CUP,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    EcoWarrior,
    GoodStart,
    TimeToChange,
    UrgentAction,
}

impl Verdict {
    pub fn for_weekly(weekly_cups: u32) -> Self {
        match weekly_cups {
            0 => Verdict::EcoWarrior,
            1..=5 => Verdict::GoodStart,
            6..=15 => Verdict::TimeToChange,
            _ => Verdict::UrgentAction,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Verdict::EcoWarrior => "Eco Warrior!",
            Verdict::GoodStart => "Good Start!",
            Verdict::TimeToChange => "Time to Change",
            Verdict::UrgentAction => "Urgent Action Needed",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::EcoWarrior => "Amazing! You're already making a positive impact by using reusable cups. Keep inspiring others!",
            Verdict::GoodStart => "You're doing better than average, but there's room for improvement. Consider switching to a reusable cup full-time!",
            Verdict::TimeToChange => "Your paper cup usage is contributing significantly to environmental damage. Make the switch to reusable today!",
            Verdict::UrgentAction => "Your paper cup consumption is extremely high. Switching to reusable cups could save trees, reduce waste, and protect your health!",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Verdict::EcoWarrior => "🏆",
            Verdict::GoodStart => "🌱",
            Verdict::TimeToChange => "🌍",
            Verdict::UrgentAction => "⛔",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum QuizState {
    #[default]
    Asking,
    Answered(Impact),
}

pub enum QuizAction {
    Answer(u32),
    Retake,
}

impl QuizState {
    pub fn reduce(self, action: QuizAction) -> Self {
        match action {
            QuizAction::Answer(weekly) => QuizState::Answered(impact(weekly)),
            QuizAction::Retake => QuizState::Asking,
        }
    }
}

pub struct HabitOption {
    pub key: char,
    pub text: &'static str,
    pub is_correct: bool,
}

pub const HABIT_OPTIONS: [HabitOption; 3] = [
    HabitOption { key: 'A', text: "Grab a paper cup at every coffee stop.", is_correct: false },
    HabitOption { key: 'B', text: "Carry a reusable cup and refill it.", is_correct: true },
    HabitOption { key: 'C', text: "Use paper cups but recycle them afterwards.", is_correct: false },
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HabitCheck {
    pub selected: Option<char>,
}

impl HabitCheck {
    /// First answer wins; later answers are ignored.
    pub fn answer(self, key: char) -> Self {
        match self.selected {
            Some(_) => self,
            None if HABIT_OPTIONS.iter().any(|o| o.key == key) => Self { selected: Some(key) },
            None => self,
        }
    }

    pub fn is_correct(&self) -> Option<bool> {
        let key = self.selected?;
        HABIT_OPTIONS.iter().find(|o| o.key == key).map(|o| o.is_correct)
    }

    /// Progress bar fill shown next to the result.
    pub fn score(&self) -> u32 {
        match self.selected {
            Some('B') => 75,
            Some('A') => 30,
            Some(_) => 50,
            None => 0,
        }
    }
}

const ANSWERS: [(u32, &str); 4] = [
    (0, "None, I use a reusable cup"),
    (3, "1-5 cups"),
    (10, "6-15 cups"),
    (20, "More than 15"),
];

#[derive(Properties, PartialEq)]
pub struct ImpactQuizProps {
    #[prop_or_default]
    pub on_answer: Option<Callback<Option<Impact>>>,
}

#[function_component(ImpactQuiz)]
pub fn impact_quiz(props: &ImpactQuizProps) -> Html {
    let state = use_state(QuizState::default);

    let dispatch = {
        let state = state.clone();
        let on_answer = props.on_answer.clone();
        Callback::from(move |action: QuizAction| {
            let next = (*state).reduce(action);
            debug!("quiz: {:?}", next);
            if let Some(on_answer) = &on_answer {
                on_answer.emit(match next {
                    QuizState::Answered(impact) => Some(impact),
                    QuizState::Asking => None,
                });
            }
            state.set(next);
        })
    };

    match *state {
        QuizState::Asking => html! {
            <div class="quiz-question">
                <h3>{"How many paper cups do you use per week?"}</h3>
                <div class="quiz-buttons">
                    { for ANSWERS.iter().map(|(weekly, label)| {
                        let weekly = *weekly;
                        let onclick = dispatch.reform(move |_: MouseEvent| QuizAction::Answer(weekly));
                        html! { <button class="quiz-btn" {onclick}>{*label}</button> }
                    }) }
                </div>
            </div>
        },
        QuizState::Answered(impact) => {
            let verdict = Verdict::for_weekly(impact.weekly_cups);
            let onclick = dispatch.reform(|_: MouseEvent| QuizAction::Retake);
            html! {
                <div class="quiz-result">
                    <div class="result-icon">{verdict.icon()}</div>
                    <h3>{verdict.title()}</h3>
                    <p>{verdict.message()}</p>
                    <ul class="result-stats">
                        <li>{format!("{} cups per year", impact.yearly_cups)}</li>
                        <li>{format!("{:.2} trees harmed", impact.trees)}</li>
                        <li>{format!("{:.2} kg of waste", impact.waste_kg)}</li>
                    </ul>
                    <button class="quiz-btn" {onclick}>{"Retake quiz"}</button>
                </div>
            }
        }
    }
}

#[function_component(HabitQuiz)]
pub fn habit_quiz() -> Html {
    let check = use_state(HabitCheck::default);

    html! {
        <div class="habit-check">
            <h3>{"What's the best coffee-on-the-go habit?"}</h3>
            <div class="quiz-options">
                { for HABIT_OPTIONS.iter().map(|option| {
                    let key = option.key;
                    let onclick = {
                        let check = check.clone();
                        Callback::from(move |_: MouseEvent| check.set(check.answer(key)))
                    };
                    html! {
                        <button
                            class={classes!("quiz-button", (check.selected == Some(key)).then(|| "selected"))}
                            disabled={check.selected.is_some()}
                            {onclick}
                        >
                            {option.text}
                        </button>
                    }
                }) }
            </div>
            {
                match check.is_correct() {
                    Some(correct) => html! {
                        <div class="quiz-result">
                            <h4 class={if correct { "correct" } else { "incorrect" }}>
                                { if correct { "Excellent Habit!" } else { "Room for Improvement!" } }
                            </h4>
                            <div class="bar"><div class="fill" style={format!("width: {}%;", check.score())}></div></div>
                        </div>
                    },
                    None => html! {},
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn impact_scales_weekly_use() {
        let result = impact(10);
        assert_eq!(result.yearly_cups, 520);
        assert!((result.trees - 26.0).abs() < 1e-9);
        assert!((result.waste_kg - 5.72).abs() < 1e-9);
    }

    #[test]
    fn verdict_tiers() {
        assert_eq!(Verdict::for_weekly(0), Verdict::EcoWarrior);
        assert_eq!(Verdict::for_weekly(5), Verdict::GoodStart);
        assert_eq!(Verdict::for_weekly(6), Verdict::TimeToChange);
        assert_eq!(Verdict::for_weekly(15), Verdict::TimeToChange);
        assert_eq!(Verdict::for_weekly(16), Verdict::UrgentAction);
    }

    #[test]
    fn retake_returns_to_question() {
        let answered = QuizState::default().reduce(QuizAction::Answer(3));
        assert_eq!(answered, QuizState::Answered(impact(3)));
        assert_eq!(answered.reduce(QuizAction::Retake), QuizState::Asking);
    }

    #[test]
    fn habit_check_locks_after_first_answer() {
        let check = HabitCheck::default().answer('A').answer('B');
        assert_eq!(check.selected, Some('A'));
        assert_eq!(check.is_correct(), Some(false));
        assert_eq!(check.score(), 30);
    }

    #[test]
    fn habit_check_ignores_unknown_keys() {
        let check = HabitCheck::default().answer('Z');
        assert_eq!(check.selected, None);
        assert_eq!(check.is_correct(), None);
        assert_eq!(HabitCheck::default().answer('B').score(), 75);
    }
}
