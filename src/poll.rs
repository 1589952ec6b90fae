use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_sys::{window, HtmlInputElement};
use yew::prelude::*;

use crate::config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollChoice {
    Yes,
    Sometimes,
    No,
}

impl PollChoice {
    pub const ALL: [PollChoice; 3] = [PollChoice::Yes, PollChoice::Sometimes, PollChoice::No];

    pub fn label(self) -> &'static str {
        match self {
            PollChoice::Yes => "Yes, daily",
            PollChoice::Sometimes => "Sometimes",
            PollChoice::No => "Never, I bring my own",
        }
    }

    pub fn value(self) -> &'static str {
        match self {
            PollChoice::Yes => "yes",
            PollChoice::Sometimes => "sometimes",
            PollChoice::No => "no",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|choice| choice.value() == value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollTally {
    #[serde(default)]
    pub yes: u32,
    #[serde(default)]
    pub sometimes: u32,
    #[serde(default)]
    pub no: u32,
}

impl PollTally {
    pub fn vote(mut self, choice: PollChoice) -> Self {
        let slot = match choice {
            PollChoice::Yes => &mut self.yes,
            PollChoice::Sometimes => &mut self.sometimes,
            PollChoice::No => &mut self.no,
        };
        *slot = slot.saturating_add(1);
        self
    }

    pub fn count(&self, choice: PollChoice) -> u32 {
        match choice {
            PollChoice::Yes => self.yes,
            PollChoice::Sometimes => self.sometimes,
            PollChoice::No => self.no,
        }
    }

    pub fn total(&self) -> u64 {
        self.yes as u64 + self.sometimes as u64 + self.no as u64
    }

    /// Share of `choice` rounded to the nearest whole percent; 0 for an empty poll.
    pub fn percent(&self, choice: PollChoice) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.count(choice) as f64 / total as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("local storage unavailable")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Storage(String),
    #[error("stored tally is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

pub trait TallyStore {
    fn read(&self) -> Result<Option<String>, PollError>;
    fn write(&mut self, raw: &str) -> Result<(), PollError>;
}

pub fn load(store: &impl TallyStore) -> Result<PollTally, PollError> {
    match store.read()? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(PollTally::default()),
    }
}

pub fn save(store: &mut impl TallyStore, tally: &PollTally) -> Result<(), PollError> {
    let raw = serde_json::to_string(tally)?;
    store.write(&raw)
}

pub struct LocalStorageTally {
    storage: web_sys::Storage,
    key: &'static str,
}

impl LocalStorageTally {
    pub fn open() -> Result<Self, PollError> {
        let storage = window()
            .ok_or(PollError::Unavailable)?
            .local_storage()
            .map_err(|e| PollError::Storage(format!("{:?}", e)))?
            .ok_or(PollError::Unavailable)?;
        Ok(Self { storage, key: config::POLL_STORAGE_KEY })
    }
}

impl TallyStore for LocalStorageTally {
    fn read(&self) -> Result<Option<String>, PollError> {
        self.storage
            .get_item(self.key)
            .map_err(|e| PollError::Storage(format!("{:?}", e)))
    }

    fn write(&mut self, raw: &str) -> Result<(), PollError> {
        self.storage
            .set_item(self.key, raw)
            .map_err(|e| PollError::Storage(format!("{:?}", e)))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollState {
    pub tally: PollTally,
    pub selected: Option<PollChoice>,
    pub voted: Option<PollChoice>,
    pub nudge: bool,
}

pub enum PollAction {
    Select(PollChoice),
    Submit,
    ClearNudge,
}

impl PollState {
    pub fn new(tally: PollTally) -> Self {
        Self { tally, ..Self::default() }
    }

    /// One vote per visit; submitting with nothing selected only sets `nudge`.
    pub fn apply(self, action: PollAction) -> Self {
        match action {
            PollAction::Select(choice) if self.voted.is_none() => Self { selected: Some(choice), ..self },
            PollAction::Select(_) => self,
            PollAction::Submit => match (self.voted, self.selected) {
                (Some(_), _) => self,
                (None, None) => Self { nudge: true, ..self },
                (None, Some(choice)) => Self {
                    tally: self.tally.vote(choice),
                    voted: Some(choice),
                    nudge: false,
                    ..self
                },
            },
            PollAction::ClearNudge => Self { nudge: false, ..self },
        }
    }
}

impl Reducible for PollState {
    type Action = PollAction;

    fn reduce(self: Rc<Self>, action: PollAction) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

#[function_component(Poll)]
pub fn poll() -> Html {
    let state = use_reducer(|| {
        let tally = LocalStorageTally::open()
            .and_then(|store| load(&store))
            .unwrap_or_else(|e| {
                warn!("poll: {}, starting from an empty tally", e);
                PollTally::default()
            });
        PollState::new(tally)
    });
    let nudge_timer = use_mut_ref(|| None::<Timeout>);

    let on_change = {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(choice) = PollChoice::from_value(&input.value()) {
                state.dispatch(PollAction::Select(choice));
            }
        })
    };

    let on_submit = {
        let state = state.clone();
        let nudge_timer = nudge_timer.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let next = (*state).clone().apply(PollAction::Submit);
            if next.nudge {
                let dispatcher = state.dispatcher();
                // Replacing the handle cancels a nudge still waiting to clear.
                *nudge_timer.borrow_mut() = Some(Timeout::new(300, move || {
                    dispatcher.dispatch(PollAction::ClearNudge);
                }));
            } else if next.tally != state.tally {
                debug!("poll: vote recorded {:?}", next.voted);
                if let Err(e) = LocalStorageTally::open().and_then(|mut store| save(&mut store, &next.tally)) {
                    warn!("poll: could not persist tally: {}", e);
                }
            }
            state.dispatch(PollAction::Submit);
        })
    };

    let tally = state.tally;
    html! {
        <form class={classes!("poll-form", state.nudge.then(|| "shake"))} onsubmit={on_submit}>
            <p class="poll-question">{"Do you use disposable paper cups?"}</p>
            <div class="poll-options">
                { for PollChoice::ALL.iter().map(|choice| html! {
                    <label class="poll-option">
                        <input
                            type="radio"
                            name="use"
                            value={choice.value()}
                            disabled={state.voted.is_some()}
                            checked={state.selected == Some(*choice)}
                            onchange={on_change.clone()}
                        />
                        {choice.label()}
                    </label>
                }) }
            </div>
            <button type="submit" class="poll-submit" disabled={state.voted.is_some()}>{"Vote"}</button>
            <div class="poll-results">
                { for PollChoice::ALL.iter().map(|choice| {
                    let pct = tally.percent(*choice);
                    html! {
                        <div class="poll-row">
                            <span class="poll-label">{choice.label()}</span>
                            <div class="bar"><div class="fill" style={format!("width: {}%;", pct)}></div></div>
                            <span class="percent">{format!("{}%", pct)}</span>
                        </div>
                    }
                }) }
                <p class="poll-total">{format!("{} votes so far", tally.total())}</p>
            </div>
        </form>
    }
}
