use gloo_timers::callback::Timeout;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::config;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    MissingName,
    InvalidEmail,
    MissingMessage,
}

impl FieldError {
    pub fn message(self) -> &'static str {
        match self {
            FieldError::MissingName => "Please tell me your name.",
            FieldError::InvalidEmail => "Please provide a valid email address.",
            FieldError::MissingMessage => "Please write a message.",
        }
    }
}

pub fn validate(form: &ContactForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if form.name.trim().is_empty() {
        errors.push(FieldError::MissingName);
    }
    if !EMAIL.is_match(form.email.trim()) {
        errors.push(FieldError::InvalidEmail);
    }
    if form.message.trim().is_empty() {
        errors.push(FieldError::MissingMessage);
    }
    errors
}

#[derive(Clone, PartialEq)]
enum Status {
    Idle,
    Sent,
    Invalid(Vec<FieldError>),
}

#[function_component(ContactSection)]
pub fn contact_section() -> Html {
    let form = use_state(ContactForm::default);
    let status = use_state(|| Status::Idle);
    let clear_timer = use_mut_ref(|| None::<Timeout>);

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(ContactForm { name: input.value(), ..(*form).clone() });
        })
    };
    let on_email = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(ContactForm { email: input.value(), ..(*form).clone() });
        })
    };
    let on_message = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            form.set(ContactForm { message: input.value(), ..(*form).clone() });
        })
    };

    let on_submit = {
        let form = form.clone();
        let status = status.clone();
        let clear_timer = clear_timer.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let errors = validate(&form);
            if errors.is_empty() {
                info!("contact: message accepted (no backend configured)");
                form.set(ContactForm::default());
                status.set(Status::Sent);
            } else {
                status.set(Status::Invalid(errors));
            }
            let status = status.clone();
            // Replacing the handle drops (and clears) any earlier pending clear.
            *clear_timer.borrow_mut() = Some(Timeout::new(config::CONTACT_STATUS_CLEAR_MS, move || {
                status.set(Status::Idle);
            }));
        })
    };

    html! {
        <form class="contact-form" onsubmit={on_submit}>
            <input type="text" placeholder="Your name" value={form.name.clone()} oninput={on_name} />
            <input type="email" placeholder="you@example.com" value={form.email.clone()} oninput={on_email} />
            <textarea placeholder="Message" value={form.message.clone()} oninput={on_message} />
            <button type="submit">{"Send"}</button>
            {
                match &*status {
                    Status::Idle => html! {},
                    Status::Sent => html! { <p class="form-status ok">{"Message sent! (demo, nothing left this page)"}</p> },
                    Status::Invalid(errors) => html! {
                        <ul class="form-status error">
                            { for errors.iter().map(|e| html! { <li>{e.message()}</li> }) }
                        </ul>
                    },
                }
            }
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm { name: name.into(), email: email.into(), message: message.into() }
    }

    #[test]
    fn complete_form_is_valid() {
        assert!(validate(&form("Ada", "ada@example.com", "Hello")).is_empty());
    }

    #[test]
    fn blank_fields_are_reported_in_order() {
        assert_eq!(
            validate(&form("  ", "nope", "\n")),
            vec![FieldError::MissingName, FieldError::InvalidEmail, FieldError::MissingMessage]
        );
    }

    #[test]
    fn email_needs_domain_with_dot() {
        assert_eq!(validate(&form("Ada", "ada@example", "Hi")), vec![FieldError::InvalidEmail]);
        assert_eq!(validate(&form("Ada", "a b@example.com", "Hi")), vec![FieldError::InvalidEmail]);
        assert!(validate(&form("Ada", " ada@mail.example.org ", "Hi")).is_empty());
    }
}
