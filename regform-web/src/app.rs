//! Registration page.
//!
//! Renders the form markup once, then binds a [`FormController`] to the
//! rendered DOM after mount. Submit validates every field; typing validates
//! the edited field once input pauses.

use std::{cell::RefCell, rc::Rc};

use shared::debounce::Debouncer;
use shared::form::FormController;
use shared::models::FieldId;
use strum::IntoEnumIterator;
use web_sys::HtmlInputElement;
use yew::{
    Html, TargetCast,
    events::{InputEvent, SubmitEvent},
    function_component, html, use_effect_with, use_mut_ref,
};

use crate::config::FrontendConfig;
use crate::dom::{DomField, locate_fields};
use crate::timer::TimeoutScheduler;

type SharedController = Rc<RefCell<FormController<DomField>>>;

/// Controller and live-input debouncer bound to the mounted form.
struct LiveForm {
    controller: SharedController,
    debouncer: Debouncer<String, TimeoutScheduler>,
}

impl LiveForm {
    fn bind(config: &FrontendConfig) -> Result<Self, String> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| "no document available".to_string())?;
        let fields = locate_fields(&document).map_err(|err| err.to_string())?;

        let controller: SharedController = Rc::new(RefCell::new(FormController::new(
            fields,
            config.form.rules(),
        )));

        let handler_controller = Rc::clone(&controller);
        let debouncer = Debouncer::new(
            TimeoutScheduler,
            config.form.debounce_delay(),
            move |field_id: String| {
                handler_controller.borrow_mut().handle_input(&field_id);
            },
        );

        Ok(Self {
            controller,
            debouncer,
        })
    }
}

/// Input type used for each field.
fn input_type(id: FieldId) -> &'static str {
    match id {
        FieldId::Username | FieldId::Email => "text",
        FieldId::Password | FieldId::ConfirmPassword => "password",
    }
}

fn field_group(id: FieldId) -> Html {
    html! {
        <div class="form-field">
            <label for={id.as_str()}>{ id.label() }{ ":" }</label>
            <input
                type={input_type(id)}
                id={id.as_str()}
                name={id.as_str()}
                autocomplete="off"
            />
            <small></small>
        </div>
    }
}

/// The registration page.
#[function_component(App)]
pub fn app() -> Html {
    let live = use_mut_ref(|| Option::<LiveForm>::None);

    {
        let live = live.clone();
        use_effect_with((), move |_| {
            match LiveForm::bind(&FrontendConfig::new()) {
                Ok(form) => *live.borrow_mut() = Some(form),
                Err(err) => web_sys::console::error_1(
                    &format!("Failed to bind registration form: {err}").into(),
                ),
            }
            move || {
                live.borrow_mut().take();
            }
        });
    }

    let on_submit = {
        let live = live.clone();
        move |event: SubmitEvent| {
            event.prevent_default();

            let live = live.borrow();
            let Some(form) = live.as_ref() else {
                return;
            };
            let outcome = form.controller.borrow_mut().submit();
            let verdict = if outcome.valid { "valid" } else { "invalid" };
            web_sys::console::log_1(&format!("Registration form is {verdict}").into());
        }
    };

    let on_input = {
        let live = live.clone();
        move |event: InputEvent| {
            let Some(input) = event.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            if let Some(form) = live.borrow().as_ref() {
                form.debouncer.trigger(input.id());
            }
        }
    };

    html! {
        <div class="container">
            <form id="form" class="form" onsubmit={on_submit} oninput={on_input}>
                <h1>{ "Sign Up" }</h1>
                { for FieldId::iter().map(field_group) }
                <div class="form-field">
                    <input type="submit" value="Sign Up" />
                </div>
            </form>
        </div>
    }
}
