//! Small main-page affordances: form loading state, alert fade-out, delete
//! and logout confirmation, password visibility and the mobile menu.
//!
//! Markup and state changes are plain functions; the wasm32 installers only
//! wire them to DOM events.

/// Submit button content while a form is submitting.
pub const LOADING_MARKUP: &str = r#"<span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span> Loading..."#;

pub const DELETE_CONFIRM: &str =
    "Are you sure you want to delete this item? This action cannot be undone.";
pub const LOGOUT_CONFIRM: &str = "Are you sure you want to log out?";

pub const EYE_ICON: &str = r#"<i class="fas fa-eye"></i>"#;
pub const EYE_SLASH_ICON: &str = r#"<i class="fas fa-eye-slash"></i>"#;

/// Selectors the installers attach to.
pub mod selectors {
    pub const FORMS: &str = "form:not(.no-loading)";
    pub const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;
    pub const ALERTS: &str = ".alert:not(.alert-permanent)";
    pub const DELETE_BUTTONS: &str = ".btn-delete";
    pub const PASSWORD_TOGGLES: &str = ".password-toggle";
    pub const MENU_TOGGLE: &str = ".menu-toggle";
    pub const NAVBAR_NAV: &str = ".navbar-nav";
}

pub fn loading_markup() -> &'static str {
    LOADING_MARKUP
}

/// Next input type and toggle icon for a password visibility click.
pub fn toggle_password(current_type: &str) -> (&'static str, &'static str) {
    if current_type == "password" {
        ("text", EYE_SLASH_ICON)
    } else {
        ("password", EYE_ICON)
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{
    confirm_logout, install_alert_fade, install_delete_confirm, install_form_loading,
    install_menu_toggle, install_password_toggles,
};

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

    use super::{selectors, toggle_password, DELETE_CONFIRM, LOADING_MARKUP, LOGOUT_CONFIRM};

    fn each(document: &Document, selector: &str, mut f: impl FnMut(Element)) {
        let Ok(nodes) = document.query_selector_all(selector) else {
            log::warn!("widgets: bad selector {selector}");
            return;
        };
        for i in 0..nodes.length() {
            if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                f(element);
            }
        }
    }

    fn listen(target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_ok()
        {
            // Lives as long as the element
            closure.forget();
        }
    }

    fn confirm(window: &Window, message: &str) -> bool {
        window.confirm_with_message(message).unwrap_or(false)
    }

    /// Swap each form's submit button to a disabled spinner on submit.
    pub fn install_form_loading(document: &Document) {
        each(document, selectors::FORMS, |form| {
            let target = form.clone();
            listen(&form, "submit", move |_| {
                let Ok(Some(button)) = target.query_selector(selectors::SUBMIT_BUTTON) else {
                    return;
                };
                if let Ok(button) = button.dyn_into::<HtmlButtonElement>() {
                    let _ = button
                        .dataset()
                        .set("originalText", &button.inner_html());
                    button.set_inner_html(LOADING_MARKUP);
                    button.set_disabled(true);
                }
            });
        });
    }

    /// Fade non-permanent alerts after `fade_ms`, remove them `remove_ms` later.
    pub fn install_alert_fade(window: &Window, document: &Document, fade_ms: i32, remove_ms: i32) {
        each(document, selectors::ALERTS, |alert| {
            let timer_window = window.clone();
            let fade = Closure::once_into_js(move || {
                let _ = alert.class_list().add_1("fade-out");
                let remove = Closure::once_into_js(move || {
                    if let Some(parent) = alert.parent_node() {
                        let _ = parent.remove_child(&alert);
                    }
                });
                let _ = timer_window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    remove.unchecked_ref(),
                    remove_ms,
                );
            });
            let _ = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(fade.unchecked_ref(), fade_ms);
        });
    }

    /// Ask before following delete buttons.
    pub fn install_delete_confirm(window: &Window, document: &Document) {
        each(document, selectors::DELETE_BUTTONS, |button| {
            let window = window.clone();
            listen(&button, "click", move |event| {
                if !confirm(&window, DELETE_CONFIRM) {
                    event.prevent_default();
                }
            });
        });
    }

    /// Show or hide the password input named by each toggle's `data-target`.
    pub fn install_password_toggles(document: &Document) {
        each(document, selectors::PASSWORD_TOGGLES, |toggle| {
            let Ok(toggle) = toggle.dyn_into::<HtmlElement>() else {
                return;
            };
            let doc = document.clone();
            let icon_target = toggle.clone();
            listen(&toggle, "click", move |_| {
                let Some(selector) = icon_target.dataset().get("target") else {
                    return;
                };
                let Some(input) = doc
                    .query_selector(&selector)
                    .ok()
                    .flatten()
                    .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                let (next, icon) = toggle_password(&input.type_());
                input.set_type(next);
                icon_target.set_inner_html(icon);
            });
        });
    }

    /// Toggle `show` on the navbar when the menu button is clicked.
    pub fn install_menu_toggle(document: &Document) {
        let Ok(Some(toggle)) = document.query_selector(selectors::MENU_TOGGLE) else {
            return;
        };
        let doc = document.clone();
        listen(&toggle, "click", move |_| {
            if let Ok(Some(nav)) = doc.query_selector(selectors::NAVBAR_NAV) {
                let _ = nav.class_list().toggle("show");
            }
        });
    }

    /// Ask, then navigate to `logout_url`.
    pub fn confirm_logout(window: &Window, logout_url: &str) {
        if confirm(window, LOGOUT_CONFIRM) {
            if let Err(e) = window.location().set_href(logout_url) {
                log::error!("logout: {}", crate::error::js_error(&e));
            }
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("password", "text", EYE_SLASH_ICON ; "reveal")]
    #[test_case("text", "password", EYE_ICON ; "hide")]
    fn test_toggle_password(current: &str, next: &str, icon: &str) {
        assert_eq!(toggle_password(current), (next, icon));
    }

    #[test]
    fn test_loading_markup_has_spinner() {
        assert!(loading_markup().contains("spinner-border"));
        assert!(loading_markup().ends_with("Loading..."));
    }
}
