//! Home page and the three input forms

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::views;
use crate::AppState;

/// GET /
pub async fn home() -> Html<String> {
    views::home_page()
}

/// GET /crop-recommend
pub async fn crop_form(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = state.flash.take(jar);
    (jar, views::crop_form(flash.as_deref()))
}

/// GET /fertilizer
pub async fn fertilizer_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Html<String>) {
    let (jar, flash) = state.flash.take(jar);
    let crops = state.nutrients.as_deref().into_iter().flat_map(|t| t.crops());
    (jar, views::fertilizer_form(flash.as_deref(), crops))
}

/// GET /disease
pub async fn disease_form(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flash) = state.flash.take(jar);
    (jar, views::disease_form(flash.as_deref()))
}
