#![cfg_attr(not(test), forbid(unsafe_code))]
#![deny(warnings, clippy::pedantic)]

//! Core of the registration form: rule predicates, the feedback
//! presenter, per-field validators, the debounced dispatcher, and the form
//! controller that wires them together.

pub mod config;
pub mod debounce;
pub mod errors;
pub mod form;
pub mod models;
pub mod presenter;
pub mod rules;
pub mod validation;
