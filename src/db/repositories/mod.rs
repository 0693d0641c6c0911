mod budget;
mod classes;
mod plans;
mod questions;
mod sessions;
