mod helpers;

mod auth;
mod projects;
