//! Paths shared by the route guard and the app's router.

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const DASHBOARD: &str = "/dashboard";

/// Where an authenticated user lacking the required role is sent.
pub const FALLBACK: &str = HOME;
