pub mod oauth;
pub mod strava_api;
