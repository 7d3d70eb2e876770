use rocket::fairing::AdHoc;

pub mod types;
pub mod user;

#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    /// Used when a request doesn't say which mode it wants
    pub all_time_default: bool,
}

#[get("/health")]
fn health() -> &'static str {
    "ok"
}

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket
            .mount("/api", routes![health])
            .attach(user::stage())
    })
}
